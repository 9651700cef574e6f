//! The acquire → recognize → deliver flow behind the paste hotkey.

use crate::core::interfaces::adapters::ResultSink;
use crate::core::models::{ImageHandle, RecognitionOutcome};
use crate::core::services::{ImageSourceResolver, RecognitionInvoker};

fn recognize_and_deliver(
    invoker: &RecognitionInvoker,
    handle: &ImageHandle,
    sink: &dyn ResultSink,
) -> RecognitionOutcome {
    let outcome = invoker.recognize(handle);
    sink.deliver(&outcome);
    outcome
}

/// Reads the clipboard, recognizes it and delivers the result.
///
/// The acquired handle is transient: its temp file is removed before returning.
pub fn acquire_recognize_deliver(
    resolver: &ImageSourceResolver,
    invoker: &RecognitionInvoker,
    sink: &dyn ResultSink,
) -> RecognitionOutcome {
    match resolver.from_clipboard() {
        Ok(handle) => {
            let outcome = recognize_and_deliver(invoker, &handle, sink);
            resolver.clear(handle);
            outcome
        }
        Err(e) => {
            let outcome = Err(e);
            sink.deliver(&outcome);
            outcome
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::errors::OcrAppError;
    use crate::core::models::ClipboardContent;
    use crate::core::services::TempImageSlot;
    use crate::core::test_support::{
        bitmap_content, unique_test_directory, MockClipboard, MockOcrService, RecordingSink,
    };

    #[test]
    fn test_clipboard_bitmap_is_recognized_delivered_and_cleaned_up() {
        let directory = unique_test_directory("image-to-text-pipeline");
        let slot = TempImageSlot::in_directory(&directory, "hotkey_clipboard_image.png");
        let resolver = ImageSourceResolver::build(
            Arc::new(MockClipboard::holding(bitmap_content(4, 4))),
            slot.clone(),
        );
        let invoker = RecognitionInvoker::build(Arc::new(MockOcrService::returning("Hello")));
        let sink = RecordingSink::default();

        let outcome = acquire_recognize_deliver(&resolver, &invoker, &sink);

        assert_eq!(outcome, Ok("Hello".to_string()));
        assert_eq!(sink.outcomes(), vec![Ok("Hello".to_string())]);
        assert!(!slot.path().exists());

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_empty_clipboard_is_delivered_without_calling_engine() {
        let directory = unique_test_directory("image-to-text-pipeline");
        let resolver = ImageSourceResolver::build(
            Arc::new(MockClipboard::holding(ClipboardContent::Empty)),
            TempImageSlot::in_directory(&directory, "hotkey_clipboard_image.png"),
        );
        let engine = Arc::new(MockOcrService::returning("unused"));
        let invoker = RecognitionInvoker::build(engine.clone());
        let sink = RecordingSink::default();

        let outcome = acquire_recognize_deliver(&resolver, &invoker, &sink);

        assert_eq!(outcome, Err(OcrAppError::EmptyOrUnsupportedClipboard));
        assert_eq!(sink.outcomes().len(), 1);
        assert_eq!(engine.call_count(), 0);

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_engine_failure_is_delivered_and_temp_file_still_removed() {
        let directory = unique_test_directory("image-to-text-pipeline");
        let slot = TempImageSlot::in_directory(&directory, "hotkey_clipboard_image.png");
        let resolver = ImageSourceResolver::build(
            Arc::new(MockClipboard::holding(bitmap_content(2, 2))),
            slot.clone(),
        );
        let invoker =
            RecognitionInvoker::build(Arc::new(MockOcrService::failing("corrupt image")));
        let sink = RecordingSink::default();

        let outcome = acquire_recognize_deliver(&resolver, &invoker, &sink);

        assert!(matches!(outcome, Err(OcrAppError::RecognitionFailed(_))));
        assert!(matches!(
            sink.outcomes()[0],
            Err(OcrAppError::RecognitionFailed(_))
        ));
        assert!(!slot.path().exists());

        std::fs::remove_dir_all(&directory).ok();
    }
}
