use std::sync::Arc;

use crate::core::interfaces::adapters::ResultSink;
use crate::core::interfaces::ports::ClipboardPort;
use crate::core::models::RecognitionOutcome;
use crate::global_constants::LOG_TAG_CLIPBOARD;

/// Background delivery: copy recognized text to the clipboard and log the outcome.
pub struct ClipboardLogSink {
    clipboard: Arc<dyn ClipboardPort>,
}

impl ClipboardLogSink {
    pub fn build(clipboard: Arc<dyn ClipboardPort>) -> Self {
        Self { clipboard }
    }
}

impl ResultSink for ClipboardLogSink {
    fn deliver(&self, outcome: &RecognitionOutcome) {
        match outcome {
            Ok(text) => {
                if let Err(e) = self.clipboard.write_text(text) {
                    log::error!(
                        "{} Failed to copy recognized text to clipboard: {:#}",
                        LOG_TAG_CLIPBOARD,
                        e
                    );
                    return;
                }
                log::info!(
                    "{} Recognized text copied to clipboard ({} characters)",
                    LOG_TAG_CLIPBOARD,
                    text.chars().count()
                );
                log::info!("{} Recognized text:\n{}", LOG_TAG_CLIPBOARD, text);
            }
            Err(e) => {
                log::error!("{} Hotkey recognition failed: {}", LOG_TAG_CLIPBOARD, e);
            }
        }
    }
}
