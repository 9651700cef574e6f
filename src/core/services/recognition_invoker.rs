use std::sync::Arc;

use crate::core::errors::OcrAppError;
use crate::core::interfaces::adapters::OcrService;
use crate::core::models::{ImageHandle, RecognitionOutcome};

#[derive(Clone)]
pub struct RecognitionInvoker {
    engine: Arc<dyn OcrService>,
}

impl RecognitionInvoker {
    pub fn build(engine: Arc<dyn OcrService>) -> Self {
        Self { engine }
    }

    pub fn recognize(&self, handle: &ImageHandle) -> RecognitionOutcome {
        log::info!(
            "[RECOGNITION] recognizing {}x{} image from {:?}",
            handle.width(),
            handle.height(),
            handle.source_path()
        );

        match self.engine.extract_text_from_image(handle.image()) {
            Ok(text) => {
                log::info!("[RECOGNITION] recognized {} characters", text.chars().count());
                Ok(text)
            }
            Err(e) => {
                log::error!("[RECOGNITION] engine failed: {:#}", e);
                Err(OcrAppError::recognition_failed(&e))
            }
        }
    }
}
