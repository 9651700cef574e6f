use anyhow::Result;
use image::DynamicImage;

/// An external recognition engine. Calls block until the engine returns.
pub trait OcrService: Send + Sync {
    fn extract_text_from_image(&self, image: &DynamicImage) -> Result<String>;
}
