use std::ffi::OsString;
use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use rusty_tesseract::{Args, Image as TesseractImage};

use crate::core::interfaces::adapters::OcrService;

pub struct TesseractOcrService {
    args: Args,
}

impl TesseractOcrService {
    /// Verifies the engine binary is reachable and configures the language profile.
    pub fn build(languages: &str) -> Result<Self> {
        log::info!(
            "[TESSERACT_OCR] Initializing Tesseract OCR service with languages '{}'",
            languages
        );

        let version = rusty_tesseract::get_tesseract_version()
            .context("Tesseract engine not found; install it or set tesseract_command_path")?;
        log::info!("[TESSERACT_OCR] Found engine: {}", version.trim());

        Self::warn_about_missing_languages(languages);

        Ok(Self {
            args: Self::build_args(languages),
        })
    }

    fn build_args(languages: &str) -> Args {
        Args {
            lang: languages.to_string(),
            ..Args::default()
        }
    }

    fn warn_about_missing_languages(languages: &str) {
        match rusty_tesseract::get_tesseract_langs() {
            Ok(installed) => {
                for language in languages.split('+').filter(|l| !l.is_empty()) {
                    if !installed.iter().any(|i| i == language) {
                        log::warn!(
                            "[TESSERACT_OCR] Language '{}' is not installed; recognition will fail",
                            language
                        );
                    }
                }
            }
            Err(e) => log::warn!("[TESSERACT_OCR] Could not list installed languages: {}", e),
        }
    }

    /// Puts the configured binary's directory at the front of `PATH`.
    ///
    /// Must run before any background thread is spawned.
    pub fn expose_engine_directory(tesseract_command: &Path) -> Result<()> {
        let engine_dir = tesseract_command
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .with_context(|| format!("{:?} has no parent directory", tesseract_command))?;

        let current_path = std::env::var_os("PATH").unwrap_or_default();
        let updated_path = Self::prepend_to_search_path(engine_dir, &current_path)?;
        std::env::set_var("PATH", updated_path);

        log::info!("[TESSERACT_OCR] Using engine directory {:?}", engine_dir);
        Ok(())
    }

    fn prepend_to_search_path(directory: &Path, current_path: &OsString) -> Result<OsString> {
        let mut entries: Vec<_> = std::env::split_paths(current_path)
            .filter(|entry| entry != directory)
            .collect();
        entries.insert(0, directory.to_path_buf());

        std::env::join_paths(entries).context("Failed to build PATH with engine directory")
    }
}

impl OcrService for TesseractOcrService {
    fn extract_text_from_image(&self, image: &DynamicImage) -> Result<String> {
        log::info!("[TESSERACT_OCR] Starting text extraction");
        log::debug!(
            "[TESSERACT_OCR] Image dimensions: {}x{}",
            image.width(),
            image.height()
        );

        let tesseract_image = TesseractImage::from_dynamic_image(image)
            .context("Failed to create Tesseract image")?;

        let extracted_text = rusty_tesseract::image_to_string(&tesseract_image, &self.args)
            .context("Failed to extract text from image")?;

        log::info!(
            "[TESSERACT_OCR] Text extraction complete. Extracted {} characters",
            extracted_text.chars().count()
        );
        log::debug!("[TESSERACT_OCR] Extracted text: {}", extracted_text);

        Ok(extracted_text)
    }
}

/// Stands in for the engine until it has been located, or when it never is.
pub struct UnavailableOcrService {
    reason: String,
}

impl UnavailableOcrService {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl OcrService for UnavailableOcrService {
    fn extract_text_from_image(&self, _image: &DynamicImage) -> Result<String> {
        anyhow::bail!("OCR engine not available: {}", self.reason)
    }
}
