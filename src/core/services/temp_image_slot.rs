use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::core::errors::OcrAppError;
use crate::global_constants::{APPLICATION_DIR_NAME, LOG_TAG_IMAGE_SOURCE};

/// A single-file, last-writer-wins slot for clipboard bitmaps.
///
/// Each entry point owns its own slot, so the window and the hotkey never
/// write the same file.
#[derive(Debug, Clone)]
pub struct TempImageSlot {
    path: PathBuf,
}

impl TempImageSlot {
    pub fn in_directory(directory: &Path, file_name: &str) -> Self {
        Self {
            path: directory.join(file_name),
        }
    }

    pub fn for_current_process(file_name: &str) -> Self {
        let directory = std::env::temp_dir().join(APPLICATION_DIR_NAME);
        let file_name = format!("{}-{}", std::process::id(), file_name);
        Self::in_directory(&directory, &file_name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, image: &DynamicImage) -> Result<PathBuf, OcrAppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| OcrAppError::TempFileFailed(format!("{}: {}", parent.display(), e)))?;
        }

        image
            .save_with_format(&self.path, image::ImageFormat::Png)
            .map_err(|e| OcrAppError::TempFileFailed(format!("{}: {}", self.path.display(), e)))?;

        log::debug!(
            "{} stored {}x{} clipboard bitmap at {:?}",
            LOG_TAG_IMAGE_SOURCE,
            image.width(),
            image.height(),
            self.path
        );
        Ok(self.path.clone())
    }
}

/// Removes a temp file; a file that is already gone is not an error.
pub fn remove_temp_file(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => log::debug!("{} removed temp file {:?}", LOG_TAG_IMAGE_SOURCE, path),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => log::warn!(
            "{} failed to remove temp file {:?}: {}",
            LOG_TAG_IMAGE_SOURCE,
            path,
            e
        ),
    }
}
