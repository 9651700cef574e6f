use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced to the user, either in the result panel or in the log.
///
/// None of these terminate the process; each one ends a single attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OcrAppError {
    #[error("Unable to read image {}: {detail}", .path.display())]
    UnreadableFile { path: PathBuf, detail: String },

    #[error("Clipboard does not contain an image or a supported image file")]
    EmptyOrUnsupportedClipboard,

    #[error("Recognition failed: {0}")]
    RecognitionFailed(String),

    #[error("Tray icon resource not found (searched: {searched})")]
    MissingIconResource { searched: String },

    #[error("Failed to register global hotkey: {0}")]
    HotkeyRegistrationFailed(String),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Temporary image file error: {0}")]
    TempFileFailed(String),
}

impl OcrAppError {
    pub fn unreadable_file(path: impl Into<PathBuf>, detail: impl ToString) -> Self {
        Self::UnreadableFile {
            path: path.into(),
            detail: detail.to_string(),
        }
    }

    /// Engine errors are flattened into one string; an empty detail is never reported.
    pub fn recognition_failed(error: &anyhow::Error) -> Self {
        let detail = format!("{:#}", error);
        if detail.trim().is_empty() {
            Self::RecognitionFailed("unknown OCR engine error".to_string())
        } else {
            Self::RecognitionFailed(detail)
        }
    }
}
