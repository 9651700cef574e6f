mod clipboard_content;
mod hotkey_binding;
mod image_handle;
mod user_settings;
mod window_visibility;

pub use clipboard_content::ClipboardContent;
pub use hotkey_binding::HotkeyBinding;
pub use image_handle::{ImageHandle, ImageOrigin};
pub use user_settings::{ThemeMode, UserSettings};
pub use window_visibility::WindowVisibility;

use crate::core::errors::OcrAppError;

/// Text produced by one recognition attempt, or the reason it failed.
pub type RecognitionOutcome = Result<String, OcrAppError>;
