pub const APPLICATION_NAME: &str = "Image to Text - Desktop";
pub const APPLICATION_TITLE: &str = "Image to Text";
pub const APPLICATION_DIR_NAME: &str = "image-to-text-pc";

pub const LOG_TAG_APP: &str = "[APP]";
pub const LOG_TAG_KEYBOARD: &str = "[KEYBOARD]";
pub const LOG_TAG_IMAGE_SOURCE: &str = "[IMAGE_SOURCE]";
pub const LOG_TAG_CLIPBOARD: &str = "[CLIPBOARD]";

pub const MESSAGE_KEYBOARD_HOTKEY_DETECTED: &str = "paste hotkey detected - recognizing clipboard";

pub const DEFAULT_PASTE_HOTKEY: &str = "Ctrl+Alt+V";
pub const DEFAULT_RECOGNITION_LANGUAGES: &str = "chi_sim+eng";

#[cfg(target_os = "windows")]
pub const DEFAULT_TESSERACT_PATH: &str = r"C:\Program Files\Tesseract-OCR\tesseract.exe";
#[cfg(target_os = "macos")]
pub const DEFAULT_TESSERACT_PATH: &str = "/opt/homebrew/bin/tesseract";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const DEFAULT_TESSERACT_PATH: &str = "/usr/bin/tesseract";

pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];
pub const FILE_DIALOG_TITLE: &str = "Select Image";
pub const FILE_DIALOG_FILTER_NAME: &str = "Image files";

pub const INTERACTIVE_CLIPBOARD_FILE_NAME: &str = "clipboard_image.png";
pub const HOTKEY_CLIPBOARD_FILE_NAME: &str = "hotkey_clipboard_image.png";

pub const ASSETS_DIR_NAME: &str = "assets";
pub const TRAY_ICON_FILE_NAME: &str = "tray_icon.png";

pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const LOCK_FILE_NAME: &str = "image-to-text-pc.lock";

pub const PROMPT_SELECT_IMAGE_FIRST: &str = "Please select an image first!";
pub const RESULT_PLACEHOLDER: &str = "Recognition results will appear here...";
pub const STATUS_INITIALIZING_OCR: &str = "Initializing OCR engine...";
pub const STATUS_READY: &str = "Ready";
