mod arboard_clipboard;
mod file_picker;
mod keyboard_listener;
mod system_tray;

pub use arboard_clipboard::ArboardClipboard;
pub use file_picker::pick_image_file;
pub use keyboard_listener::{GlobalKeyboardEvent, GlobalKeyboardListener};
pub use system_tray::{SystemTray, TrayEvent, TrayPresence};
