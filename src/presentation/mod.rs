pub mod app_theme;
mod main_window_view;

pub use main_window_view::{shortcut_for, MainWindowMessage, MainWindowView};
