mod clipboard_port;

pub use clipboard_port::ClipboardPort;
