mod clipboard_log_sink;
mod tesseract_ocr_service;

pub use clipboard_log_sink::ClipboardLogSink;
pub use tesseract_ocr_service::{TesseractOcrService, UnavailableOcrService};
