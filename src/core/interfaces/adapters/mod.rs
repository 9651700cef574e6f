mod ocr_service;
mod result_sink;

pub use ocr_service::OcrService;
pub use result_sink::ResultSink;
