use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use image::DynamicImage;

use crate::core::interfaces::adapters::{OcrService, ResultSink};
use crate::core::interfaces::ports::ClipboardPort;
use crate::core::models::{ClipboardContent, RecognitionOutcome};

pub struct MockClipboard {
    content: Mutex<ClipboardContent>,
    written: Mutex<Vec<String>>,
}

impl MockClipboard {
    pub fn holding(content: ClipboardContent) -> Self {
        Self {
            content: Mutex::new(content),
            written: Mutex::new(Vec::new()),
        }
    }

    pub fn set_content(&self, content: ClipboardContent) {
        *self.content.lock().unwrap() = content;
    }

    pub fn written_texts(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

impl ClipboardPort for MockClipboard {
    fn read_content(&self) -> Result<ClipboardContent> {
        Ok(self.content.lock().unwrap().clone())
    }

    fn write_text(&self, text: &str) -> Result<()> {
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub struct MockOcrService {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
    last_dimensions: Mutex<Option<(u32, u32)>>,
}

impl MockOcrService {
    pub fn returning(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last_dimensions: Mutex::new(None),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            reply: Err(detail.to_string()),
            calls: AtomicUsize::new(0),
            last_dimensions: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_dimensions(&self) -> Option<(u32, u32)> {
        *self.last_dimensions.lock().unwrap()
    }
}

impl OcrService for MockOcrService {
    fn extract_text_from_image(&self, image: &DynamicImage) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_dimensions.lock().unwrap() = Some((image.width(), image.height()));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(detail) => Err(anyhow::anyhow!(detail.clone())),
        }
    }
}

#[derive(Default)]
pub struct RecordingSink {
    outcomes: Mutex<Vec<RecognitionOutcome>>,
}

impl RecordingSink {
    pub fn outcomes(&self) -> Vec<RecognitionOutcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl ResultSink for RecordingSink {
    fn deliver(&self, outcome: &RecognitionOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }
}

pub fn unique_test_directory(prefix: &str) -> PathBuf {
    let directory = std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&directory).unwrap();
    directory
}

pub fn write_test_image(directory: &Path, file_name: &str) -> PathBuf {
    let path = directory.join(file_name);
    let image = image::RgbImage::from_pixel(6, 3, image::Rgb([10, 20, 30]));
    DynamicImage::ImageRgb8(image).save(&path).unwrap();
    path
}

pub fn bitmap_content(width: u32, height: u32) -> ClipboardContent {
    ClipboardContent::Bitmap {
        width,
        height,
        rgba: vec![128u8; (width * height * 4) as usize],
    }
}
