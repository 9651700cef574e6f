use std::path::PathBuf;

/// What the system clipboard currently holds, as far as image import cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardContent {
    FileList(Vec<PathBuf>),
    Bitmap {
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    },
    Text(String),
    Empty,
}

impl ClipboardContent {
    pub fn describe(&self) -> String {
        match self {
            ClipboardContent::FileList(paths) => format!("file list ({} entries)", paths.len()),
            ClipboardContent::Bitmap { width, height, .. } => {
                format!("bitmap {}x{}", width, height)
            }
            ClipboardContent::Text(text) => format!("text ({} bytes)", text.len()),
            ClipboardContent::Empty => "empty".to_string(),
        }
    }
}
