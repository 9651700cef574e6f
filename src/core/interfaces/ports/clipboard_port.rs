use anyhow::Result;

use crate::core::models::ClipboardContent;

pub trait ClipboardPort: Send + Sync {
    fn read_content(&self) -> Result<ClipboardContent>;
    fn write_text(&self, text: &str) -> Result<()>;
}
