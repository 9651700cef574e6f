use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::core::interfaces::ports::ClipboardPort;
use crate::core::models::ClipboardContent;
use crate::global_constants::LOG_TAG_CLIPBOARD;

/// System clipboard through `arboard`.
///
/// One handle is kept for the whole process: on X11 and Wayland the text we
/// set stays available only while its owning handle is alive.
pub struct ArboardClipboard {
    handle: RetainedHandle<arboard::Clipboard>,
}

impl ArboardClipboard {
    pub fn initialize() -> Self {
        log::debug!("{} initializing system clipboard", LOG_TAG_CLIPBOARD);
        Self {
            handle: RetainedHandle::new(Self::open),
        }
    }

    fn open() -> Result<arboard::Clipboard> {
        arboard::Clipboard::new().context("Failed to open system clipboard")
    }
}

impl ClipboardPort for ArboardClipboard {
    fn read_content(&self) -> Result<ClipboardContent> {
        self.handle.with(read_from)
    }

    fn write_text(&self, text: &str) -> Result<()> {
        self.handle.with(|clipboard| {
            clipboard
                .set_text(text.to_string())
                .context("Failed to write text to clipboard")
        })
    }
}

fn read_from(clipboard: &mut arboard::Clipboard) -> Result<ClipboardContent> {
    match clipboard.get().file_list() {
        Ok(paths) if !paths.is_empty() => {
            log::debug!("{} found {} file(s)", LOG_TAG_CLIPBOARD, paths.len());
            return Ok(ClipboardContent::FileList(paths));
        }
        Ok(_) => {}
        Err(e) => log::debug!("{} no file list on clipboard: {}", LOG_TAG_CLIPBOARD, e),
    }

    match clipboard.get_image() {
        Ok(image) => {
            log::debug!(
                "{} found bitmap {}x{}",
                LOG_TAG_CLIPBOARD,
                image.width,
                image.height
            );
            return Ok(ClipboardContent::Bitmap {
                width: image.width as u32,
                height: image.height as u32,
                rgba: image.bytes.into_owned(),
            });
        }
        Err(e) => log::debug!("{} no bitmap on clipboard: {}", LOG_TAG_CLIPBOARD, e),
    }

    match clipboard.get_text() {
        Ok(text) if !text.trim().is_empty() => Ok(ClipboardContent::Text(text)),
        Ok(_) => Ok(ClipboardContent::Empty),
        Err(arboard::Error::ContentNotAvailable) => Ok(ClipboardContent::Empty),
        Err(e) => {
            log::debug!("{} no text on clipboard: {}", LOG_TAG_CLIPBOARD, e);
            Ok(ClipboardContent::Empty)
        }
    }
}

/// Opens its value on first use and keeps it; a failed open is retried on the next call.
struct RetainedHandle<T> {
    slot: Mutex<Option<T>>,
    open: fn() -> Result<T>,
}

impl<T> RetainedHandle<T> {
    fn new(open: fn() -> Result<T>) -> Self {
        Self {
            slot: Mutex::new(None),
            open,
        }
    }

    fn with<R>(&self, operation: impl FnOnce(&mut T) -> Result<R>) -> Result<R> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("Clipboard handle lock poisoned"))?;

        if slot.is_none() {
            *slot = Some((self.open)()?);
        }

        match slot.as_mut() {
            Some(value) => operation(value),
            None => anyhow::bail!("Clipboard handle unavailable"),
        }
    }
}
