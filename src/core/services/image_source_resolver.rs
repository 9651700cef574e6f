use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::errors::OcrAppError;
use crate::core::interfaces::ports::ClipboardPort;
use crate::core::models::{ClipboardContent, ImageHandle, ImageOrigin};
use crate::core::services::temp_image_slot::{remove_temp_file, TempImageSlot};
use crate::global_constants::{LOG_TAG_IMAGE_SOURCE, SUPPORTED_IMAGE_EXTENSIONS};

/// Turns a picked file or the clipboard into one decoded [`ImageHandle`].
pub struct ImageSourceResolver {
    clipboard: Arc<dyn ClipboardPort>,
    temp_slot: TempImageSlot,
}

impl ImageSourceResolver {
    pub fn build(clipboard: Arc<dyn ClipboardPort>, temp_slot: TempImageSlot) -> Self {
        log::debug!(
            "{} resolver using temp slot {:?}",
            LOG_TAG_IMAGE_SOURCE,
            temp_slot.path()
        );
        Self {
            clipboard,
            temp_slot,
        }
    }

    pub fn from_file(&self, path: &Path) -> Result<ImageHandle, OcrAppError> {
        log::info!("{} loading image from {:?}", LOG_TAG_IMAGE_SOURCE, path);

        if !is_supported_image_path(path) {
            return Err(OcrAppError::unreadable_file(
                path,
                "unsupported image format (expected png, jpg, jpeg or bmp)",
            ));
        }

        if !path.is_file() {
            return Err(OcrAppError::unreadable_file(path, "file does not exist"));
        }

        let image = image::open(path).map_err(|e| OcrAppError::unreadable_file(path, e))?;

        Ok(ImageHandle::build(
            image,
            ImageOrigin::File(path.to_path_buf()),
        ))
    }

    pub fn from_clipboard(&self) -> Result<ImageHandle, OcrAppError> {
        let content = self
            .clipboard
            .read_content()
            .map_err(|e| OcrAppError::ClipboardUnavailable(format!("{:#}", e)))?;

        log::info!(
            "{} clipboard holds {}",
            LOG_TAG_IMAGE_SOURCE,
            content.describe()
        );

        match content {
            ClipboardContent::FileList(paths) => match first_supported_path(&paths) {
                Some(path) => self.from_file(path),
                None => Err(OcrAppError::EmptyOrUnsupportedClipboard),
            },
            ClipboardContent::Bitmap {
                width,
                height,
                rgba,
            } => self.from_bitmap(width, height, rgba),
            ClipboardContent::Text(text) => {
                let paths: Vec<PathBuf> = paths_from_text(&text)
                    .into_iter()
                    .filter(|path| path.is_file())
                    .collect();
                match first_supported_path(&paths) {
                    Some(path) => self.from_file(path),
                    None => Err(OcrAppError::EmptyOrUnsupportedClipboard),
                }
            }
            ClipboardContent::Empty => Err(OcrAppError::EmptyOrUnsupportedClipboard),
        }
    }

    fn from_bitmap(
        &self,
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    ) -> Result<ImageHandle, OcrAppError> {
        let buffer = image::RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
            log::warn!(
                "{} clipboard bitmap {}x{} has a mismatched pixel buffer",
                LOG_TAG_IMAGE_SOURCE,
                width,
                height
            );
            OcrAppError::EmptyOrUnsupportedClipboard
        })?;

        let image = image::DynamicImage::ImageRgba8(buffer);
        let stored_path = self.temp_slot.store(&image)?;

        Ok(ImageHandle::build(
            image,
            ImageOrigin::ClipboardTemp(stored_path),
        ))
    }

    /// Drops the handle and deletes its backing temp file, if any.
    pub fn clear(&self, handle: ImageHandle) {
        log::debug!("{} clearing {:?}", LOG_TAG_IMAGE_SOURCE, handle);
        if let Some(temp_file) = handle.backing_temp_file() {
            remove_temp_file(temp_file);
        }
    }
}

pub fn is_supported_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| {
            SUPPORTED_IMAGE_EXTENSIONS
                .iter()
                .any(|supported| extension.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

pub fn first_supported_path(paths: &[PathBuf]) -> Option<&PathBuf> {
    paths.iter().find(|path| is_supported_image_path(path))
}

/// File managers put either plain paths or `file://` URIs on the clipboard, one per line.
fn paths_from_text(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match line.strip_prefix("file://") {
            Some(uri_path) => {
                let decoded = urlencoding::decode(uri_path)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| uri_path.to_string());
                PathBuf::from(strip_windows_uri_slash(&decoded))
            }
            None => PathBuf::from(line),
        })
        .collect()
}

fn strip_windows_uri_slash(path: &str) -> &str {
    let bytes = path.as_bytes();
    if cfg!(target_os = "windows") && bytes.len() > 2 && bytes[0] == b'/' && bytes[2] == b':' {
        &path[1..]
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{
        bitmap_content, unique_test_directory, write_test_image, MockClipboard,
    };

    fn resolver_with(content: ClipboardContent, directory: &Path) -> ImageSourceResolver {
        ImageSourceResolver::build(
            Arc::new(MockClipboard::holding(content)),
            TempImageSlot::in_directory(directory, "clipboard_image.png"),
        )
    }

    #[test]
    fn test_is_supported_image_path_accepts_known_extensions_case_insensitively() {
        assert!(is_supported_image_path(Path::new("a.png")));
        assert!(is_supported_image_path(Path::new("a.JPG")));
        assert!(is_supported_image_path(Path::new("a.jpeg")));
        assert!(is_supported_image_path(Path::new("a.Bmp")));
        assert!(!is_supported_image_path(Path::new("a.gif")));
        assert!(!is_supported_image_path(Path::new("README")));
    }

    #[test]
    fn test_first_supported_path_picks_first_match_in_order() {
        let paths = vec![
            PathBuf::from("notes.txt"),
            PathBuf::from("second.jpg"),
            PathBuf::from("third.png"),
        ];

        assert_eq!(
            first_supported_path(&paths),
            Some(&PathBuf::from("second.jpg"))
        );
    }

    #[test]
    fn test_from_file_loads_supported_image() {
        let directory = unique_test_directory("image-to-text-resolver");
        let path = write_test_image(&directory, "photo.png");
        let resolver = resolver_with(ClipboardContent::Empty, &directory);

        let handle = resolver.from_file(&path).unwrap();

        assert_eq!(handle.width(), 6);
        assert_eq!(handle.height(), 3);
        assert_eq!(handle.origin(), &ImageOrigin::File(path));

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_from_file_rejects_unsupported_extension() {
        let directory = unique_test_directory("image-to-text-resolver");
        let path = directory.join("animation.gif");
        std::fs::write(&path, b"GIF89a").unwrap();
        let resolver = resolver_with(ClipboardContent::Empty, &directory);

        let error = resolver.from_file(&path).unwrap_err();

        assert!(matches!(error, OcrAppError::UnreadableFile { .. }));

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_from_file_rejects_missing_file() {
        let directory = unique_test_directory("image-to-text-resolver");
        let resolver = resolver_with(ClipboardContent::Empty, &directory);

        let error = resolver.from_file(&directory.join("missing.png")).unwrap_err();

        assert!(matches!(error, OcrAppError::UnreadableFile { .. }));

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_from_file_rejects_undecodable_file() {
        let directory = unique_test_directory("image-to-text-resolver");
        let path = directory.join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let resolver = resolver_with(ClipboardContent::Empty, &directory);

        let error = resolver.from_file(&path).unwrap_err();

        assert!(matches!(error, OcrAppError::UnreadableFile { .. }));

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_from_clipboard_empty_is_soft_failure() {
        let directory = unique_test_directory("image-to-text-resolver");
        let resolver = resolver_with(ClipboardContent::Empty, &directory);

        let error = resolver.from_clipboard().unwrap_err();

        assert_eq!(error, OcrAppError::EmptyOrUnsupportedClipboard);

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_from_clipboard_file_list_uses_first_supported_entry() {
        let directory = unique_test_directory("image-to-text-resolver");
        let first = write_test_image(&directory, "first.bmp");
        let second = write_test_image(&directory, "second.png");
        let notes = directory.join("notes.txt");
        std::fs::write(&notes, "hello").unwrap();
        let resolver = resolver_with(
            ClipboardContent::FileList(vec![notes, first.clone(), second]),
            &directory,
        );

        let handle = resolver.from_clipboard().unwrap();

        assert_eq!(handle.origin(), &ImageOrigin::File(first));
        assert!(handle.backing_temp_file().is_none());

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_from_clipboard_file_list_without_images_fails() {
        let directory = unique_test_directory("image-to-text-resolver");
        let resolver = resolver_with(
            ClipboardContent::FileList(vec![directory.join("report.pdf")]),
            &directory,
        );

        assert_eq!(
            resolver.from_clipboard().unwrap_err(),
            OcrAppError::EmptyOrUnsupportedClipboard
        );

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_from_clipboard_bitmap_is_persisted_to_temp_slot() {
        let directory = unique_test_directory("image-to-text-resolver");
        let resolver = resolver_with(bitmap_content(5, 2), &directory);

        let handle = resolver.from_clipboard().unwrap();

        let temp_file = handle.backing_temp_file().unwrap().to_path_buf();
        assert_eq!(temp_file, directory.join("clipboard_image.png"));
        assert!(temp_file.exists());
        assert_eq!(handle.width(), 5);
        assert_eq!(handle.height(), 2);

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_from_clipboard_bitmap_with_short_buffer_fails() {
        let directory = unique_test_directory("image-to-text-resolver");
        let resolver = resolver_with(
            ClipboardContent::Bitmap {
                width: 10,
                height: 10,
                rgba: vec![0u8; 12],
            },
            &directory,
        );

        assert_eq!(
            resolver.from_clipboard().unwrap_err(),
            OcrAppError::EmptyOrUnsupportedClipboard
        );
        assert!(!directory.join("clipboard_image.png").exists());

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_from_clipboard_text_with_file_uri_resolves_image() {
        let directory = unique_test_directory("image-to-text-resolver");
        let path = write_test_image(&directory, "scan copy.jpg");
        let uri = format!(
            "file://{}",
            path.to_string_lossy().replace(' ', "%20").replace('\\', "/")
        );
        let resolver = resolver_with(ClipboardContent::Text(uri), &directory);

        let handle = resolver.from_clipboard().unwrap();

        assert_eq!(handle.width(), 6);

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_from_clipboard_plain_text_is_unsupported() {
        let directory = unique_test_directory("image-to-text-resolver");
        let resolver = resolver_with(
            ClipboardContent::Text("just some copied words".to_string()),
            &directory,
        );

        assert_eq!(
            resolver.from_clipboard().unwrap_err(),
            OcrAppError::EmptyOrUnsupportedClipboard
        );

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_clear_removes_temp_file_and_is_idempotent() {
        let directory = unique_test_directory("image-to-text-resolver");
        let resolver = resolver_with(bitmap_content(3, 3), &directory);
        let handle = resolver.from_clipboard().unwrap();
        let temp_file = handle.backing_temp_file().unwrap().to_path_buf();

        resolver.clear(handle.clone());
        resolver.clear(handle);

        assert!(!temp_file.exists());

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_clear_never_deletes_user_files() {
        let directory = unique_test_directory("image-to-text-resolver");
        let path = write_test_image(&directory, "photo.png");
        let resolver = resolver_with(ClipboardContent::Empty, &directory);
        let handle = resolver.from_file(&path).unwrap();

        resolver.clear(handle);

        assert!(path.exists());

        std::fs::remove_dir_all(&directory).ok();
    }
}
