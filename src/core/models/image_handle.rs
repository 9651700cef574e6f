use std::path::{Path, PathBuf};
use std::sync::Arc;

use iced::widget::image as image_widget;
use image::DynamicImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOrigin {
    File(PathBuf),
    ClipboardTemp(PathBuf),
}

/// A decoded image plus where it came from.
///
/// Cloning is cheap: the bitmap and the preview share their pixel buffers.
#[derive(Clone)]
pub struct ImageHandle {
    image: Arc<DynamicImage>,
    preview: image_widget::Handle,
    origin: ImageOrigin,
    generation: u64,
}

impl std::fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageHandle")
            .field("origin", &self.origin)
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("generation", &self.generation)
            .finish()
    }
}

impl ImageHandle {
    pub fn build(image: DynamicImage, origin: ImageOrigin) -> Self {
        log::debug!(
            "[IMAGE_HANDLE] building handle: {}x{} from {:?}",
            image.width(),
            image.height(),
            origin
        );

        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let preview = image_widget::Handle::from_rgba(width, height, rgba.into_raw());

        Self {
            image: Arc::new(image),
            preview,
            origin,
            generation: 0,
        }
    }

    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn preview(&self) -> &image_widget::Handle {
        &self.preview
    }

    pub fn origin(&self) -> &ImageOrigin {
        &self.origin
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn source_path(&self) -> &Path {
        match &self.origin {
            ImageOrigin::File(path) | ImageOrigin::ClipboardTemp(path) => path,
        }
    }

    /// The temp file backing this handle, if the resolver created one.
    pub fn backing_temp_file(&self) -> Option<&Path> {
        match &self.origin {
            ImageOrigin::ClipboardTemp(path) => Some(path),
            ImageOrigin::File(_) => None,
        }
    }
}
