mod image_source_resolver;
pub mod pipeline;
mod recognition_invoker;
mod temp_image_slot;

pub use image_source_resolver::ImageSourceResolver;
pub use recognition_invoker::RecognitionInvoker;
pub use temp_image_slot::TempImageSlot;
