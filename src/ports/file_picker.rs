use std::path::PathBuf;

use crate::global_constants::{
    FILE_DIALOG_FILTER_NAME, FILE_DIALOG_TITLE, SUPPORTED_IMAGE_EXTENSIONS,
};

/// Shows the native open dialog filtered to supported images; `None` when cancelled.
pub async fn pick_image_file() -> Option<PathBuf> {
    log::debug!("[FILE_PICKER] Opening image file dialog");

    let picked = rfd::AsyncFileDialog::new()
        .set_title(FILE_DIALOG_TITLE)
        .add_filter(FILE_DIALOG_FILTER_NAME, &SUPPORTED_IMAGE_EXTENSIONS)
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf());

    match &picked {
        Some(path) => log::info!("[FILE_PICKER] Picked {:?}", path),
        None => log::debug!("[FILE_PICKER] Dialog cancelled"),
    }

    picked
}
