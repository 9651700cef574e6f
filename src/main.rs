#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod adapters;
mod app;
mod core;
mod global_constants;
mod ports;
mod presentation;
mod utils;

use iced::daemon;

use crate::adapters::TesseractOcrService;
use crate::core::models::UserSettings;
use crate::global_constants::APPLICATION_NAME;

fn main() -> iced::Result {
    env_logger::init();

    log::info!("[MAIN] Starting {}", APPLICATION_NAME);

    let lock_file_path = utils::lock_file_path();
    if !utils::ensure_single_instance(&lock_file_path) {
        log::error!("[MAIN] Failed to ensure single instance");
    }

    let settings = UserSettings::load().unwrap_or_else(|e| {
        log::warn!("[MAIN] Failed to load settings: {:#}, using defaults", e);
        UserSettings::default()
    });

    // PATH is edited here, before the UI runtime spawns any thread.
    match settings.resolve_tesseract_command() {
        Some(command) => {
            if let Err(e) = TesseractOcrService::expose_engine_directory(&command) {
                log::warn!("[MAIN] Could not use Tesseract at {:?}: {:#}", command, e);
            }
        }
        None => log::info!("[MAIN] No Tesseract location configured, relying on PATH"),
    }

    #[cfg(target_os = "macos")]
    {
        use tray_icon::TrayIconEvent;
        TrayIconEvent::set_event_handler(Some(|_event| {}));
    }

    let result = daemon(
        move || app::ImageToTextApp::build(settings.clone()),
        app::ImageToTextApp::handle_update,
        app::ImageToTextApp::render_view,
    )
    .title(app::ImageToTextApp::window_title)
    .subscription(app::ImageToTextApp::handle_subscription)
    .run();

    utils::release_single_instance(&lock_file_path);
    log::info!("[MAIN] Shut down");
    result
}
