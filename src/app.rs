use std::sync::Arc;

use iced::window::{self, Id};
use iced::{event, keyboard, Event};
use iced::{Element, Subscription, Task};

use crate::adapters::{ClipboardLogSink, TesseractOcrService, UnavailableOcrService};
use crate::core::interfaces::adapters::OcrService;
use crate::core::interfaces::ports::ClipboardPort;
use crate::core::models::{HotkeyBinding, UserSettings};
use crate::core::orchestrators::app_orchestrator::{AppOrchestrator, OrchestratorMessage};
use crate::core::services::{ImageSourceResolver, TempImageSlot};
use crate::global_constants::{
    HOTKEY_CLIPBOARD_FILE_NAME, INTERACTIVE_CLIPBOARD_FILE_NAME, LOG_TAG_APP,
};
use crate::ports::{ArboardClipboard, GlobalKeyboardListener, SystemTray, TrayPresence};
use crate::presentation::shortcut_for;

pub struct ImageToTextApp {
    orchestrator: AppOrchestrator,
    paste_hotkey: HotkeyBinding,
    tray: Option<TrayPresence>,
}

impl ImageToTextApp {
    pub fn build(settings: UserSettings) -> (Self, Task<OrchestratorMessage>) {
        log::info!("{} Initializing application", LOG_TAG_APP);

        let paste_hotkey = settings.paste_hotkey_binding();
        let languages = settings.recognition_languages.clone();

        let clipboard: Arc<dyn ClipboardPort> = Arc::new(ArboardClipboard::initialize());

        let image_source = Arc::new(ImageSourceResolver::build(
            Arc::clone(&clipboard),
            TempImageSlot::for_current_process(INTERACTIVE_CLIPBOARD_FILE_NAME),
        ));
        let hotkey_image_source = Arc::new(ImageSourceResolver::build(
            Arc::clone(&clipboard),
            TempImageSlot::for_current_process(HOTKEY_CLIPBOARD_FILE_NAME),
        ));
        let hotkey_sink = Arc::new(ClipboardLogSink::build(Arc::clone(&clipboard)));

        let orchestrator = AppOrchestrator::build(
            Arc::new(UnavailableOcrService::new("OCR engine is still starting")),
            image_source,
            hotkey_image_source,
            hotkey_sink,
            clipboard,
            settings,
        );

        let tray = match SystemTray::start() {
            Ok(tray) => {
                log::info!("{} System tray initialized successfully", LOG_TAG_APP);
                Some(tray)
            }
            Err(e) => {
                log::error!("{} Failed to initialize system tray: {:#}", LOG_TAG_APP, e);
                None
            }
        };

        let tasks = vec![
            Task::future(async move {
                let built = tokio::task::spawn_blocking(move || TesseractOcrService::build(&languages))
                    .await
                    .map_err(anyhow::Error::from)
                    .and_then(|result| result);

                match built {
                    Ok(service) => {
                        log::info!("{} Tesseract OCR service initialized successfully", LOG_TAG_APP);
                        OrchestratorMessage::OcrServiceReady(Arc::new(service) as Arc<dyn OcrService>)
                    }
                    Err(e) => {
                        log::error!("{} Failed to initialize Tesseract OCR service: {:#}", LOG_TAG_APP, e);
                        OrchestratorMessage::OcrServiceFailed(format!("{:#}", e))
                    }
                }
            }),
            Task::done(OrchestratorMessage::OpenMainWindow),
        ];

        (
            Self {
                orchestrator,
                paste_hotkey,
                tray,
            },
            Task::batch(tasks),
        )
    }

    pub fn handle_update(&mut self, message: OrchestratorMessage) -> Task<OrchestratorMessage> {
        self.orchestrator.update(message)
    }

    pub fn render_view(&self, window_id: Id) -> Element<'_, OrchestratorMessage> {
        self.orchestrator.render_view(window_id)
    }

    pub fn window_title(&self, window_id: Id) -> String {
        self.orchestrator.get_window_title(window_id)
    }

    pub fn handle_subscription(&self) -> Subscription<OrchestratorMessage> {
        let mut subscriptions = vec![
            Subscription::run_with(
                self.paste_hotkey,
                GlobalKeyboardListener::create_event_stream,
            )
            .map(OrchestratorMessage::Keyboard),
            window::close_requests().map(OrchestratorMessage::WindowCloseRequested),
            event::listen_with(|event, _status, id| match event {
                Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                    shortcut_for(&key, modifiers).map(|message| OrchestratorMessage::Shortcut(id, message))
                }
                _ => None,
            }),
        ];

        if self.tray.is_some() {
            subscriptions.push(
                Subscription::run(SystemTray::create_event_stream).map(OrchestratorMessage::TrayEvent),
            );
        }

        Subscription::batch(subscriptions)
    }
}
