use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::text;
use iced::window::{self, Id};
use iced::{Element, Size, Task};

use crate::adapters::UnavailableOcrService;
use crate::core::errors::OcrAppError;
use crate::core::interfaces::adapters::{OcrService, ResultSink};
use crate::core::interfaces::ports::ClipboardPort;
use crate::core::models::{ImageHandle, RecognitionOutcome, UserSettings, WindowVisibility};
use crate::core::services::{pipeline, ImageSourceResolver, RecognitionInvoker};
use crate::global_constants::{
    APPLICATION_TITLE, PROMPT_SELECT_IMAGE_FIRST, STATUS_INITIALIZING_OCR, STATUS_READY,
};
use crate::ports::{pick_image_file, GlobalKeyboardEvent, TrayEvent};
use crate::presentation::{MainWindowMessage, MainWindowView};

pub struct AppOrchestrator {
    recognition_invoker: RecognitionInvoker,
    image_source: Arc<ImageSourceResolver>,
    hotkey_image_source: Arc<ImageSourceResolver>,
    hotkey_sink: Arc<dyn ResultSink>,
    clipboard: Arc<dyn ClipboardPort>,
    settings: UserSettings,
    main_window_id: Option<Id>,
    visibility: WindowVisibility,
    main_view: MainWindowView,
    current_image: Option<ImageHandle>,
    next_generation: u64,
    pending_recognition: Option<u64>,
    is_hotkey_running: bool,
}

#[derive(Clone)]
pub enum OrchestratorMessage {
    OpenMainWindow,
    MainWindow(MainWindowMessage),
    Shortcut(Id, MainWindowMessage),
    ImageFilePicked(Option<PathBuf>),
    ImageResolved(Result<ImageHandle, OcrAppError>),
    RecognitionFinished(u64, RecognitionOutcome),
    OcrServiceReady(Arc<dyn OcrService>),
    OcrServiceFailed(String),
    Keyboard(GlobalKeyboardEvent),
    HotkeyRecognitionFinished(RecognitionOutcome),
    TrayEvent(TrayEvent),
    WindowCloseRequested(Id),
    ShowMainWindow,
    HideMainWindow,
    Quit,
}

impl std::fmt::Debug for OrchestratorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorMessage::OpenMainWindow => write!(f, "OpenMainWindow"),
            OrchestratorMessage::MainWindow(message) => write!(f, "MainWindow({:?})", message),
            OrchestratorMessage::Shortcut(id, message) => {
                write!(f, "Shortcut({:?}, {:?})", id, message)
            }
            OrchestratorMessage::ImageFilePicked(path) => write!(f, "ImageFilePicked({:?})", path),
            OrchestratorMessage::ImageResolved(result) => {
                write!(f, "ImageResolved({:?})", result.as_ref().map(|h| h.origin()))
            }
            OrchestratorMessage::RecognitionFinished(generation, outcome) => write!(
                f,
                "RecognitionFinished({}, {:?})",
                generation,
                outcome.is_ok()
            ),
            OrchestratorMessage::OcrServiceReady(_) => write!(f, "OcrServiceReady"),
            OrchestratorMessage::OcrServiceFailed(e) => write!(f, "OcrServiceFailed({})", e),
            OrchestratorMessage::Keyboard(event) => write!(f, "Keyboard({:?})", event),
            OrchestratorMessage::HotkeyRecognitionFinished(outcome) => {
                write!(f, "HotkeyRecognitionFinished({:?})", outcome.is_ok())
            }
            OrchestratorMessage::TrayEvent(event) => write!(f, "TrayEvent({:?})", event),
            OrchestratorMessage::WindowCloseRequested(id) => {
                write!(f, "WindowCloseRequested({:?})", id)
            }
            OrchestratorMessage::ShowMainWindow => write!(f, "ShowMainWindow"),
            OrchestratorMessage::HideMainWindow => write!(f, "HideMainWindow"),
            OrchestratorMessage::Quit => write!(f, "Quit"),
        }
    }
}

impl AppOrchestrator {
    pub fn build(
        ocr_service: Arc<dyn OcrService>,
        image_source: Arc<ImageSourceResolver>,
        hotkey_image_source: Arc<ImageSourceResolver>,
        hotkey_sink: Arc<dyn ResultSink>,
        clipboard: Arc<dyn ClipboardPort>,
        settings: UserSettings,
    ) -> Self {
        let visibility = if settings.start_hidden {
            WindowVisibility::Hidden
        } else {
            WindowVisibility::Visible
        };

        Self {
            recognition_invoker: RecognitionInvoker::build(ocr_service),
            image_source,
            hotkey_image_source,
            hotkey_sink,
            clipboard,
            main_view: MainWindowView::build(settings.theme_mode.clone(), STATUS_INITIALIZING_OCR),
            settings,
            main_window_id: None,
            visibility,
            current_image: None,
            next_generation: 0,
            pending_recognition: None,
            is_hotkey_running: false,
        }
    }

    pub fn get_window_title(&self, _window: Id) -> String {
        APPLICATION_TITLE.to_string()
    }

    #[cfg(test)]
    pub fn has_image(&self) -> bool {
        self.current_image.is_some()
    }

    pub fn update(&mut self, message: OrchestratorMessage) -> Task<OrchestratorMessage> {
        log::info!("[ORCHESTRATOR] Received message: {:?}", message);

        match message {
            OrchestratorMessage::OpenMainWindow => self.handle_open_main_window(),
            OrchestratorMessage::MainWindow(window_msg) => self.handle_main_window_message(window_msg),
            OrchestratorMessage::Shortcut(window_id, window_msg) => {
                self.handle_shortcut(window_id, window_msg)
            }
            OrchestratorMessage::ImageFilePicked(path) => self.handle_image_file_picked(path),
            OrchestratorMessage::ImageResolved(result) => self.handle_image_resolved(result),
            OrchestratorMessage::RecognitionFinished(generation, outcome) => {
                self.handle_recognition_finished(generation, outcome)
            }
            OrchestratorMessage::OcrServiceReady(service) => self.handle_ocr_service_ready(service),
            OrchestratorMessage::OcrServiceFailed(error) => self.handle_ocr_service_failed(error),
            OrchestratorMessage::Keyboard(GlobalKeyboardEvent::PasteHotkeyPressed) => {
                self.handle_paste_hotkey()
            }
            OrchestratorMessage::Keyboard(GlobalKeyboardEvent::ListenerFailed(error)) => {
                log::error!("[ORCHESTRATOR] Global hotkey disabled: {}", error);
                self.main_view.set_status(error.to_string());
                Task::none()
            }
            OrchestratorMessage::HotkeyRecognitionFinished(outcome) => {
                self.handle_hotkey_recognition_finished(outcome)
            }
            OrchestratorMessage::TrayEvent(event) => self.handle_tray_event(event),
            OrchestratorMessage::WindowCloseRequested(id) => self.handle_window_close_requested(id),
            OrchestratorMessage::ShowMainWindow => self.handle_show_main_window(),
            OrchestratorMessage::HideMainWindow => self.handle_hide_main_window(),
            OrchestratorMessage::Quit => self.handle_quit(),
        }
    }

    pub fn render_view(&self, window_id: Id) -> Element<'_, OrchestratorMessage> {
        if Some(window_id) == self.main_window_id {
            self.main_view.render_ui().map(OrchestratorMessage::MainWindow)
        } else {
            text("Loading...").into()
        }
    }

    fn handle_main_window_message(&mut self, message: MainWindowMessage) -> Task<OrchestratorMessage> {
        match message {
            MainWindowMessage::SelectImage => {
                log::info!("[ORCHESTRATOR] Opening file picker");
                Task::perform(pick_image_file(), OrchestratorMessage::ImageFilePicked)
            }
            MainWindowMessage::ImportFromClipboard => self.handle_import_from_clipboard(),
            MainWindowMessage::ClearImage => self.handle_clear_image(),
            MainWindowMessage::Recognize => self.handle_recognize(),
            MainWindowMessage::CopyResult => self.handle_copy_result(),
            MainWindowMessage::ResultEdited(action) => {
                self.main_view.apply_edit(action);
                Task::none()
            }
        }
    }

    fn handle_shortcut(
        &mut self,
        window_id: Id,
        message: MainWindowMessage,
    ) -> Task<OrchestratorMessage> {
        if Some(window_id) != self.main_window_id || !self.visibility.is_visible() {
            return Task::none();
        }
        self.handle_main_window_message(message)
    }

    fn handle_open_main_window(&mut self) -> Task<OrchestratorMessage> {
        if self.main_window_id.is_some() {
            log::warn!("[ORCHESTRATOR] Main window already exists, showing it");
            return self.handle_show_main_window();
        }

        let (id, task) = window::open(window::Settings {
            size: Size::new(800.0, 650.0),
            position: window::Position::Centered,
            visible: self.visibility.is_visible(),
            exit_on_close_request: false,
            ..Default::default()
        });

        self.main_window_id = Some(id);
        log::info!(
            "[ORCHESTRATOR] Main window created with ID: {:?} ({:?})",
            id,
            self.visibility
        );
        task.discard()
    }

    fn handle_image_file_picked(&mut self, path: Option<PathBuf>) -> Task<OrchestratorMessage> {
        let Some(path) = path else {
            log::debug!("[ORCHESTRATOR] No file picked, keeping current image");
            return Task::none();
        };

        self.main_view.set_status(format!("Loading {}...", path.display()));
        let resolver = Arc::clone(&self.image_source);

        Task::future(async move {
            let failed_path = path.clone();
            let result = tokio::task::spawn_blocking(move || resolver.from_file(&path))
                .await
                .unwrap_or_else(|e| Err(OcrAppError::unreadable_file(failed_path, e)));
            OrchestratorMessage::ImageResolved(result)
        })
    }

    fn handle_import_from_clipboard(&mut self) -> Task<OrchestratorMessage> {
        log::info!("[ORCHESTRATOR] Importing image from clipboard");
        self.main_view.set_status("Reading clipboard...");
        let resolver = Arc::clone(&self.image_source);

        Task::future(async move {
            let result = tokio::task::spawn_blocking(move || resolver.from_clipboard())
                .await
                .unwrap_or_else(|e| Err(OcrAppError::ClipboardUnavailable(e.to_string())));
            OrchestratorMessage::ImageResolved(result)
        })
    }

    fn handle_image_resolved(
        &mut self,
        result: Result<ImageHandle, OcrAppError>,
    ) -> Task<OrchestratorMessage> {
        match result {
            Ok(handle) => {
                self.next_generation += 1;
                let handle = handle.with_generation(self.next_generation);
                log::info!("[ORCHESTRATOR] Image ready: {:?}", handle);

                self.main_view.show_preview(&handle);
                self.main_view.clear_result();
                self.main_view
                    .set_status(format!("Loaded {}", handle.source_path().display()));
                self.replace_current_image(handle);
            }
            Err(e) => {
                log::warn!("[ORCHESTRATOR] Image import failed: {}", e);
                self.main_view.set_result_text(&e.to_string());
                self.main_view.set_status("Image import failed");
            }
        }
        Task::none()
    }

    /// The slot file is shared by successive clipboard imports, so it is only
    /// removed when the new image does not live in it.
    fn replace_current_image(&mut self, handle: ImageHandle) {
        if let Some(previous) = self.current_image.take() {
            if previous.backing_temp_file() != handle.backing_temp_file() {
                self.image_source.clear(previous);
            }
        }
        self.current_image = Some(handle);
    }

    fn handle_clear_image(&mut self) -> Task<OrchestratorMessage> {
        log::info!("[ORCHESTRATOR] Clearing current image");
        if let Some(handle) = self.current_image.take() {
            self.image_source.clear(handle);
        }
        self.main_view.clear_preview();
        self.main_view.clear_result();
        self.main_view.set_status(STATUS_READY);
        Task::none()
    }

    fn handle_recognize(&mut self) -> Task<OrchestratorMessage> {
        let Some(job) = self.begin_recognition() else {
            return Task::none();
        };
        let generation = job.generation;

        Task::future(async move {
            tokio::task::spawn_blocking(move || job.run())
                .await
                .unwrap_or_else(|e| {
                    OrchestratorMessage::RecognitionFinished(
                        generation,
                        Err(OcrAppError::RecognitionFailed(format!(
                            "recognition task aborted: {}",
                            e
                        ))),
                    )
                })
        })
    }

    fn begin_recognition(&mut self) -> Option<RecognitionJob> {
        let Some(handle) = self.current_image.clone() else {
            log::info!("[ORCHESTRATOR] Recognize requested without an image");
            self.main_view.set_result_text(PROMPT_SELECT_IMAGE_FIRST);
            return None;
        };

        if let Some(generation) = self.pending_recognition {
            log::warn!(
                "[ORCHESTRATOR] Recognition for image #{} still running, ignoring request",
                generation
            );
            return None;
        }

        let generation = handle.generation();
        self.pending_recognition = Some(generation);
        self.main_view.set_recognizing(true);
        self.main_view.set_status("Recognizing text...");
        log::info!("[ORCHESTRATOR] Starting recognition for image #{}", generation);

        Some(RecognitionJob {
            generation,
            invoker: self.recognition_invoker.clone(),
            handle,
        })
    }

    fn handle_recognition_finished(
        &mut self,
        generation: u64,
        outcome: RecognitionOutcome,
    ) -> Task<OrchestratorMessage> {
        self.pending_recognition = None;
        self.main_view.set_recognizing(false);

        let current_generation = self.current_image.as_ref().map(ImageHandle::generation);
        if current_generation != Some(generation) {
            log::info!(
                "[ORCHESTRATOR] Dropping result for image #{}, current image is {:?}",
                generation,
                current_generation
            );
            self.main_view.set_status(STATUS_READY);
            return Task::none();
        }

        self.show_in_panel(outcome);
        Task::none()
    }

    fn show_in_panel(&mut self, outcome: RecognitionOutcome) {
        match outcome {
            Ok(recognized) => {
                log::info!(
                    "[ORCHESTRATOR] Showing {} recognized characters",
                    recognized.chars().count()
                );
                self.main_view.set_result_text(&recognized);
                self.main_view.set_status("Recognition complete");
            }
            Err(e) => {
                log::error!("[ORCHESTRATOR] Recognition failed: {}", e);
                self.main_view.set_result_text(&e.to_string());
                self.main_view.set_status("Recognition failed");
            }
        }
    }

    fn handle_copy_result(&mut self) -> Task<OrchestratorMessage> {
        let result_text = self.main_view.result_text();
        if result_text.trim().is_empty() {
            self.main_view.set_status("Nothing to copy");
            return Task::none();
        }

        match self.clipboard.write_text(result_text.trim_end()) {
            Ok(()) => self.main_view.set_status("Result copied to clipboard"),
            Err(e) => {
                log::error!("[ORCHESTRATOR] Failed to copy result: {:#}", e);
                self.main_view.set_status(format!("Failed to copy result: {}", e));
            }
        }
        Task::none()
    }

    fn handle_ocr_service_ready(&mut self, service: Arc<dyn OcrService>) -> Task<OrchestratorMessage> {
        log::info!("[ORCHESTRATOR] OCR service is ready");
        self.recognition_invoker = RecognitionInvoker::build(service);
        self.main_view.set_status(format!(
            "{} - press {} to recognize the clipboard",
            STATUS_READY,
            self.settings.paste_hotkey_binding()
        ));
        Task::none()
    }

    fn handle_ocr_service_failed(&mut self, error: String) -> Task<OrchestratorMessage> {
        log::error!("[ORCHESTRATOR] OCR service initialization failed: {}", error);
        self.recognition_invoker =
            RecognitionInvoker::build(Arc::new(UnavailableOcrService::new(error.clone())));
        self.main_view
            .set_status(format!("OCR engine unavailable: {}", error));
        Task::none()
    }

    fn handle_paste_hotkey(&mut self) -> Task<OrchestratorMessage> {
        if self.is_hotkey_running {
            log::warn!("[ORCHESTRATOR] Hotkey recognition already running, ignoring");
            return Task::none();
        }

        log::info!("[ORCHESTRATOR] Paste hotkey pressed, recognizing clipboard in background");
        self.is_hotkey_running = true;

        let resolver = Arc::clone(&self.hotkey_image_source);
        let invoker = self.recognition_invoker.clone();
        let sink = Arc::clone(&self.hotkey_sink);

        Task::future(async move {
            let outcome = tokio::task::spawn_blocking(move || {
                pipeline::acquire_recognize_deliver(&resolver, &invoker, sink.as_ref())
            })
            .await
            .unwrap_or_else(|e| {
                Err(OcrAppError::RecognitionFailed(format!(
                    "hotkey task aborted: {}",
                    e
                )))
            });
            OrchestratorMessage::HotkeyRecognitionFinished(outcome)
        })
    }

    fn handle_hotkey_recognition_finished(
        &mut self,
        outcome: RecognitionOutcome,
    ) -> Task<OrchestratorMessage> {
        self.is_hotkey_running = false;
        match outcome {
            Ok(recognized) => self.main_view.set_status(format!(
                "Hotkey: copied {} characters to clipboard",
                recognized.chars().count()
            )),
            Err(e) => self.main_view.set_status(format!("Hotkey: {}", e)),
        }
        Task::none()
    }

    fn handle_tray_event(&mut self, event: TrayEvent) -> Task<OrchestratorMessage> {
        log::info!("[ORCHESTRATOR] Handling tray event: {:?}", event);

        match event {
            TrayEvent::ShowWindow => self.handle_show_main_window(),
            TrayEvent::Quit => self.handle_quit(),
        }
    }

    fn handle_window_close_requested(&mut self, id: Id) -> Task<OrchestratorMessage> {
        if Some(id) == self.main_window_id {
            log::info!("[ORCHESTRATOR] Main window close requested, hiding to system tray");
            return self.handle_hide_main_window();
        }

        log::debug!("[ORCHESTRATOR] Closing untracked window {:?}", id);
        window::close(id)
    }

    fn handle_show_main_window(&mut self) -> Task<OrchestratorMessage> {
        self.visibility = WindowVisibility::Visible;

        match self.main_window_id {
            Some(id) => {
                log::info!("[ORCHESTRATOR] Showing main window");
                Task::batch(vec![
                    window::set_mode(id, window::Mode::Windowed),
                    window::gain_focus(id),
                ])
            }
            None => self.handle_open_main_window(),
        }
    }

    fn handle_hide_main_window(&mut self) -> Task<OrchestratorMessage> {
        log::info!("[ORCHESTRATOR] Hiding main window");
        self.visibility = WindowVisibility::Hidden;

        match self.main_window_id {
            Some(id) => window::set_mode(id, window::Mode::Hidden),
            None => Task::none(),
        }
    }

    fn handle_quit(&mut self) -> Task<OrchestratorMessage> {
        log::info!("[ORCHESTRATOR] Quit requested from tray");
        if let Some(handle) = self.current_image.take() {
            self.image_source.clear(handle);
        }
        iced::exit()
    }
}

/// Blocking half of a window recognition, run off the UI thread.
struct RecognitionJob {
    generation: u64,
    invoker: RecognitionInvoker,
    handle: ImageHandle,
}

impl RecognitionJob {
    fn run(self) -> OrchestratorMessage {
        let outcome = self.invoker.recognize(&self.handle);
        OrchestratorMessage::RecognitionFinished(self.generation, outcome)
    }
}
