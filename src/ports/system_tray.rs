use std::path::{Path, PathBuf};
#[cfg(any(target_os = "linux", test))]
use std::sync::mpsc::Receiver;

use anyhow::Context;
use iced::futures::{channel::mpsc, SinkExt, Stream, StreamExt};
use iced::stream;
use tray_icon::menu::{Menu, MenuEvent, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

use crate::core::errors::OcrAppError;
use crate::global_constants::{APPLICATION_TITLE, ASSETS_DIR_NAME, TRAY_ICON_FILE_NAME};

const MENU_ID_SHOW_WINDOW: &str = "show_window";
const MENU_ID_QUIT: &str = "quit";

pub struct SystemTray {
    _tray_icon: TrayIcon,
    _menu: Menu,
    _show_window_item: MenuItem,
    _quit_item: MenuItem,
}

/// Keeps the tray alive for as long as it is held. On Linux the tray is owned
/// by its GTK thread instead.
pub struct TrayPresence {
    _local: Option<SystemTray>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayEvent {
    ShowWindow,
    Quit,
}

impl SystemTray {
    /// Must be called on the UI thread; the platform tray APIs require it.
    #[cfg(not(target_os = "linux"))]
    pub fn start() -> anyhow::Result<TrayPresence> {
        Ok(TrayPresence {
            _local: Some(Self::build()?),
        })
    }

    /// The tray menu is a GTK widget, so it gets a thread running its own GTK loop.
    #[cfg(target_os = "linux")]
    pub fn start() -> anyhow::Result<TrayPresence> {
        let (startup_sender, startup_receiver) = std::sync::mpsc::channel();

        std::thread::Builder::new()
            .name("system-tray-gtk".to_string())
            .spawn(move || {
                if let Err(e) = gtk::init() {
                    let _ = startup_sender.send(Err(format!("Failed to initialize GTK: {}", e)));
                    return;
                }

                match Self::build() {
                    Ok(tray) => {
                        let _ = startup_sender.send(Ok(()));
                        log::info!("[SYSTEM_TRAY] Running GTK loop for the tray");
                        gtk::main();
                        drop(tray);
                    }
                    Err(e) => {
                        let _ = startup_sender.send(Err(format!("{:#}", e)));
                    }
                }
            })
            .context("Failed to spawn system tray thread")?;

        await_tray_startup(&startup_receiver)?;
        Ok(TrayPresence { _local: None })
    }

    fn build() -> anyhow::Result<Self> {
        log::info!("[SYSTEM_TRAY] Initializing system tray");

        let icon_path = resolve_icon_path(&icon_search_paths())?;
        let icon_image = image::open(&icon_path)
            .with_context(|| format!("Failed to decode tray icon {:?}", icon_path))?;
        let icon_rgba = icon_image.to_rgba8();
        let (width, height) = icon_rgba.dimensions();

        let icon = Icon::from_rgba(icon_rgba.into_raw(), width, height)?;

        let menu = Menu::new();
        let show_window_item = MenuItem::with_id(MENU_ID_SHOW_WINDOW, "Show Window", true, None);
        let quit_item = MenuItem::with_id(MENU_ID_QUIT, "Quit", true, None);

        menu.append(&show_window_item)?;
        menu.append(&quit_item)?;

        let tray_icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu.clone()))
            .with_tooltip(APPLICATION_TITLE)
            .with_icon(icon)
            .build()?;

        log::info!("[SYSTEM_TRAY] System tray initialized successfully");

        Ok(Self {
            _tray_icon: tray_icon,
            _menu: menu,
            _show_window_item: show_window_item,
            _quit_item: quit_item,
        })
    }

    /// Menu clicks are received on a dedicated thread and forwarded into the UI loop.
    pub fn create_event_stream() -> impl Stream<Item = TrayEvent> {
        stream::channel(
            10,
            |mut output_channel: mpsc::Sender<TrayEvent>| async move {
                let (menu_sender, mut menu_receiver) = mpsc::channel(10);

                Self::spawn_menu_event_thread(menu_sender);

                loop {
                    let menu_id: String = menu_receiver.select_next_some().await;
                    if let Some(event) = TrayEvent::from_menu_id(&menu_id) {
                        let _ = output_channel.send(event).await;
                    }
                }
            },
        )
    }

    fn spawn_menu_event_thread(mut menu_sender: mpsc::Sender<String>) {
        std::thread::spawn(move || {
            log::info!("[SYSTEM_TRAY] Starting tray menu event thread");
            while let Ok(event) = MenuEvent::receiver().recv() {
                log::debug!("[SYSTEM_TRAY] Received menu event: {:?}", event.id);
                if menu_sender.try_send(event.id.0.clone()).is_err() {
                    log::warn!("[SYSTEM_TRAY] Dropped menu event, UI loop is not receiving");
                }
            }
            log::warn!("[SYSTEM_TRAY] Tray menu event channel closed");
        });
    }
}

impl TrayEvent {
    fn from_menu_id(menu_id: &str) -> Option<Self> {
        match menu_id {
            MENU_ID_SHOW_WINDOW => Some(TrayEvent::ShowWindow),
            MENU_ID_QUIT => Some(TrayEvent::Quit),
            other => {
                log::warn!("[SYSTEM_TRAY] Unknown menu event: {}", other);
                None
            }
        }
    }
}

#[cfg(any(target_os = "linux", test))]
fn await_tray_startup(receiver: &Receiver<Result<(), String>>) -> anyhow::Result<()> {
    match receiver.recv() {
        Ok(Ok(())) => Ok(()),
        Ok(Err(detail)) => Err(anyhow::anyhow!(detail)),
        Err(_) => Err(anyhow::anyhow!(
            "System tray thread exited before finishing startup"
        )),
    }
}

/// Where the bundled icon may live: next to the executable, inside a macOS
/// bundle's resources, or in the source tree when run through cargo.
fn icon_search_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(ASSETS_DIR_NAME).join(TRAY_ICON_FILE_NAME));
        candidates.push(
            exe_dir
                .join("..")
                .join("Resources")
                .join(ASSETS_DIR_NAME)
                .join(TRAY_ICON_FILE_NAME),
        );
    }

    candidates.push(
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join(ASSETS_DIR_NAME)
            .join(TRAY_ICON_FILE_NAME),
    );

    candidates
}

fn resolve_icon_path(candidates: &[PathBuf]) -> Result<PathBuf, OcrAppError> {
    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .cloned()
        .ok_or_else(|| OcrAppError::MissingIconResource {
            searched: candidates
                .iter()
                .map(|candidate| candidate.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{unique_test_directory, write_test_image};

    #[test]
    fn test_tray_event_from_menu_id() {
        assert_eq!(
            TrayEvent::from_menu_id(MENU_ID_SHOW_WINDOW),
            Some(TrayEvent::ShowWindow)
        );
        assert_eq!(TrayEvent::from_menu_id(MENU_ID_QUIT), Some(TrayEvent::Quit));
        assert_eq!(TrayEvent::from_menu_id("settings"), None);
    }

    #[test]
    fn test_await_tray_startup_reports_success() {
        let (sender, receiver) = std::sync::mpsc::channel();
        sender.send(Ok(())).unwrap();

        assert!(await_tray_startup(&receiver).is_ok());
    }

    #[test]
    fn test_await_tray_startup_turns_init_failure_into_error() {
        let (sender, receiver) = std::sync::mpsc::channel();
        sender
            .send(Err("Failed to initialize GTK: no display".to_string()))
            .unwrap();

        let error = await_tray_startup(&receiver).unwrap_err();

        assert!(error.to_string().contains("no display"));
    }

    #[test]
    fn test_await_tray_startup_handles_thread_that_died() {
        let (sender, receiver) = std::sync::mpsc::channel::<Result<(), String>>();
        std::thread::spawn(move || drop(sender)).join().unwrap();

        let error = await_tray_startup(&receiver).unwrap_err();

        assert!(error.to_string().contains("exited before finishing startup"));
    }

    #[test]
    fn test_resolve_icon_path_picks_first_existing_candidate() {
        let directory = unique_test_directory("image-to-text-tray");
        let bundled = write_test_image(&directory, "tray_icon.png");
        let candidates = vec![directory.join("missing").join("tray_icon.png"), bundled.clone()];

        assert_eq!(resolve_icon_path(&candidates).unwrap(), bundled);

        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn test_resolve_icon_path_reports_every_searched_location() {
        let candidates = vec![
            PathBuf::from("/nowhere/a/tray_icon.png"),
            PathBuf::from("/nowhere/b/tray_icon.png"),
        ];

        match resolve_icon_path(&candidates) {
            Err(OcrAppError::MissingIconResource { searched }) => {
                assert!(searched.contains("/nowhere/a/tray_icon.png"));
                assert!(searched.contains("/nowhere/b/tray_icon.png"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_source_tree_icon_is_among_search_paths() {
        let expected = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join(ASSETS_DIR_NAME)
            .join(TRAY_ICON_FILE_NAME);

        assert!(icon_search_paths().contains(&expected));
        assert!(expected.is_file());
    }
}
