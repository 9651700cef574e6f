use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::models::HotkeyBinding;
use crate::global_constants;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "Dark"),
            ThemeMode::Light => write!(f, "Light"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserSettings {
    pub tesseract_command_path: Option<PathBuf>,
    pub recognition_languages: String,
    pub paste_hotkey: String,
    pub theme_mode: ThemeMode,
    pub start_hidden: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            tesseract_command_path: None,
            recognition_languages: global_constants::DEFAULT_RECOGNITION_LANGUAGES.to_string(),
            paste_hotkey: global_constants::DEFAULT_PASTE_HOTKEY.to_string(),
            theme_mode: ThemeMode::default(),
            start_hidden: false,
        }
    }
}

impl UserSettings {
    pub fn load() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_file_path()?;
        Self::load_from(&settings_path)
    }

    pub fn load_from(settings_path: &Path) -> anyhow::Result<Self> {
        if !settings_path.exists() {
            log::info!("[SETTINGS] No settings file found, using defaults");
            let default_settings = Self::default();
            default_settings.save_to(settings_path)?;
            return Ok(default_settings);
        }

        let contents = std::fs::read_to_string(settings_path)?;
        let settings: UserSettings = serde_json::from_str(&contents)?;

        log::info!("[SETTINGS] Loaded settings from {:?}", settings_path);
        log::debug!(
            "[SETTINGS] Recognition languages: {}",
            settings.recognition_languages
        );
        log::debug!("[SETTINGS] Paste hotkey: {}", settings.paste_hotkey);

        Ok(settings)
    }

    pub fn save_to(&self, settings_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(settings_path, contents)?;

        log::info!("[SETTINGS] Saved settings to {:?}", settings_path);
        Ok(())
    }

    /// Falls back to the default binding when the configured one does not parse.
    pub fn paste_hotkey_binding(&self) -> HotkeyBinding {
        match HotkeyBinding::parse(&self.paste_hotkey) {
            Ok(binding) => binding,
            Err(e) => {
                log::warn!(
                    "[SETTINGS] Invalid paste hotkey '{}': {}, using {}",
                    self.paste_hotkey,
                    e,
                    global_constants::DEFAULT_PASTE_HOTKEY
                );
                Self::default_paste_hotkey_binding()
            }
        }
    }

    fn default_paste_hotkey_binding() -> HotkeyBinding {
        HotkeyBinding {
            ctrl: true,
            alt: true,
            shift: false,
            meta: false,
            key: 'V',
        }
    }

    /// The configured engine binary, or the platform's usual install location if it exists.
    pub fn resolve_tesseract_command(&self) -> Option<PathBuf> {
        if let Some(path) = &self.tesseract_command_path {
            return Some(path.clone());
        }

        let default_path = PathBuf::from(global_constants::DEFAULT_TESSERACT_PATH);
        if default_path.exists() {
            Some(default_path)
        } else {
            None
        }
    }

    fn get_settings_file_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::APPLICATION_DIR_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }
}
