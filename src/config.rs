use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app::Theme;

/// Environment variable overriding the store file location.
pub const STORE_PATH_ENV: &str = "SPLITPAD_STORE";

/// User-tunable settings, stored as JSON under the `app-config` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub auto_process: bool,
    pub debounce_ms: u64,
    pub max_input_length: usize,
    pub show_line_numbers: bool,
    pub enable_spell_check: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_process: true,
            debounce_ms: 300,
            max_input_length: 50_000,
            show_line_numbers: false,
            enable_spell_check: true,
        }
    }
}

impl Config {
    /// Shallow merge: every field present in `patch` overwrites ours.
    pub fn merge(&mut self, patch: &ConfigPatch) {
        if let Some(v) = patch.auto_process {
            self.auto_process = v;
        }
        if let Some(v) = patch.debounce_ms {
            self.debounce_ms = v;
        }
        if let Some(v) = patch.max_input_length {
            self.max_input_length = v;
        }
        if let Some(v) = patch.show_line_numbers {
            self.show_line_numbers = v;
        }
        if let Some(v) = patch.enable_spell_check {
            self.enable_spell_check = v;
        }
    }
}

/// A partial [`Config`]. Unknown keys are ignored when deserializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_process: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_input_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_line_numbers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_spell_check: Option<bool>,
}

impl From<Config> for ConfigPatch {
    fn from(config: Config) -> Self {
        Self {
            auto_process: Some(config.auto_process),
            debounce_ms: Some(config.debounce_ms),
            max_input_length: Some(config.max_input_length),
            show_line_numbers: Some(config.show_line_numbers),
            enable_spell_check: Some(config.enable_spell_check),
        }
    }
}

/// Values edited together in the settings dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsForm {
    pub theme: Theme,
    pub panel_ratio: i64,
    pub max_input_length: usize,
    pub auto_process: bool,
    pub enable_spell_check: bool,
    pub debounce_ms: u64,
}

impl Default for SettingsForm {
    fn default() -> Self {
        let config = Config::default();
        Self {
            theme: Theme::default(),
            panel_ratio: 50,
            max_input_length: config.max_input_length,
            auto_process: config.auto_process,
            enable_spell_check: config.enable_spell_check,
            debounce_ms: config.debounce_ms,
        }
    }
}

impl SettingsForm {
    /// The config fields this form edits.
    pub const fn config_patch(&self) -> ConfigPatch {
        ConfigPatch {
            auto_process: Some(self.auto_process),
            debounce_ms: Some(self.debounce_ms),
            max_input_length: Some(self.max_input_length),
            show_line_numbers: None,
            enable_spell_check: Some(self.enable_spell_check),
        }
    }
}

/// Location of the persisted store file.
///
/// `SPLITPAD_STORE` wins when set; otherwise the platform data directory.
pub fn default_store_path() -> PathBuf {
    if let Some(path) = std::env::var_os(STORE_PATH_ENV) {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("splitpad").join("store.json");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("splitpad")
                .join("store.json");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("splitpad").join("store.json");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("splitpad")
                .join("store.json");
        }
    }

    PathBuf::from(".splitpad.json")
}
