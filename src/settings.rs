// Import necessary libraries and modules for file I/O and serialization.
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::consts::{API_URL, API_URL_ENV};
use crate::error::SettingsError;

// Define a structure to hold application settings with serialization and deserialization capabilities.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,           // Roster endpoint used for both load and save.
    pub request_timeout_secs: u64, // Upper bound for a single HTTP round trip.
    pub debug_mode: bool,          // Flag to raise the log level to Debug.
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: API_URL.to_string(),
            request_timeout_secs: 10,
            debug_mode: false,
        }
    }
}

pub fn get_game_data_dir() -> Result<PathBuf, SettingsError> {
    let home_dir = dir::home_dir().ok_or(SettingsError::HomeDirNotFound)?;
    Ok(home_dir.join("character_forge").join("data"))
}

pub fn get_settings_path() -> Result<PathBuf, SettingsError> {
    Ok(get_game_data_dir()?.join("settings.json"))
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    // Load settings from the default file path.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_settings_from_file(get_settings_path()?)
    }

    // Save current settings to the default file path.
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to_file(get_settings_path()?)
    }

    /// Settings used at start-up, with the endpoint override from the
    /// environment applied. Runs before logging is installed, so a fallback
    /// to defaults is handed back for the caller to report.
    pub fn load_or_default() -> (Self, Option<SettingsError>) {
        let (settings, error) = match get_settings_path() {
            Ok(path) => Self::load_or_create(path),
            Err(e) => (Self::default(), Some(e)),
        };
        (settings.with_env_override(), error)
    }

    /// Reads the settings file, creating it with the defaults when it does not
    /// exist yet. An unreadable or malformed file is left untouched.
    pub fn load_or_create(path: impl AsRef<Path>) -> (Self, Option<SettingsError>) {
        let path = path.as_ref();
        match Self::load_settings_from_file(path) {
            Ok(settings) => (settings, None),
            Err(SettingsError::IO(e)) if e.kind() == ErrorKind::NotFound => {
                let settings = Self::default();
                let error = settings.save_to_file(path).err();
                (settings, error)
            }
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn load_settings_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let data = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&data)?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }

    pub fn with_env_override(self) -> Self {
        self.with_api_url_override(std::env::var(API_URL_ENV).ok())
    }

    // Blank overrides are ignored.
    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(api_url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.api_url = api_url.trim().to_string();
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
