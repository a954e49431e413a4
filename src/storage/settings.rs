//! Settings storage
//!
//! Loads the client settings (backend location, alert behaviour) from the data directory.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the configured backend URL
pub const BASE_URL_ENV: &str = "CAREBOOK_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Origin of the REST backend, without trailing slash
    pub base_url: String,
    /// Seconds before a transient alert is dismissed (1 - 60)
    #[serde(default = "default_alert_dismiss_secs")]
    pub alert_dismiss_secs: u64,
    /// Per-request timeout; `None` lets slow requests resolve whenever they do
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_alert_dismiss_secs() -> u64 {
    5
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            alert_dismiss_secs: default_alert_dismiss_secs(),
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    /// Validate settings values
    pub fn validate(&mut self) {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = if trimmed.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };

        self.alert_dismiss_secs = self.alert_dismiss_secs.clamp(1, 60);

        if self.request_timeout_secs == Some(0) {
            self.request_timeout_secs = None;
        }
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::info!("Using backend URL from {}", BASE_URL_ENV);
                self.base_url = url;
            }
        }
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted.
/// Environment overrides are applied either way.
pub fn load_settings() -> ClientSettings {
    let mut settings = match load_settings_internal() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            ClientSettings::default()
        }
    };
    settings.apply_env();
    settings.validate();
    settings
}

fn load_settings_internal() -> Result<ClientSettings, StorageError> {
    let path = get_settings_path()?;

    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(ClientSettings::default());
    }

    let json = fs::read_to_string(&path)?;
    let settings: ClientSettings = serde_json::from_str(&json)?;

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}
