//! User settings for tally
//!
//! Manages the backend address, display locale, and filtering preferences.
//! Every field carries a serde default so older or hand-written config files
//! keep loading.

use serde::{Deserialize, Serialize};

use super::paths::TallyPaths;
use crate::display::format::DisplayLocale;
use crate::error::TallyError;
use crate::models::{AverageDivisor, Language};

/// Environment variable that overrides the configured backend URL
pub const API_URL_ENV: &str = "TALLY_API_URL";

/// User settings for tally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the expense API (including the `/api` prefix)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Currency symbol placed before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,

    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Language used for month labels
    #[serde(default)]
    pub language: Language,

    /// Quiet period before an edited filter is applied
    #[serde(default = "default_filter_debounce_ms")]
    pub filter_debounce_ms: u64,

    /// How the average-per-day divisor is chosen
    #[serde(default)]
    pub average_divisor: AverageDivisor,

    /// Send bounded filters to the backend instead of filtering locally
    #[serde(default = "default_remote_filtering")]
    pub remote_filtering: bool,

    /// How many upload row errors are listed before "+N more"
    #[serde(default = "default_upload_error_preview")]
    pub upload_error_preview: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:8001/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_currency() -> String {
    "₺".to_string()
}

fn default_thousands_separator() -> String {
    ".".to_string()
}

fn default_decimal_separator() -> String {
    ",".to_string()
}

fn default_date_format() -> String {
    "%d.%m.%Y".to_string()
}

fn default_filter_debounce_ms() -> u64 {
    500
}

fn default_remote_filtering() -> bool {
    true
}

fn default_upload_error_preview() -> usize {
    3
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            currency_symbol: default_currency(),
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
            date_format: default_date_format(),
            language: Language::default(),
            filter_debounce_ms: default_filter_debounce_ms(),
            average_divisor: AverageDivisor::default(),
            remote_filtering: default_remote_filtering(),
            upload_error_preview: default_upload_error_preview(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &TallyPaths) -> Result<Self, TallyError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| TallyError::Io(format!("Failed to read settings file: {}", e)))?;

            serde_json::from_str(&contents)
                .map_err(|e| TallyError::Config(format!("Failed to parse settings file: {}", e)))
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> Result<(), TallyError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TallyError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TallyError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Apply an explicit backend URL (from the command line or `TALLY_API_URL`)
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        self
    }

    /// Currency and date formatting preferences
    pub fn locale(&self) -> DisplayLocale {
        DisplayLocale {
            currency_symbol: self.currency_symbol.clone(),
            thousands_separator: self.thousands_separator.clone(),
            decimal_separator: self.decimal_separator.clone(),
            date_format: self.date_format.clone(),
            language: self.language,
        }
    }
}
