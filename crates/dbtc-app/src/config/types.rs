//! Configuration types for dbt-console

use serde::{Deserialize, Serialize};

use dbtc_api::{parse_base_url, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use dbtc_core::prelude::*;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_TOAST_SECS: u64 = 6;

/// Global application settings from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

impl Settings {
    /// Reject values that would make the console unusable.
    pub fn validate(&self) -> Result<()> {
        parse_base_url(&self.backend.url)?;
        if self.backend.timeout_secs == 0 {
            return Err(Error::config_invalid("backend.timeout_secs must be at least 1"));
        }
        if self.ui.page_size == 0 {
            return Err(Error::config_invalid("ui.page_size must be at least 1"));
        }
        Ok(())
    }
}

/// Where the dbt backend lives
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendSettings {
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Rows per page in the Sources and Models tables
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// How long a notification stays visible
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            toast_secs: default_toast_secs(),
        }
    }
}

fn default_backend_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_toast_secs() -> u64 {
    DEFAULT_TOAST_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.backend.url, "http://localhost:10000");
        assert_eq!(settings.backend.timeout_secs, 30);
        assert_eq!(settings.ui.page_size, 10);
        assert_eq!(settings.ui.toast_secs, 6);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [ui]
            page_size = 25
            "#,
        )
        .unwrap();
        assert_eq!(settings.ui.page_size, 25);
        assert_eq!(settings.ui.toast_secs, 6);
        assert_eq!(settings.backend.url, "http://localhost:10000");
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut settings = Settings::default();
        settings.ui.page_size = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut settings = Settings::default();
        settings.backend.url = "localhost".to_string();
        assert!(settings.validate().is_err());
    }
}
