//! Settings and project files in the user's config directory

use super::types::Settings;
use dbtc_core::prelude::*;
use dbtc_core::ProjectSettings;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.toml";
pub const PROJECT_FILENAME: &str = "project.toml";
const APP_DIR: &str = "dbt-console";

/// Directory holding `config.toml` and `project.toml`.
///
/// `override_dir` (from `--config-dir`) wins; otherwise the platform config
/// directory, falling back to the working directory.
pub fn config_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from `config.toml`
///
/// Returns default settings if the file doesn't exist, can't be parsed, or
/// holds values that fail validation.
pub fn load_settings(dir: &Path) -> Settings {
    let settings: Settings = load_toml(&dir.join(CONFIG_FILENAME)).unwrap_or_default();
    match settings.validate() {
        Ok(()) => settings,
        Err(e) => {
            warn!("Ignoring invalid {}: {}", CONFIG_FILENAME, e);
            Settings::default()
        }
    }
}

/// Load the saved project settings, empty when nothing has been saved yet.
pub fn load_project_settings(dir: &Path) -> ProjectSettings {
    load_toml(&dir.join(PROJECT_FILENAME)).unwrap_or_default()
}

fn load_toml<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        debug!("No file at {:?}, using defaults", path);
        return None;
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(value) => {
                debug!("Loaded {:?}", path);
                Some(value)
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                None
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Saving
// ─────────────────────────────────────────────────────────────────────────────

/// Save settings to `config.toml`
pub fn save_settings(dir: &Path, settings: &Settings) -> Result<()> {
    let header = "# dbt-console configuration\n\
                  #\n\
                  # [backend] url          - base URL of the dbt backend service\n\
                  # [backend] timeout_secs - per-request timeout\n\
                  # [ui] page_size         - rows per page in the Sources/Models tables\n\
                  # [ui] toast_secs        - how long notifications stay visible\n\n";
    write_toml_atomic(dir, CONFIG_FILENAME, header, settings)
}

/// Save project settings to `project.toml`
pub fn save_project_settings(dir: &Path, project: &ProjectSettings) -> Result<()> {
    let header = "# dbt project used by dbt-console (edited from the Settings view)\n\n";
    write_toml_atomic(dir, PROJECT_FILENAME, header, project)
}

/// Uses atomic write (temp file + rename) so a crash never leaves a
/// half-written file behind.
fn write_toml_atomic<T: Serialize>(
    dir: &Path,
    file_name: &str,
    header: &str,
    value: &T,
) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| {
            Error::config(format!("Failed to create {}: {}", dir.display(), e))
        })?;
    }

    let target = dir.join(file_name);
    let temp_path = dir.join(format!(".{}.tmp", file_name));

    let content = toml::to_string_pretty(value)
        .map_err(|e| Error::config(format!("Failed to serialize {}: {}", file_name, e)))?;

    std::fs::write(&temp_path, format!("{}{}", header, content))
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;

    std::fs::rename(&temp_path, &target)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    info!("Saved {:?}", target);
    Ok(())
}
