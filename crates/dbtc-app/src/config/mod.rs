//! Configuration file handling for dbt-console
//!
//! Supports:
//! - `config.toml` - Backend and UI settings
//! - `project.toml` - The dbt project the console works against

pub mod settings;
pub mod types;

pub use settings::{
    config_dir, load_project_settings, load_settings, save_project_settings, save_settings,
    CONFIG_FILENAME, PROJECT_FILENAME,
};
pub use types::*;
