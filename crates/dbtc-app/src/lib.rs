//! dbtc-app - Application state and orchestration for dbt-console
//!
//! This crate implements the TEA (The Elm Architecture) pattern:
//! [`AppState`] is the model, [`Message`] the events, [`handler::update`]
//! the transition function. Backend calls requested by the update function
//! as [`UpdateAction`]s run on tokio tasks (see [`actions`]).

pub mod actions;
pub mod add_source;
pub mod config;
pub mod details;
pub mod grid;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod project_form;
pub mod signals;
pub mod source_editor;
pub mod state;
pub mod test_config;
pub mod text_input;
pub mod toast;

// Re-export primary types
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use state::{AppState, BackendStatus, UiMode, View};
