//! dbtc-tui - Terminal UI for dbt-console
//!
//! This crate provides the ratatui-based terminal interface. It owns the
//! terminal, polls key events, renders [`dbtc_app::AppState`] and feeds
//! messages through the app's update loop.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::{run, RunOptions};
