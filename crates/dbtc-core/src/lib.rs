//! # dbtc-core - Core Domain Types
//!
//! Foundation crate for dbt-console. Provides domain types, error handling,
//! and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`ProjectSettings`] - dbt project path, profiles.yml path and target
//! - [`Source`], [`Model`] - Records listed by the backend
//! - [`TableInfo`], [`ColumnInfo`], [`ModelOrSource`] - Warehouse metadata
//!
//! ### Test Schema (`test_schema`)
//! - [`TestType`], [`ConfigField`], [`ConfigKind`] - Server-supplied test descriptors
//! - [`TestLabel`] - Parsed `"column: test"` labels
//! - [`TestTarget`] - Model vs. source endpoint family
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use dbtc_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod prelude;
pub mod test_schema;
pub mod types;

pub use error::{Error, Result, ResultExt};
pub use test_schema::{ConfigField, ConfigKind, TestLabel, TestTarget, TestType};
pub use types::{
    ColumnInfo, Model, ModelOrSource, ProjectSettings, RelationKind, Source, SourceKey, TableInfo,
};
