//! Domain types shared by the API client, the state machine and the UI
//!
//! Field names follow the backend's JSON contract so the same structs are
//! used for (de)serialization and for display.

use serde::{Deserialize, Serialize};
use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// Project Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Locations the backend needs to find the dbt project and its warehouse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    pub dbt_project_path: String,
    pub profiles_yml_path: String,
    pub target_name: String,
}

impl ProjectSettings {
    pub const PROJECT_PATH_LABEL: &'static str = "DBT Project Path";
    pub const PROFILES_PATH_LABEL: &'static str = "profiles.yml Path";
    pub const TARGET_LABEL: &'static str = "Target Name";

    pub fn new(
        dbt_project_path: impl Into<String>,
        profiles_yml_path: impl Into<String>,
        target_name: impl Into<String>,
    ) -> Self {
        Self {
            dbt_project_path: dbt_project_path.into(),
            profiles_yml_path: profiles_yml_path.into(),
            target_name: target_name.into(),
        }
    }

    /// Sources and Models are only reachable once a project path is known.
    pub fn is_configured(&self) -> bool {
        !self.dbt_project_path.trim().is_empty()
    }

    /// Labels of the fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.dbt_project_path.trim().is_empty() {
            missing.push(Self::PROJECT_PATH_LABEL);
        }
        if self.profiles_yml_path.trim().is_empty() {
            missing.push(Self::PROFILES_PATH_LABEL);
        }
        if self.target_name.trim().is_empty() {
            missing.push(Self::TARGET_LABEL);
        }
        missing
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self::new(
            self.dbt_project_path.trim(),
            self.profiles_yml_path.trim(),
            self.target_name.trim(),
        )
    }

    /// Last path component of the project path, used as a display name.
    pub fn project_name(&self) -> Option<String> {
        let trimmed = self.dbt_project_path.trim().trim_end_matches(['/', '\\']);
        if trimmed.is_empty() {
            return None;
        }
        Path::new(trimmed)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sources & Models
// ─────────────────────────────────────────────────────────────────────────────

/// A table declared under a dbt `sources:` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub source: String,
    pub schema: String,
    pub table: String,
    #[serde(default)]
    pub tests: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Source {
    /// Sources are identified by the `(source, table)` pair.
    pub fn key(&self) -> SourceKey {
        SourceKey {
            source: self.source.clone(),
            table: self.table.clone(),
        }
    }

    pub fn matches(&self, key: &SourceKey) -> bool {
        self.source == key.source && self.table == key.table
    }

    pub fn test_count_label(&self) -> String {
        test_count_label(self.tests.len())
    }
}

/// Identity of a [`Source`] row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub source: String,
    pub table: String,
}

/// A dbt model (SQL file) and where it materializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub tests: Vec<String>,
    pub sql_path: String,
}

impl Model {
    pub fn test_count_label(&self) -> String {
        test_count_label(self.tests.len())
    }
}

fn test_count_label(count: usize) -> String {
    if count == 1 {
        "1 test".to_string()
    } else {
        format!("{} tests", count)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Warehouse Metadata
// ─────────────────────────────────────────────────────────────────────────────

/// A table reported by warehouse introspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
}

/// A column of a warehouse table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ColumnInfo {
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.data_type)
    }
}

/// Whether a [`ModelOrSource`] entry refers to a model or a source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Model,
    Source,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Model => "model",
            RelationKind::Source => "source",
        }
    }
}

/// A relation that can be referenced from a test config
/// (e.g. the `to` argument of a `relationships` test).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOrSource {
    pub name: String,
    /// dbt expression written into the YAML, `ref('x')` or `source('a', 'b')`
    pub value: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub table: String,
}

impl ModelOrSource {
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind.as_str())
    }
}
