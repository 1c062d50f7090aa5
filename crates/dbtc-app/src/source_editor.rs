//! Edit-source dialog state

use dbtc_api::UpdateSourceRequest;
use dbtc_core::Source;

use crate::text_input::{TextEdit, TextInput};

pub const EDITOR_LABELS: [&str; 4] = ["Source", "Schema", "Table", "Description"];

/// Fields of the source being edited, plus the original row so the backend
/// can locate it even after a rename.
#[derive(Debug, Clone)]
pub struct SourceEditor {
    pub original: Source,
    inputs: [TextInput; 4],
    pub focus: usize,
    pub error: Option<String>,
}

impl SourceEditor {
    pub fn new(source: &Source) -> Self {
        Self {
            original: source.clone(),
            inputs: [
                TextInput::new(source.source.clone()),
                TextInput::new(source.schema.clone()),
                TextInput::new(source.table.clone()),
                TextInput::new(source.description.clone().unwrap_or_default()),
            ],
            focus: 0,
            error: None,
        }
    }

    pub fn input(&self, index: usize) -> Option<&TextInput> {
        self.inputs.get(index)
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.inputs.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
    }

    pub fn apply(&mut self, edit: &TextEdit) {
        self.inputs[self.focus].apply(edit);
        self.error = None;
    }

    /// The record as it will be sent; tests are carried over unchanged.
    pub fn updated_source(&self) -> Source {
        let description = self.inputs[3].trimmed();
        Source {
            source: self.inputs[0].trimmed().to_string(),
            schema: self.inputs[1].trimmed().to_string(),
            table: self.inputs[2].trimmed().to_string(),
            tests: self.original.tests.clone(),
            description: (!description.is_empty()).then(|| description.to_string()),
        }
    }

    /// Build the update request, or record a validation error.
    pub fn to_request(&mut self, dbt_project_path: &str) -> Option<UpdateSourceRequest> {
        let updated = self.updated_source();
        if updated.source.is_empty() {
            self.error = Some("Source name is required".to_string());
            self.focus = 0;
            return None;
        }
        if updated.table.is_empty() {
            self.error = Some("Table is required".to_string());
            self.focus = 2;
            return None;
        }
        Some(UpdateSourceRequest {
            dbt_project_path: dbt_project_path.to_string(),
            original_source: self.original.source.clone(),
            original_table: self.original.table.clone(),
            updated_source: updated,
        })
    }
}
