//! Add-source dialog state
//!
//! The user names a new source, picks a warehouse schema, ticks the tables to
//! declare and optionally describes each one.

use dbtc_api::{CreateSourcesRequest, NewSourceTable};
use dbtc_core::TableInfo;

use crate::text_input::{TextEdit, TextInput};

pub const SOURCE_NAME_REQUIRED: &str = "Source name is required";
pub const SCHEMA_REQUIRED: &str = "Schema is required";
pub const TABLE_REQUIRED: &str = "At least one table must be selected";

/// Focusable sections of the dialog, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddSourceFocus {
    #[default]
    Name,
    Schemas,
    Tables,
    Descriptions,
}

impl AddSourceFocus {
    const ORDER: [AddSourceFocus; 4] = [
        AddSourceFocus::Name,
        AddSourceFocus::Schemas,
        AddSourceFocus::Tables,
        AddSourceFocus::Descriptions,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// A ticked table and the description that will be written for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedTable {
    pub name: String,
    pub description: TextInput,
}

#[derive(Debug, Clone, Default)]
pub struct AddSourceState {
    /// Identifies responses belonging to this opening of the dialog
    pub request_id: u64,
    pub focus: AddSourceFocus,
    pub source_name: TextInput,

    pub schemas: Vec<String>,
    pub schemas_loading: bool,
    pub schema_cursor: usize,
    pub selected_schema: Option<String>,

    pub tables: Vec<TableInfo>,
    pub tables_loading: bool,
    pub table_cursor: usize,
    pub selected_tables: Vec<SelectedTable>,
    pub description_cursor: usize,

    pub errors: Vec<String>,
    pub saving: bool,
}

impl AddSourceState {
    /// Fresh dialog waiting for its schema list
    pub fn open(request_id: u64) -> Self {
        Self {
            request_id,
            schemas_loading: true,
            ..Default::default()
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    // ─────────────────────────────────────────────────────────
    // Schemas
    // ─────────────────────────────────────────────────────────

    pub fn set_schemas(&mut self, schemas: Vec<String>) {
        self.schemas = schemas;
        self.schemas_loading = false;
        self.schema_cursor = 0;
    }

    /// Choose the schema under the cursor.
    ///
    /// Returns the schema when it differs from the current choice; the table
    /// selection is cleared and the caller must fetch its tables.
    pub fn choose_schema(&mut self) -> Option<String> {
        let schema = self.schemas.get(self.schema_cursor)?.clone();
        if self.selected_schema.as_deref() == Some(schema.as_str()) {
            return None;
        }
        self.selected_schema = Some(schema.clone());
        self.tables.clear();
        self.selected_tables.clear();
        self.table_cursor = 0;
        self.description_cursor = 0;
        self.tables_loading = true;
        self.errors.retain(|e| e != SCHEMA_REQUIRED);
        Some(schema)
    }

    /// Whether a tables response for `schema` is still wanted
    pub fn is_current_schema(&self, schema: &str) -> bool {
        self.selected_schema.as_deref() == Some(schema)
    }

    pub fn set_tables(&mut self, tables: Vec<TableInfo>) {
        self.tables = tables;
        self.tables_loading = false;
        self.table_cursor = 0;
    }

    // ─────────────────────────────────────────────────────────
    // Tables
    // ─────────────────────────────────────────────────────────

    pub fn is_table_selected(&self, name: &str) -> bool {
        self.selected_tables.iter().any(|t| t.name == name)
    }

    /// Tick or untick the table under the cursor
    pub fn toggle_table(&mut self) {
        let Some(table) = self.tables.get(self.table_cursor) else {
            return;
        };
        if let Some(pos) = self.selected_tables.iter().position(|t| t.name == table.name) {
            self.selected_tables.remove(pos);
            self.description_cursor = self
                .description_cursor
                .min(self.selected_tables.len().saturating_sub(1));
        } else {
            self.selected_tables.push(SelectedTable {
                name: table.name.clone(),
                description: TextInput::new(table.description.clone().unwrap_or_default()),
            });
            self.errors.retain(|e| e != TABLE_REQUIRED);
        }
    }

    /// Move the cursor of the focused list
    pub fn move_cursor(&mut self, down: bool) {
        let (cursor, len) = match self.focus {
            AddSourceFocus::Schemas => (&mut self.schema_cursor, self.schemas.len()),
            AddSourceFocus::Tables => (&mut self.table_cursor, self.tables.len()),
            AddSourceFocus::Descriptions => {
                (&mut self.description_cursor, self.selected_tables.len())
            }
            AddSourceFocus::Name => return,
        };
        if down {
            if *cursor + 1 < len {
                *cursor += 1;
            }
        } else {
            *cursor = cursor.saturating_sub(1);
        }
    }

    /// Apply a text edit to the focused text field, if any
    pub fn apply(&mut self, edit: &TextEdit) {
        match self.focus {
            AddSourceFocus::Name => {
                self.source_name.apply(edit);
                self.errors.retain(|e| e != SOURCE_NAME_REQUIRED);
            }
            AddSourceFocus::Descriptions => {
                if let Some(table) = self.selected_tables.get_mut(self.description_cursor) {
                    table.description.apply(edit);
                }
            }
            AddSourceFocus::Schemas | AddSourceFocus::Tables => {}
        }
    }

    pub fn can_save(&self) -> bool {
        !self.saving && !self.tables_loading && !self.schemas_loading
    }

    /// Validate and build the create request. All problems are reported together.
    pub fn to_request(&mut self, dbt_project_path: &str) -> Option<CreateSourcesRequest> {
        let mut errors = Vec::new();
        if self.source_name.is_blank() {
            errors.push(SOURCE_NAME_REQUIRED.to_string());
        }
        if self.selected_schema.is_none() {
            errors.push(SCHEMA_REQUIRED.to_string());
        }
        if self.selected_tables.is_empty() {
            errors.push(TABLE_REQUIRED.to_string());
        }
        self.errors = errors;

        let schema_name = self.selected_schema.clone()?;
        if !self.errors.is_empty() {
            return None;
        }

        Some(CreateSourcesRequest {
            dbt_project_path: dbt_project_path.to_string(),
            source_name: self.source_name.trimmed().to_string(),
            schema_name,
            tables: self
                .selected_tables
                .iter()
                .map(|t| NewSourceTable {
                    name: t.name.clone(),
                    description: t.description.trimmed().to_string(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, description: Option<&str>) -> TableInfo {
        TableInfo {
            name: name.into(),
            description: description.map(Into::into),
            identifier: None,
        }
    }

    fn dialog_with_tables() -> AddSourceState {
        let mut state = AddSourceState::open(1);
        state.set_schemas(vec!["public".into(), "staging".into()]);
        state.choose_schema();
        state.set_tables(vec![
            table("orders", Some("All orders")),
            table("users", None),
        ]);
        state
    }

    #[test]
    fn test_open_starts_loading_schemas() {
        let state = AddSourceState::open(7);
        assert_eq!(state.request_id, 7);
        assert!(state.schemas_loading);
        assert!(!state.can_save());
    }

    #[test]
    fn test_choose_schema_resets_tables() {
        let mut state = dialog_with_tables();
        state.focus = AddSourceFocus::Tables;
        state.toggle_table();
        assert_eq!(state.selected_tables.len(), 1);

        state.focus = AddSourceFocus::Schemas;
        state.move_cursor(true);
        assert_eq!(state.choose_schema().as_deref(), Some("staging"));
        assert!(state.selected_tables.is_empty());
        assert!(state.tables.is_empty());
        assert!(state.tables_loading);
        assert!(state.is_current_schema("staging"));
        assert!(!state.is_current_schema("public"));
    }

    #[test]
    fn test_choosing_same_schema_again_is_noop() {
        let mut state = dialog_with_tables();
        assert_eq!(state.choose_schema(), None);
        assert_eq!(state.tables.len(), 2);
    }

    #[test]
    fn test_toggle_table_seeds_description() {
        let mut state = dialog_with_tables();
        state.toggle_table();
        assert!(state.is_table_selected("orders"));
        assert_eq!(state.selected_tables[0].description.value(), "All orders");

        state.toggle_table();
        assert!(!state.is_table_selected("orders"));
    }

    #[test]
    fn test_validation_reports_all_errors() {
        let mut state = AddSourceState::open(1);
        state.set_schemas(vec!["public".into()]);
        assert!(state.to_request("/work/shop").is_none());
        assert_eq!(
            state.errors,
            vec![SOURCE_NAME_REQUIRED, SCHEMA_REQUIRED, TABLE_REQUIRED]
        );
    }

    #[test]
    fn test_valid_request() {
        let mut state = dialog_with_tables();
        for c in " raw ".chars() {
            state.apply(&TextEdit::Insert(c));
        }
        state.focus = AddSourceFocus::Tables;
        state.move_cursor(true);
        state.toggle_table();
        state.focus = AddSourceFocus::Descriptions;
        for c in "Users".chars() {
            state.apply(&TextEdit::Insert(c));
        }

        let request = state.to_request("/work/shop").unwrap();
        assert_eq!(request.source_name, "raw");
        assert_eq!(request.schema_name, "public");
        assert_eq!(
            request.tables,
            vec![NewSourceTable {
                name: "users".into(),
                description: "Users".into()
            }]
        );
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_focus_cycles() {
        assert_eq!(AddSourceFocus::Name.next(), AddSourceFocus::Schemas);
        assert_eq!(AddSourceFocus::Descriptions.next(), AddSourceFocus::Name);
        assert_eq!(AddSourceFocus::Name.previous(), AddSourceFocus::Descriptions);
    }
}
