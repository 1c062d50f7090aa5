//! Add-test dialog state
//!
//! The dialog is driven by the test types the backend returns for the target
//! (model or source). Choosing a type rebuilds [`ConfigForm`] from its
//! descriptors. Rows are addressed by a single focus index:
//!
//! - `0` - test type selector
//! - `1` - column selector (`None` means a table-level test)
//! - `2..` - config form rows (group headers are skipped)

mod form;

pub use form::{cycle_option, ConfigForm, ConfigRow, FieldValue};

use dbtc_api::{
    AddTestRequest, ConnectionRequest, RelationCatalog, TableColumnsRequest, TestConfigPayload,
};
use dbtc_core::{ColumnInfo, Model, ProjectSettings, Source, TestTarget, TestType};

use crate::text_input::TextEdit;

pub const SELECT_TEST_TYPE: &str = "Please select a test type";
pub const COLUMNS_FAILED: &str = "Failed to fetch columns";
pub const TEST_TYPES_FAILED: &str = "Failed to fetch test types";
pub const RELATIONS_FAILED: &str = "Failed to fetch models and sources";

const TYPE_ROW: usize = 0;
const COLUMN_ROW: usize = 1;
const FORM_OFFSET: usize = 2;

/// The record a test is being added to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSubject {
    pub schema: String,
    pub table: String,
    /// SQL path for models, empty for sources
    pub model_path: String,
    /// Source name for sources, empty for models
    pub source_name: String,
    pub title: String,
}

impl From<&Source> for TestSubject {
    fn from(source: &Source) -> Self {
        Self {
            schema: source.schema.clone(),
            table: source.table.clone(),
            model_path: String::new(),
            source_name: source.source.clone(),
            title: format!("{}.{}", source.source, source.table),
        }
    }
}

impl From<&Model> for TestSubject {
    fn from(model: &Model) -> Self {
        Self {
            schema: model.schema.clone(),
            table: model.table.clone(),
            model_path: model.sql_path.clone(),
            source_name: String::new(),
            title: model.name.clone(),
        }
    }
}

/// Row under focus, resolved from the focus index
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusedRow<'a> {
    TestType,
    Column,
    Field(&'a ConfigRow),
}

#[derive(Debug, Clone)]
pub struct TestConfigState {
    /// Responses tagged with another id belong to an earlier dialog
    pub request_id: u64,
    pub target: TestTarget,
    pub subject: TestSubject,

    pub test_types: Vec<TestType>,
    pub test_types_loading: bool,
    pub selected_type: Option<usize>,

    pub columns: Vec<ColumnInfo>,
    pub columns_loading: bool,
    pub selected_column: Option<usize>,

    pub relations: Option<RelationCatalog>,
    pub relations_loading: bool,
    relations_requested: bool,

    pub form: ConfigForm,
    pub focus: usize,
    pub error: Option<String>,
}

impl TestConfigState {
    pub fn open(request_id: u64, target: TestTarget, subject: TestSubject) -> Self {
        Self {
            request_id,
            target,
            subject,
            test_types: Vec::new(),
            test_types_loading: true,
            selected_type: None,
            columns: Vec::new(),
            columns_loading: true,
            selected_column: None,
            relations: None,
            relations_loading: false,
            relations_requested: false,
            form: ConfigForm::default(),
            focus: TYPE_ROW,
            error: None,
        }
    }

    /// Request for the column selector, if the subject has a warehouse table
    pub fn columns_request(&self, settings: &ProjectSettings) -> Option<TableColumnsRequest> {
        if self.subject.schema.is_empty() || self.subject.table.is_empty() {
            return None;
        }
        Some(TableColumnsRequest {
            connection: ConnectionRequest::from(settings),
            schema: self.subject.schema.clone(),
            table: self.subject.table.clone(),
        })
    }

    pub fn selected_test_type(&self) -> Option<&TestType> {
        self.selected_type.and_then(|i| self.test_types.get(i))
    }

    pub fn selected_column_name(&self) -> Option<&str> {
        self.selected_column
            .and_then(|i| self.columns.get(i))
            .map(|c| c.name.as_str())
    }

    pub fn relation_count(&self) -> usize {
        self.relations.as_ref().map_or(0, RelationCatalog::len)
    }

    // ─────────────────────────────────────────────────────────
    // Loaded data
    // ─────────────────────────────────────────────────────────

    pub fn set_test_types(&mut self, test_types: Vec<TestType>) {
        self.test_types = test_types;
        self.test_types_loading = false;
    }

    pub fn fail_test_types(&mut self) {
        self.test_types_loading = false;
        self.error = Some(TEST_TYPES_FAILED.to_string());
    }

    pub fn set_columns(&mut self, columns: Vec<ColumnInfo>) {
        self.columns = columns;
        self.columns_loading = false;
        self.selected_column = None;
    }

    pub fn fail_columns(&mut self) {
        self.columns_loading = false;
        self.error = Some(COLUMNS_FAILED.to_string());
    }

    /// Columns are not fetched for subjects without a table
    pub fn skip_columns(&mut self) {
        self.columns_loading = false;
    }

    pub fn set_relations(&mut self, relations: RelationCatalog) {
        self.relations = Some(relations);
        self.relations_loading = false;
    }

    pub fn fail_relations(&mut self) {
        self.relations_loading = false;
        self.error = Some(RELATIONS_FAILED.to_string());
    }

    // ─────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────

    fn row_count(&self) -> usize {
        FORM_OFFSET + self.form.len()
    }

    fn is_focusable(&self, index: usize) -> bool {
        match index.checked_sub(FORM_OFFSET) {
            None => true,
            Some(row) => self.form.row(row).is_some_and(ConfigRow::is_focusable),
        }
    }

    pub fn focus_next(&mut self) {
        let count = self.row_count();
        let mut next = self.focus;
        for _ in 0..count {
            next = (next + 1) % count;
            if self.is_focusable(next) {
                break;
            }
        }
        self.focus = next;
    }

    pub fn focus_previous(&mut self) {
        let count = self.row_count();
        let mut previous = self.focus;
        for _ in 0..count {
            previous = (previous + count - 1) % count;
            if self.is_focusable(previous) {
                break;
            }
        }
        self.focus = previous;
    }

    pub fn focused_row(&self) -> FocusedRow<'_> {
        match self.focus {
            TYPE_ROW => FocusedRow::TestType,
            COLUMN_ROW => FocusedRow::Column,
            index => self
                .form
                .row(index - FORM_OFFSET)
                .map(FocusedRow::Field)
                .unwrap_or(FocusedRow::TestType),
        }
    }

    /// Index of the focused form row, if a form row has focus
    pub fn focused_form_row(&self) -> Option<usize> {
        self.focus.checked_sub(FORM_OFFSET)
    }

    fn focused_field_mut(&mut self) -> Option<&mut ConfigRow> {
        let index = self.focused_form_row()?;
        self.form.row_mut(index)
    }

    // ─────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────

    /// Select a test type, resetting any values entered for the previous one.
    ///
    /// Returns true when the new type needs the model/source catalog and it
    /// has not been requested yet.
    pub fn select_test_type(&mut self, index: Option<usize>) -> bool {
        self.selected_type = index.filter(|i| *i < self.test_types.len());
        self.form = self
            .selected_test_type()
            .map(|t| ConfigForm::from_fields(&t.required_configs))
            .unwrap_or_default();
        self.error = None;

        let needs_relations = self
            .selected_test_type()
            .is_some_and(TestType::needs_relations);
        if needs_relations && !self.relations_requested {
            self.relations_requested = true;
            self.relations_loading = true;
            return true;
        }
        false
    }

    /// Step the focused choice row. Returns true when the relation catalog
    /// should be fetched as a result.
    pub fn cycle_focused(&mut self, forward: bool) -> bool {
        match self.focus {
            TYPE_ROW => {
                let next = cycle_option(self.selected_type, self.test_types.len(), forward);
                self.select_test_type(next)
            }
            COLUMN_ROW => {
                self.selected_column =
                    cycle_option(self.selected_column, self.columns.len(), forward);
                false
            }
            _ => {
                let count = self.relation_count();
                if let Some(row) = self.focused_field_mut() {
                    row.cycle(forward, count);
                }
                false
            }
        }
    }

    pub fn apply(&mut self, edit: &TextEdit) {
        if let Some(row) = self.focused_field_mut() {
            row.apply(edit);
        }
    }

    pub fn focused_accepts_text(&self) -> bool {
        matches!(self.focused_row(), FocusedRow::Field(row) if row.accepts_text())
    }

    pub fn focused_is_list(&self) -> bool {
        matches!(self.focused_row(), FocusedRow::Field(row) if row.is_list())
    }

    pub fn push_item(&mut self) -> bool {
        self.focused_field_mut().is_some_and(ConfigRow::push_item)
    }

    /// Build the add-test request, recording the problem in `error` if the
    /// form cannot be submitted.
    pub fn to_request(&mut self, settings: &ProjectSettings) -> Option<AddTestRequest> {
        let Some(test_type) = self.selected_test_type() else {
            self.error = Some(SELECT_TEST_TYPE.to_string());
            return None;
        };
        let test_type = test_type.name.clone();

        let config = match self.form.build(self.relations.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                self.error = Some(e.user_message());
                return None;
            }
        };

        self.error = None;
        Some(AddTestRequest {
            connection: ConnectionRequest::from(settings),
            schema: self.subject.schema.clone(),
            table: self.subject.table.clone(),
            model_path: self.subject.model_path.clone(),
            source: self.subject.source_name.clone(),
            test_config: TestConfigPayload { test_type, config },
            column_name: self.selected_column_name().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbtc_core::{ConfigField, ConfigKind};
    use serde_json::json;

    fn settings() -> ProjectSettings {
        ProjectSettings::new("/work/shop", "/home/me/.dbt/profiles.yml", "dev")
    }

    fn source() -> Source {
        Source {
            source: "raw".into(),
            schema: "raw_data".into(),
            table: "orders".into(),
            tests: vec![],
            description: None,
        }
    }

    fn field(name: &str, kind: ConfigKind) -> ConfigField {
        ConfigField {
            name: name.into(),
            kind,
            description: String::new(),
            required_configs: vec![],
        }
    }

    fn test_types() -> Vec<TestType> {
        vec![
            TestType {
                name: "unique".into(),
                description: "Values are unique".into(),
                required_configs: vec![],
            },
            TestType {
                name: "accepted_values".into(),
                description: String::new(),
                required_configs: vec![
                    field("values", ConfigKind::Array),
                    field("quote", ConfigKind::Boolean),
                ],
            },
            TestType {
                name: "relationships".into(),
                description: String::new(),
                required_configs: vec![
                    field("to", ConfigKind::ModelOrSource),
                    field("field", ConfigKind::String),
                ],
            },
        ]
    }

    fn columns() -> Vec<ColumnInfo> {
        vec![
            ColumnInfo {
                name: "id".into(),
                data_type: "integer".into(),
                description: None,
            },
            ColumnInfo {
                name: "status".into(),
                data_type: "text".into(),
                description: None,
            },
        ]
    }

    fn loaded() -> TestConfigState {
        let mut state = TestConfigState::open(1, TestTarget::Source, TestSubject::from(&source()));
        state.set_test_types(test_types());
        state.set_columns(columns());
        state
    }

    #[test]
    fn test_submit_without_type() {
        let mut state = loaded();
        assert!(state.to_request(&settings()).is_none());
        assert_eq!(state.error.as_deref(), Some(SELECT_TEST_TYPE));
    }

    #[test]
    fn test_table_level_request() {
        let mut state = loaded();
        state.cycle_focused(true);
        let request = state.to_request(&settings()).unwrap();

        assert_eq!(request.test_config.test_type, "unique");
        assert!(request.test_config.config.is_empty());
        assert_eq!(request.column_name, None);
        assert_eq!(request.source, "raw");
        assert_eq!(request.schema, "raw_data");
        assert_eq!(request.model_path, "");
    }

    #[test]
    fn test_column_level_request_with_config() {
        let mut state = loaded();
        state.select_test_type(Some(1));
        state.focus_next();
        state.cycle_focused(true);
        state.cycle_focused(true);
        assert_eq!(state.selected_column_name(), Some("status"));

        state.focus_next();
        assert!(state.focused_is_list());
        for c in "placed".chars() {
            state.apply(&TextEdit::Insert(c));
        }
        assert!(state.push_item());

        state.focus_next();
        state.cycle_focused(true);

        let request = state.to_request(&settings()).unwrap();
        assert_eq!(request.column_name.as_deref(), Some("status"));
        assert_eq!(
            serde_json::Value::Object(request.test_config.config),
            json!({"values": ["placed"], "quote": true})
        );
    }

    #[test]
    fn test_changing_type_resets_form() {
        let mut state = loaded();
        state.select_test_type(Some(1));
        state.focus = 2;
        state.apply(&TextEdit::Insert('x'));
        state.error = Some("stale".into());

        state.select_test_type(Some(0));
        assert!(state.form.is_empty());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_relations_requested_once() {
        let mut state = loaded();
        assert!(!state.select_test_type(Some(1)));
        assert!(state.select_test_type(Some(2)));
        assert!(state.relations_loading);
        state.select_test_type(Some(0));
        assert!(!state.select_test_type(Some(2)));
    }

    #[test]
    fn test_focus_wraps_and_skips_groups() {
        let mut state = loaded();
        let mut dict = field("config", ConfigKind::Dict);
        dict.required_configs = vec![field("severity", ConfigKind::String)];
        state.test_types.push(TestType {
            name: "custom".into(),
            description: String::new(),
            required_configs: vec![dict],
        });
        state.select_test_type(Some(3));

        state.focus_next();
        assert_eq!(state.focused_row(), FocusedRow::Column);
        state.focus_next();
        assert_eq!(state.focus, 3);
        state.focus_next();
        assert_eq!(state.focused_row(), FocusedRow::TestType);
        state.focus_previous();
        assert_eq!(state.focus, 3);
    }

    #[test]
    fn test_model_subject_without_table_skips_columns() {
        let model = Model {
            id: "model.shop.tmp".into(),
            name: "tmp".into(),
            sql_path: "models/tmp.sql".into(),
            ..Default::default()
        };
        let state = TestConfigState::open(2, TestTarget::Model, TestSubject::from(&model));
        assert!(state.columns_request(&settings()).is_none());
        assert_eq!(state.subject.model_path, "models/tmp.sql");
    }

    #[test]
    fn test_invalid_number_blocks_submit() {
        let mut state = loaded();
        state.test_types.push(TestType {
            name: "at_least".into(),
            description: String::new(),
            required_configs: vec![field("min_value", ConfigKind::Number)],
        });
        state.select_test_type(Some(3));
        state.focus = 2;
        state.apply(&TextEdit::Insert('.'));
        assert!(state.to_request(&settings()).is_none());
        assert_eq!(state.error.as_deref(), Some("min_value must be a number"));
    }
}
