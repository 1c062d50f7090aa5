//! Message types for the application (TEA pattern)

use dbtc_api::RelationCatalog;
use dbtc_core::{ColumnInfo, Model, ProjectSettings, Source, TableInfo, TestTarget, TestType};

use crate::input_key::InputKey;
use crate::state::View;
use crate::text_input::TextEdit;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Quit immediately (q, Ctrl+C, signal handler)
    Quit,

    /// First message after the terminal is up
    Startup,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    SwitchView(View),
    NextView,
    PreviousView,

    /// Reload the active view's table
    Refresh,

    // ─────────────────────────────────────────────────────────
    // Backend Health
    // ─────────────────────────────────────────────────────────
    CheckHealth,
    BackendHealthy {
        status: String,
    },
    BackendUnreachable {
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // Table Navigation
    // ─────────────────────────────────────────────────────────
    GridNext,
    GridPrevious,
    GridNextPage,
    GridPreviousPage,
    GridFirst,
    GridLast,

    // ─────────────────────────────────────────────────────────
    // Sources
    // ─────────────────────────────────────────────────────────
    SourcesLoaded {
        generation: u64,
        sources: Vec<Source>,
    },
    SourcesLoadFailed {
        generation: u64,
        error: String,
    },
    OpenSourceDetails,
    OpenEditSource,
    OpenDeleteSource,
    ConfirmDelete,
    SourceSaved {
        message: String,
    },
    SourceDeleted {
        message: String,
    },
    SourceMutationFailed {
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // Models
    // ─────────────────────────────────────────────────────────
    ModelsLoaded {
        generation: u64,
        models: Vec<Model>,
    },
    ModelsLoadFailed {
        generation: u64,
        error: String,
    },
    OpenModelDetails,

    // ─────────────────────────────────────────────────────────
    // Dialogs & Forms
    // ─────────────────────────────────────────────────────────
    /// Close the topmost dialog
    CloseDialog,

    /// Edit the focused text field
    FormInput(TextEdit),
    FocusNext,
    FocusPrevious,
    /// Enter/Ctrl+S in a dialog or form
    Submit,

    /// Move within the focused list
    ListNext,
    ListPrevious,
    /// Select the highlighted list entry (schema, table)
    Toggle,
    /// Step a choice field (test type, column, boolean, relation)
    CycleOption {
        forward: bool,
    },
    /// Commit the typed item of an array field
    ArrayPush,

    // ─────────────────────────────────────────────────────────
    // Tests on Sources and Models
    // ─────────────────────────────────────────────────────────
    DetailsNextTest,
    DetailsPreviousTest,
    OpenAddTest,
    RemoveSelectedTest,
    TestAdded {
        target: TestTarget,
        message: String,
    },
    TestRemoved {
        target: TestTarget,
        message: String,
    },
    TestMutationFailed {
        target: TestTarget,
        error: String,
        removing: bool,
    },

    // ─────────────────────────────────────────────────────────
    // Project Settings
    // ─────────────────────────────────────────────────────────
    SaveProjectSettings,
    ProjectSettingsSynced,
    ProjectSettingsSyncFailed {
        error: String,
    },
    /// Prefill the settings form from the backend's stored settings
    LoadBackendSettings,
    BackendSettingsLoaded {
        settings: Option<ProjectSettings>,
    },

    // ─────────────────────────────────────────────────────────
    // Add Source Dialog
    // ─────────────────────────────────────────────────────────
    OpenAddSource,
    SchemasLoaded {
        request_id: u64,
        schemas: Vec<String>,
    },
    SchemasLoadFailed {
        request_id: u64,
        error: String,
    },
    TablesLoaded {
        request_id: u64,
        schema: String,
        tables: Vec<TableInfo>,
    },
    TablesLoadFailed {
        request_id: u64,
        schema: String,
        error: String,
    },
    SourcesCreated {
        message: String,
    },
    CreateSourcesFailed {
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // Add Test Dialog
    // ─────────────────────────────────────────────────────────
    TestTypesLoaded {
        request_id: u64,
        test_types: Vec<TestType>,
    },
    TestTypesLoadFailed {
        request_id: u64,
        error: String,
    },
    ColumnsLoaded {
        request_id: u64,
        columns: Vec<ColumnInfo>,
    },
    ColumnsLoadFailed {
        request_id: u64,
        error: String,
    },
    RelationsLoaded {
        request_id: u64,
        relations: RelationCatalog,
    },
    RelationsLoadFailed {
        request_id: u64,
        error: String,
    },
}
