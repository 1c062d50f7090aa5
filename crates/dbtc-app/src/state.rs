//! Application state (Model in TEA pattern)

use std::path::PathBuf;
use std::time::{Duration, Instant};

use dbtc_core::{Model, ProjectSettings, Source, SourceKey};

use crate::add_source::AddSourceState;
use crate::config::Settings;
use crate::details::{DetailsState, DetailsTarget};
use crate::grid::Grid;
use crate::project_form::ProjectForm;
use crate::source_editor::SourceEditor;
use crate::test_config::TestConfigState;
use crate::toast::Toast;

/// Top-level views, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Sources,
    Models,
    Settings,
}

impl View {
    pub const ALL: [View; 3] = [View::Sources, View::Models, View::Settings];

    pub fn title(&self) -> &'static str {
        match self {
            View::Sources => "Sources",
            View::Models => "Models",
            View::Settings => "Settings",
        }
    }

    /// Number key that selects the view
    pub fn shortcut(&self) -> char {
        match self {
            View::Sources => '1',
            View::Models => '2',
            View::Settings => '3',
        }
    }

    pub fn next(self) -> Self {
        match self {
            View::Sources => View::Models,
            View::Models => View::Settings,
            View::Settings => View::Sources,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            View::Sources => View::Settings,
            View::Models => View::Sources,
            View::Settings => View::Models,
        }
    }

    /// Sources and Models need a configured project
    pub fn requires_project(&self) -> bool {
        !matches!(self, View::Settings)
    }
}

/// Current UI mode. Dialog modes overlay the active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Active view has input focus
    #[default]
    Normal,

    SourceDetails,

    EditSource,

    /// Delete confirmation for `AppState::pending_delete`
    ConfirmDeleteSource,

    AddSource,

    ModelDetails,

    /// Add-test dialog opened from a details dialog
    TestConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendStatus {
    /// No health check has completed yet
    #[default]
    Unknown,
    Healthy,
    Unreachable(String),
}

impl BackendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BackendStatus::Unknown => "Checking",
            BackendStatus::Healthy => "Connected",
            BackendStatus::Unreachable(_) => "Unreachable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,

    pub view: View,

    pub ui_mode: UiMode,

    /// Settings from `config.toml`
    pub settings: Settings,

    /// Directory holding `config.toml` and `project.toml`
    pub config_dir: PathBuf,

    /// Last saved project settings
    pub project: ProjectSettings,

    /// Settings view form, edited independently of `project`
    pub project_form: ProjectForm,

    pub backend_status: BackendStatus,

    pub sources: Grid<Source>,

    pub models: Grid<Model>,

    /// Open details dialog (source or model)
    pub details: Option<DetailsState>,

    pub source_editor: Option<SourceEditor>,

    pub pending_delete: Option<Source>,

    pub add_source: Option<AddSourceState>,

    pub test_config: Option<TestConfigState>,

    /// Set while a source update or delete is in flight
    pub mutation_in_flight: bool,

    pub toast: Option<Toast>,

    next_request_id: u64,
}

impl AppState {
    pub fn new(config_dir: PathBuf, settings: Settings, project: ProjectSettings) -> Self {
        let page_size = settings.ui.page_size;
        Self {
            phase: AppPhase::Running,
            view: if project.is_configured() {
                View::Sources
            } else {
                View::Settings
            },
            ui_mode: UiMode::Normal,
            settings,
            config_dir,
            project_form: ProjectForm::from_settings(&project),
            project,
            backend_status: BackendStatus::Unknown,
            sources: Grid::new(page_size),
            models: Grid::new(page_size),
            details: None,
            source_editor: None,
            pending_delete: None,
            add_source: None,
            test_config: None,
            mutation_in_flight: false,
            toast: None,
            next_request_id: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn is_configured(&self) -> bool {
        self.project.is_configured()
    }

    /// Allocate an id used to match async responses to the dialog that asked
    pub fn next_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    // ─────────────────────────────────────────────────────────
    // Toasts
    // ─────────────────────────────────────────────────────────

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::success(message));
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::error(message));
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_secs(self.settings.ui.toast_secs)
    }

    /// Drop the toast once its lifetime has passed
    pub fn expire_toast(&mut self, now: Instant) {
        let lifetime = self.toast_lifetime();
        if self
            .toast
            .as_ref()
            .is_some_and(|t| t.is_expired(now, lifetime))
        {
            self.toast = None;
        }
    }

    // ─────────────────────────────────────────────────────────
    // Details Helpers
    // ─────────────────────────────────────────────────────────

    pub fn find_source(&self, key: &SourceKey) -> Option<&Source> {
        self.sources.find(|s| s.matches(key))
    }

    pub fn find_model(&self, id: &str) -> Option<&Model> {
        self.models.find(|m| m.id == id)
    }

    /// Record shown by the details dialog, looked up in the current rows
    pub fn details_source(&self) -> Option<&Source> {
        match &self.details.as_ref()?.target {
            DetailsTarget::Source(key) => self.find_source(key),
            DetailsTarget::Model(_) => None,
        }
    }

    pub fn details_model(&self) -> Option<&Model> {
        match &self.details.as_ref()?.target {
            DetailsTarget::Model(id) => self.find_model(id),
            DetailsTarget::Source(_) => None,
        }
    }

    /// Tests of the record in the details dialog
    pub fn details_tests(&self) -> &[String] {
        if let Some(source) = self.details_source() {
            &source.tests
        } else if let Some(model) = self.details_model() {
            &model.tests
        } else {
            &[]
        }
    }

    /// Dialog mode that shows the current details target
    pub fn details_mode(&self) -> UiMode {
        match self.details.as_ref().map(|d| &d.target) {
            Some(DetailsTarget::Model(_)) => UiMode::ModelDetails,
            _ => UiMode::SourceDetails,
        }
    }

    pub fn close_dialogs(&mut self) {
        self.details = None;
        self.source_editor = None;
        self.pending_delete = None;
        self.add_source = None;
        self.test_config = None;
        self.ui_mode = UiMode::Normal;
    }
}
