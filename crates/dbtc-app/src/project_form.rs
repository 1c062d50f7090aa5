//! Project settings form (Settings view)

use dbtc_core::ProjectSettings;

use crate::text_input::{TextEdit, TextInput};

pub const FIELD_LABELS: [&str; 3] = [
    ProjectSettings::PROJECT_PATH_LABEL,
    ProjectSettings::PROFILES_PATH_LABEL,
    ProjectSettings::TARGET_LABEL,
];

pub const FIELD_HINTS: [&str; 3] = [
    "Directory containing dbt_project.yml",
    "Full path to profiles.yml",
    "Target from profiles.yml (e.g. dev, prod)",
];

/// Editable copy of [`ProjectSettings`] with per-field validation errors.
#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    inputs: [TextInput; 3],
    errors: [Option<String>; 3],
    pub focus: usize,
}

impl ProjectForm {
    pub fn from_settings(settings: &ProjectSettings) -> Self {
        Self {
            inputs: [
                TextInput::new(settings.dbt_project_path.clone()),
                TextInput::new(settings.profiles_yml_path.clone()),
                TextInput::new(settings.target_name.clone()),
            ],
            errors: Default::default(),
            focus: 0,
        }
    }

    pub fn input(&self, index: usize) -> Option<&TextInput> {
        self.inputs.get(index)
    }

    pub fn error(&self, index: usize) -> Option<&str> {
        self.errors.get(index).and_then(|e| e.as_deref())
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(Option::is_some)
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.inputs.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
    }

    pub fn is_last_focused(&self) -> bool {
        self.focus + 1 == self.inputs.len()
    }

    /// Edit the focused field and clear its error
    pub fn apply(&mut self, edit: &TextEdit) {
        self.inputs[self.focus].apply(edit);
        self.errors[self.focus] = None;
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.iter().all(TextInput::is_blank)
    }

    /// Current contents, trimmed
    pub fn to_settings(&self) -> ProjectSettings {
        ProjectSettings::new(
            self.inputs[0].trimmed(),
            self.inputs[1].trimmed(),
            self.inputs[2].trimmed(),
        )
    }

    /// Whether the form differs from `saved`
    pub fn is_dirty(&self, saved: &ProjectSettings) -> bool {
        self.to_settings() != saved.trimmed()
    }

    /// Validate every field; returns the settings when all are filled in.
    pub fn validate(&mut self) -> Option<ProjectSettings> {
        for (index, input) in self.inputs.iter().enumerate() {
            self.errors[index] = input
                .is_blank()
                .then(|| format!("{} is required", FIELD_LABELS[index]));
        }
        if let Some(first_invalid) = self.errors.iter().position(Option::is_some) {
            self.focus = first_invalid;
            return None;
        }
        Some(self.to_settings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(form: &mut ProjectForm, text: &str) {
        for c in text.chars() {
            form.apply(&TextEdit::Insert(c));
        }
    }

    #[test]
    fn test_prefill_from_settings() {
        let form = ProjectForm::from_settings(&ProjectSettings::new("/p", "/q", "dev"));
        assert_eq!(form.input(0).unwrap().value(), "/p");
        assert_eq!(form.input(2).unwrap().value(), "dev");
        assert!(!form.is_empty());
    }

    #[test]
    fn test_validate_reports_each_missing_field() {
        let mut form = ProjectForm::default();
        form.focus = 2;
        type_text(&mut form, "dev");

        assert!(form.validate().is_none());
        assert_eq!(form.error(0), Some("DBT Project Path is required"));
        assert_eq!(form.error(1), Some("profiles.yml Path is required"));
        assert_eq!(form.error(2), None);
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_validate_trims_values() {
        let mut form = ProjectForm::default();
        type_text(&mut form, " /work/shop ");
        form.focus_next();
        type_text(&mut form, "/home/me/.dbt/profiles.yml");
        form.focus_next();
        type_text(&mut form, "dev ");

        let settings = form.validate().unwrap();
        assert_eq!(
            settings,
            ProjectSettings::new("/work/shop", "/home/me/.dbt/profiles.yml", "dev")
        );
        assert!(!form.has_errors());
    }

    #[test]
    fn test_editing_clears_field_error() {
        let mut form = ProjectForm::default();
        form.validate();
        assert!(form.error(0).is_some());
        form.apply(&TextEdit::Insert('/'));
        assert_eq!(form.error(0), None);
        assert!(form.error(1).is_some());
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = ProjectForm::default();
        form.focus_previous();
        assert_eq!(form.focus, 2);
        assert!(form.is_last_focused());
        form.focus_next();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_is_dirty() {
        let saved = ProjectSettings::new("/p", "/q", "dev");
        let mut form = ProjectForm::from_settings(&saved);
        assert!(!form.is_dirty(&saved));
        form.apply(&TextEdit::Backspace);
        assert!(form.is_dirty(&saved));
    }
}
