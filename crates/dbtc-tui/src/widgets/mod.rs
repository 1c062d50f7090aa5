//! Custom widget components

mod add_source_dialog;
mod confirm_dialog;
mod details_dialog;
mod edit_source_dialog;
mod footer;
mod form_field;
mod grid_table;
mod header;
pub mod modal_overlay;
mod models_table;
mod settings_form;
mod sources_table;
mod test_config_dialog;
mod toast;

pub use add_source_dialog::AddSourceDialog;
pub use confirm_dialog::ConfirmDeleteDialog;
pub use details_dialog::DetailsDialog;
pub use edit_source_dialog::EditSourceDialog;
pub use footer::Footer;
pub use header::MainHeader;
pub use models_table::ModelsTable;
pub use settings_form::SettingsForm;
pub use sources_table::SourcesTable;
pub use test_config_dialog::TestConfigDialog;
pub use toast::ToastView;
