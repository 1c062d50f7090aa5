//! Key event handlers for different UI modes

use crate::add_source::AddSourceFocus;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode, View};
use crate::test_config::FocusedRow;
use crate::text_input::TextEdit;

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Force quit with Ctrl+C from anywhere
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match state.ui_mode {
        UiMode::Normal => match state.view {
            View::Settings => handle_key_settings(state, key),
            View::Sources => handle_key_sources(key),
            View::Models => handle_key_models(key),
        },
        UiMode::SourceDetails => handle_key_details(key),
        UiMode::ModelDetails => handle_key_details(key),
        UiMode::EditSource => handle_key_edit_source(key),
        UiMode::ConfirmDeleteSource => handle_key_confirm_delete(key),
        UiMode::AddSource => handle_key_add_source(state, key),
        UiMode::TestConfig => handle_key_test_config(state, key),
    }
}

/// Keys shared by the Sources and Models tables
fn handle_key_table(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') => Some(Message::Quit),

        // View switching
        InputKey::Char('1') => Some(Message::SwitchView(View::Sources)),
        InputKey::Char('2') => Some(Message::SwitchView(View::Models)),
        InputKey::Char('3') => Some(Message::SwitchView(View::Settings)),
        InputKey::Tab => Some(Message::NextView),
        InputKey::BackTab => Some(Message::PreviousView),

        // Row navigation
        InputKey::Char('j') | InputKey::Down => Some(Message::GridNext),
        InputKey::Char('k') | InputKey::Up => Some(Message::GridPrevious),
        InputKey::Char('g') | InputKey::Home => Some(Message::GridFirst),
        InputKey::Char('G') | InputKey::End => Some(Message::GridLast),

        // Paging
        InputKey::Right | InputKey::Char(']') | InputKey::PageDown => {
            Some(Message::GridNextPage)
        }
        InputKey::Left | InputKey::Char('[') | InputKey::PageUp => {
            Some(Message::GridPreviousPage)
        }

        InputKey::Char('r') | InputKey::F(5) => Some(Message::Refresh),

        _ => None,
    }
}

fn handle_key_sources(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Char('v') => Some(Message::OpenSourceDetails),
        InputKey::Char('e') => Some(Message::OpenEditSource),
        InputKey::Char('d') | InputKey::Delete => Some(Message::OpenDeleteSource),
        InputKey::Char('a') => Some(Message::OpenAddSource),
        _ => handle_key_table(key),
    }
}

fn handle_key_models(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Char('v') => Some(Message::OpenModelDetails),
        _ => handle_key_table(key),
    }
}

/// Settings form: every printable key is text, so view shortcuts are limited
/// to Tab/Shift+Tab.
fn handle_key_settings(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Tab => Some(Message::NextView),
        InputKey::BackTab => Some(Message::PreviousView),
        InputKey::Esc if state.is_configured() => Some(Message::SwitchView(View::Sources)),

        InputKey::Down => Some(Message::FocusNext),
        InputKey::Up => Some(Message::FocusPrevious),

        InputKey::Enter if state.project_form.is_last_focused() => {
            Some(Message::SaveProjectSettings)
        }
        InputKey::Enter => Some(Message::FocusNext),
        InputKey::CharCtrl('s') => Some(Message::SaveProjectSettings),

        _ => text_edit(&key).map(Message::FormInput),
    }
}

fn handle_key_details(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Char('q') => Some(Message::CloseDialog),
        InputKey::Char('j') | InputKey::Down => Some(Message::DetailsNextTest),
        InputKey::Char('k') | InputKey::Up => Some(Message::DetailsPreviousTest),
        InputKey::Char('a') => Some(Message::OpenAddTest),
        InputKey::Char('x') | InputKey::Delete => Some(Message::RemoveSelectedTest),
        _ => None,
    }
}

fn handle_key_edit_source(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CloseDialog),
        InputKey::Tab | InputKey::Down => Some(Message::FocusNext),
        InputKey::BackTab | InputKey::Up => Some(Message::FocusPrevious),
        InputKey::Enter | InputKey::CharCtrl('s') => Some(Message::Submit),
        _ => text_edit(&key).map(Message::FormInput),
    }
}

fn handle_key_confirm_delete(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => Some(Message::ConfirmDelete),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::CloseDialog),
        _ => None,
    }
}

fn handle_key_add_source(state: &AppState, key: InputKey) -> Option<Message> {
    let focus = state.add_source.as_ref().map(|d| d.focus)?;
    let is_list = matches!(focus, AddSourceFocus::Schemas | AddSourceFocus::Tables);

    match key {
        InputKey::Esc => Some(Message::CloseDialog),
        InputKey::Tab => Some(Message::FocusNext),
        InputKey::BackTab => Some(Message::FocusPrevious),
        InputKey::CharCtrl('s') => Some(Message::Submit),

        InputKey::Down => Some(Message::ListNext),
        InputKey::Up => Some(Message::ListPrevious),

        InputKey::Enter | InputKey::Char(' ') if is_list => Some(Message::Toggle),
        InputKey::Enter => Some(Message::FocusNext),

        _ if !is_list => text_edit(&key).map(Message::FormInput),
        _ => None,
    }
}

fn handle_key_test_config(state: &AppState, key: InputKey) -> Option<Message> {
    let dialog = state.test_config.as_ref()?;

    match key {
        InputKey::Esc => Some(Message::CloseDialog),
        InputKey::Tab | InputKey::Down => Some(Message::FocusNext),
        InputKey::BackTab | InputKey::Up => Some(Message::FocusPrevious),
        InputKey::CharCtrl('s') => Some(Message::Submit),

        InputKey::Enter if dialog.focused_is_list() => Some(Message::ArrayPush),
        InputKey::Enter => Some(Message::Submit),

        InputKey::Right => Some(Message::CycleOption { forward: true }),
        InputKey::Left => Some(Message::CycleOption { forward: false }),
        InputKey::Char(' ') if !dialog.focused_accepts_text() => {
            Some(Message::CycleOption { forward: true })
        }

        _ => match dialog.focused_row() {
            FocusedRow::Field(row) if row.accepts_text() => text_edit(&key).map(Message::FormInput),
            _ => None,
        },
    }
}

/// Text editing keys common to every input field
fn text_edit(key: &InputKey) -> Option<TextEdit> {
    match key {
        InputKey::Backspace => Some(TextEdit::Backspace),
        InputKey::CharCtrl('u') => Some(TextEdit::Clear),
        _ => key.printable().map(TextEdit::Insert),
    }
}
