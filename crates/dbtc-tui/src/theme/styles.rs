//! Semantic style builders.

use dbtc_app::BackendStatus;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Status styles ---
pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_yellow() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// Key names in hint lines
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

// --- Selection styles ---

/// Selected row of a table or list
pub fn selected_row() -> Style {
    Style::default()
        .fg(palette::TEXT_PRIMARY)
        .bg(palette::ROW_SELECTED_BG)
        .add_modifier(Modifier::BOLD)
}

/// "Black on Cyan" - the focused entry of a focused list
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Form styles ---
pub fn input(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(palette::TEXT_PRIMARY)
            .bg(palette::INPUT_ACTIVE_BG)
    } else {
        Style::default()
            .fg(palette::TEXT_SECONDARY)
            .bg(palette::INPUT_BG)
    }
}

pub fn label(focused: bool) -> Style {
    if focused {
        accent_bold()
    } else {
        text_secondary()
    }
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Backend health ---

/// `(icon, Style)` shown next to the backend status label
pub fn health_indicator(status: &BackendStatus) -> (&'static str, Style) {
    match status {
        BackendStatus::Healthy => (
            "●",
            Style::default()
                .fg(palette::STATUS_GREEN)
                .add_modifier(Modifier::BOLD),
        ),
        BackendStatus::Unreachable(_) => (
            "✗",
            Style::default()
                .fg(palette::STATUS_RED)
                .add_modifier(Modifier::BOLD),
        ),
        BackendStatus::Unknown => ("○", text_muted()),
    }
}
