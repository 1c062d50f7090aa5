//! Abstract input key event, independent of terminal library.
//!
//! The TUI converts crossterm key events into `InputKey` so the state machine
//! can be driven (and tested) without a terminal.

/// Abstract input key event, independent of terminal library.
/// Converted from crossterm::event::KeyEvent at the TUI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    // Character keys
    /// Regular character key (a-z, 0-9, symbols, space)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+s, Ctrl+c, etc.)
    CharCtrl(char),

    // Navigation
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    // Action keys
    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Delete,

    /// Function key (F1-F12)
    F(u8),
}

impl InputKey {
    /// Printable character carried by this key, if any
    pub fn printable(&self) -> Option<char> {
        match self {
            InputKey::Char(c) if !c.is_control() => Some(*c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_key_equality() {
        assert_eq!(InputKey::Char('a'), InputKey::Char('a'));
        assert_ne!(InputKey::Char('a'), InputKey::Char('b'));
        assert_ne!(InputKey::CharCtrl('s'), InputKey::Char('s'));
    }

    #[test]
    fn test_printable() {
        assert_eq!(InputKey::Char('x').printable(), Some('x'));
        assert_eq!(InputKey::Char(' ').printable(), Some(' '));
        assert_eq!(InputKey::CharCtrl('x').printable(), None);
        assert_eq!(InputKey::Enter.printable(), None);
    }
}
