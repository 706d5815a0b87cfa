//! Terminal-agnostic key representation.
//!
//! The TUI layer converts crossterm events into this enum so the
//! handlers (and their tests) never depend on a terminal backend.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Char(char),
    CharCtrl(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}
