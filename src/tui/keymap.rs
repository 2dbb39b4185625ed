//! Terminal keys to keypad keys.
//!
//! | Terminal | Keypad |
//! |---|---|
//! | `↑` `k` | Up |
//! | `↓` `j` | Down |
//! | `←` `h` | Left |
//! | `→` `l` | Right |
//! | `Enter` `Space` | Ok |
//! | `Backspace` `Esc` | Back |
//!
//! Anything else, including Ctrl/Alt chords, is not a keypad key.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::InputKey;

/// Whether a key went down (or autorepeated) or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    /// Press or autorepeat.
    Down,
    /// Release.
    Up,
}

/// Keypad key for a terminal key code.
#[must_use]
pub fn map_key(code: KeyCode) -> Option<InputKey> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(InputKey::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(InputKey::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(InputKey::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(InputKey::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputKey::Ok),
        KeyCode::Backspace | KeyCode::Esc => Some(InputKey::Back),
        _ => None,
    }
}

/// Keypad key and edge for a key event.
#[must_use]
pub fn classify_key(key: &KeyEvent) -> Option<(InputKey, KeyEdge)> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    let edge = match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => KeyEdge::Down,
        KeyEventKind::Release => KeyEdge::Up,
    };
    map_key(key.code).map(|k| (k, edge))
}

/// Keypad key and edge for any terminal event.
#[must_use]
pub fn classify(event: &Event) -> Option<(InputKey, KeyEdge)> {
    match event {
        Event::Key(key) => classify_key(key),
        _ => None,
    }
}
