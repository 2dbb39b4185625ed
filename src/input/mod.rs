//! Input events and the state machine that consumes them.
//!
//! # Architecture
//!
//! ```text
//! terminal key ──► KeyTranslator ──► InputEvent ──► queue ──► InputHandler ──► AppState
//!  (capture thread)                                          (scheduler thread)
//! ```
//!
//! # Modules
//!
//! - [`handler`] - `InputHandler`, the quadrant/edit-mode state machine
//! - [`translator`] - Raw key down/up to typed `Press`/`Short`/`Long`/... events

pub mod handler;
pub mod translator;

#[doc(inline)]
pub use handler::InputHandler;
#[doc(inline)]
pub use translator::{KeyTranslator, ReleaseMode};

/// Physical control on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Center button.
    Ok,
    /// Back button. Holding it is the only way to exit.
    Back,
}

impl InputKey {
    /// Every key, in a fixed order.
    pub const ALL: [InputKey; 6] = [
        InputKey::Up,
        InputKey::Down,
        InputKey::Left,
        InputKey::Right,
        InputKey::Ok,
        InputKey::Back,
    ];
}

/// Phase of a key interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    /// Key went down.
    Press,
    /// Key went up.
    Release,
    /// Key was released before the long-event delay.
    Short,
    /// Key has been held for the long-event delay.
    Long,
    /// Key is still held after going `Long`.
    Repeat,
}

/// A single input event as delivered to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// Which key.
    pub key: InputKey,
    /// Which phase.
    pub kind: InputType,
}

impl InputEvent {
    /// Build an event.
    pub const fn new(key: InputKey, kind: InputType) -> Self {
        Self { key, kind }
    }

    /// Shorthand for a `Short` event, the common case in tests.
    pub const fn short(key: InputKey) -> Self {
        Self::new(key, InputType::Short)
    }
}
