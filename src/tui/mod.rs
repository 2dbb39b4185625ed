//! TUI - Terminal User Interface.
//!
//! Adapts the counter to a terminal: crossterm supplies key events, ratatui
//! is the drawing surface.
//!
//! # Modules
//!
//! - [`capture`] - Input capture worker thread (producer side of the queue)
//! - [`guard`] - Terminal state RAII guard for cleanup
//! - [`keymap`] - Terminal key to keypad key mapping
//! - [`runner`] - `run()`, the full-screen lifecycle
//! - [`view_port`] - ratatui painting of rendered frames

pub mod capture;
pub mod guard;
pub mod keymap;
pub mod runner;
pub mod view_port;

#[doc(inline)]
pub use capture::{CrosstermSource, InputCapture, RawEventSource};
#[doc(inline)]
pub use guard::{restore_terminal, TerminalGuard};
#[doc(inline)]
pub use runner::run;
#[doc(inline)]
pub use view_port::TerminalViewPort;
