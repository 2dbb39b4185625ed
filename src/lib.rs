//! Life Totals - four-quadrant life counter.
//!
//! Tracks four independent life totals on a screen split into quadrants,
//! with cursor navigation, an edit mode, and a blinking edit highlight.
//!
//! # Architecture
//!
//! - **InputHandler** - Pure state machine: event + state -> state, continue/stop
//! - **Renderer** - Draws state on a `Canvas`, advancing the blink timer
//! - **Scheduler** - Drains the bounded event queue, redraws every iteration
//! - **TUI** - Terminal adapters (capture thread, ratatui painting, RAII guard)
//!
//! # Modules
//!
//! - [`clock`] - Monotonic millisecond clock
//! - [`config`] - Configuration loading
//! - [`constants`] - Timings and dimensions
//! - [`input`] - Input events, state machine, key translation
//! - [`render`] - Drawing surface interface and renderer
//! - [`scheduler`] - Main loop
//! - [`state`] - `AppState` and quadrants
//! - [`tui`] - Terminal front end

pub mod clock;
pub mod config;
pub mod constants;
pub mod input;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod tui;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::Config;
pub use input::{InputEvent, InputHandler, InputKey, InputType, KeyTranslator, ReleaseMode};
pub use render::{Canvas, RecordingCanvas, Rect, Renderer};
pub use scheduler::{Scheduler, ViewPort};
pub use state::{AppState, Quadrant};
