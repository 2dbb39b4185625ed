//! Application-wide constants for life-totals.
//!
//! This module centralizes all magic numbers so the state machine, renderer,
//! and scheduler agree on timings and display geometry. Constants are grouped
//! by domain.
//!
//! # Categories
//!
//! - **Life**: Starting values and quadrant count
//! - **Timing**: Long press, blink, and poll intervals
//! - **Input**: Key event synthesis timings and queue sizing
//! - **Display**: Logical surface dimensions

// ============================================================================
// Life
// ============================================================================

/// Life total every quadrant starts with.
pub const INITIAL_LIFE: i64 = 40;

/// Number of tracked life totals (one per quadrant).
pub const QUADRANT_COUNT: usize = 4;

// ============================================================================
// Timing
// ============================================================================

/// Minimum Back hold, in milliseconds, that terminates the app.
pub const LONG_PRESS_THRESHOLD_MS: u64 = 3000;

/// On/off period of the edit-mode highlight frame, in milliseconds.
pub const BLINK_INTERVAL_MS: u64 = 500;

/// How long the scheduler waits on the event queue before redrawing anyway.
///
/// This is also the effective frame rate when no input arrives, so it must
/// stay well below [`BLINK_INTERVAL_MS`] for the blink to look even.
pub const POLL_INTERVAL_MS: u64 = 100;

// ============================================================================
// Input
// ============================================================================

/// Capacity of the bounded queue between input capture and the scheduler.
pub const EVENT_QUEUE_CAPACITY: usize = 8;

/// Hold time after which a key emits a single `Long` event.
pub const LONG_EVENT_DELAY_MS: u64 = 300;

/// Interval between `Repeat` events once a key has gone `Long`.
pub const REPEAT_INTERVAL_MS: u64 = 150;

/// Silence after a lone press before the key counts as released.
///
/// Only used when the terminal cannot report key releases. Must exceed the
/// terminal's initial autorepeat delay (X11 defaults to 660ms), otherwise a
/// held key reads as a tap followed by a second press.
pub const RELEASE_GAP_MS: u64 = 750;

/// Silence after an autorepeat press before the key counts as released.
///
/// Must exceed the autorepeat period, which is 25 to 40ms on common setups.
pub const REPEAT_RELEASE_GAP_MS: u64 = 200;

/// How long the capture worker blocks in `crossterm::event::poll`.
pub const CAPTURE_POLL_MS: u64 = 20;

// ============================================================================
// Display
// ============================================================================

/// Logical width of the drawing surface.
pub const DISPLAY_WIDTH: u16 = 128;

/// Logical height of the drawing surface.
pub const DISPLAY_HEIGHT: u16 = 64;
