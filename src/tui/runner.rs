//! Full-screen lifecycle: acquire the terminal, run the loop, release.
//!
//! # Architecture
//!
//! ```text
//! Capture thread                      Main thread
//! +----------------------+            +-----------------------+
//! | InputCapture         |            | Scheduler             |
//! | - crossterm events   |--events--->| - InputHandler        |
//! | - KeyTranslator      | (bounded)  | - TerminalViewPort    |
//! +----------------------+            | - owns AppState       |
//!                                     +-----------------------+
//! ```

use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::clock::MonotonicClock;
use crate::config::Config;
use crate::input::{InputHandler, KeyTranslator};
use crate::render::Renderer;
use crate::scheduler::Scheduler;
use crate::state::AppState;

use super::capture::{CrosstermSource, InputCapture};
use super::guard::TerminalGuard;
use super::view_port::TerminalViewPort;

/// Run the counter on the current terminal until a long Back press.
///
/// Every exit path releases the capture thread, the drawing surface, and
/// the terminal mode, in that order.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, the capture thread
/// cannot start, the event source fails, or drawing fails.
pub fn run(config: &Config) -> Result<()> {
    let clock = MonotonicClock::new();

    let guard = TerminalGuard::enter()?;
    let release_mode = config.release_mode(guard.keyboard_enhanced());

    let terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))
        .context("Failed to create terminal")?;
    let mut view_port = TerminalViewPort::new(terminal, Renderer::new(config.blink_interval_ms));

    let (event_tx, event_rx) = mpsc::sync_channel(config.queue_capacity);
    let capture = InputCapture::spawn(
        CrosstermSource,
        KeyTranslator::new(release_mode),
        clock,
        event_tx,
    )?;

    let scheduler = Scheduler::with_poll_interval(
        InputHandler::new(config.long_press_ms),
        clock,
        Duration::from_millis(config.poll_interval_ms),
    );
    let mut state = AppState::new(config.initial_life);

    let result = scheduler.run(&mut state, &event_rx, &mut view_port);

    // Receiver first, so a capture thread blocked on a full queue wakes up
    drop(event_rx);
    drop(capture);
    drop(view_port);
    drop(guard);

    result
}
