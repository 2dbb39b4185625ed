//! Terminal state guard for RAII cleanup.
//!
//! This module provides a guard struct that puts the terminal into the mode
//! the counter needs and restores it even if the application panics.

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

/// Guard struct that owns the terminal's display mode.
///
/// On creation:
/// - Enables raw mode
/// - Enters the alternate screen and hides the cursor
/// - Asks for key release reporting, if the terminal supports it
///
/// When dropped, all of the above is undone, in reverse.
///
/// # Example
///
/// ```ignore
/// fn run_tui() -> Result<()> {
///     let _guard = TerminalGuard::enter()?;
///     // Run TUI loop...
///     // Guard cleans up when the function exits (normally or via panic)
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    /// Switch the terminal into full-screen raw mode.
    ///
    /// # Errors
    ///
    /// Fails if raw mode or the alternate screen cannot be entered. Anything
    /// already changed is restored before returning.
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        // From here on, Drop restores whatever was set up
        let mut guard = Self {
            keyboard_enhanced: false,
        };

        execute!(std::io::stdout(), EnterAlternateScreen, cursor::Hide)
            .context("Failed to enter alternate screen")?;

        if matches!(supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                std::io::stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )
            .context("Failed to enable key release reporting")?;
            guard.keyboard_enhanced = true;
        }
        log::info!(
            "Terminal ready (key release reporting: {})",
            guard.keyboard_enhanced
        );

        Ok(guard)
    }

    /// Whether the terminal reports key releases.
    #[must_use]
    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Always attempt to restore terminal state, ignoring errors
        if self.keyboard_enhanced {
            let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen, cursor::Show);
        log::info!("Terminal restored");
    }
}

/// Best-effort terminal restore for the panic hook, where no guard is reachable.
pub fn restore_terminal() {
    let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen, cursor::Show);
}
