//! Main loop: drain the event queue, feed the state machine, redraw.
//!
//! # Event Loop
//!
//! Each iteration:
//! 1. Waits up to the poll interval for one event from the bounded queue
//! 2. Passes it to [`InputHandler`], which may request a stop
//! 3. Redraws unconditionally, so the blink timer advances without input
//!
//! The scheduler is the sole owner of [`AppState`] for the whole run.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use anyhow::{bail, Result};

use crate::clock::Clock;
use crate::constants::POLL_INTERVAL_MS;
use crate::input::{InputEvent, InputHandler};
use crate::state::AppState;

/// Something that can show the current state.
///
/// Called once per loop iteration. May advance the blink timer in `state`.
pub trait ViewPort {
    /// Redraw with `state` at time `now_ms`.
    fn update(&mut self, state: &mut AppState, now_ms: u64) -> Result<()>;
}

/// The running/stopped loop driving a single [`AppState`].
#[derive(Debug)]
pub struct Scheduler<C: Clock> {
    handler: InputHandler,
    poll_interval: Duration,
    clock: C,
}

impl<C: Clock> Scheduler<C> {
    /// Scheduler with the default poll interval.
    pub fn new(handler: InputHandler, clock: C) -> Self {
        Self::with_poll_interval(handler, clock, Duration::from_millis(POLL_INTERVAL_MS))
    }

    /// Scheduler with an explicit poll interval.
    pub fn with_poll_interval(handler: InputHandler, clock: C, poll_interval: Duration) -> Self {
        Self {
            handler,
            poll_interval,
            clock,
        }
    }

    /// The clock this scheduler reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run one iteration. Returns whether the loop should keep running.
    ///
    /// # Errors
    ///
    /// Fails if the event source has gone away or the view port cannot draw.
    pub fn step<V: ViewPort + ?Sized>(
        &self,
        state: &mut AppState,
        events: &Receiver<InputEvent>,
        view_port: &mut V,
    ) -> Result<bool> {
        let mut running = true;

        match events.recv_timeout(self.poll_interval) {
            Ok(event) => {
                log::trace!("Input {:?}", event);
                running = self
                    .handler
                    .handle_event(&event, state, self.clock.now_ms());
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                bail!("input event source disconnected");
            }
        }

        view_port.update(state, self.clock.now_ms())?;
        Ok(running)
    }

    /// Loop until a long Back press stops it.
    ///
    /// # Errors
    ///
    /// Propagates the first [`Scheduler::step`] failure.
    pub fn run<V: ViewPort + ?Sized>(
        &self,
        state: &mut AppState,
        events: &Receiver<InputEvent>,
        view_port: &mut V,
    ) -> Result<()> {
        log::info!("Scheduler loop starting");

        while self.step(state, events, view_port)? {}

        log::info!("Scheduler loop stopped");
        Ok(())
    }
}
