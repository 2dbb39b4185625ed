//! Raw key observations to typed input events.
//!
//! Terminals report keys differently from a hardware keypad. Some send a
//! release, most only send a press followed by autorepeat presses. The
//! [`KeyTranslator`] normalizes both into the keypad's event stream:
//!
//! ```text
//! down ──► Press
//!            │ held >= long delay ──► Long ──► Repeat (every repeat interval)
//!            ▼
//! up   ──► Release ──► Short (only if Long was never sent)
//! ```
//!
//! In [`ReleaseMode::Inferred`] there is no "up": a key counts as released
//! once no press for it has arrived for a while. The wait after a lone press
//! covers the terminal's initial autorepeat delay; once autorepeat has
//! started, a much shorter wait is enough. Hold time is measured up to the
//! last press actually seen, so a tap with no autorepeat is always `Short`.

use crate::constants::{LONG_EVENT_DELAY_MS, REPEAT_INTERVAL_MS};

use super::{InputEvent, InputKey, InputType};

/// How key releases are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseMode {
    /// The terminal reports releases; [`KeyTranslator::key_up`] is authoritative.
    Reported,
    /// Releases are inferred from a pause in autorepeat presses.
    Inferred {
        /// Silence after a lone press that counts as a release.
        first_gap_ms: u64,
        /// Silence after an autorepeat press that counts as a release.
        repeat_gap_ms: u64,
    },
}

#[derive(Debug, Clone)]
struct HeldKey {
    key: InputKey,
    pressed_at: u64,
    last_seen: u64,
    long_sent: bool,
    next_repeat: u64,
}

/// Stateful converter from key down/up observations to [`InputEvent`]s.
#[derive(Debug, Clone)]
pub struct KeyTranslator {
    mode: ReleaseMode,
    long_delay_ms: u64,
    repeat_interval_ms: u64,
    held: Vec<HeldKey>,
}

impl KeyTranslator {
    /// Translator with the default long-event delay and repeat interval.
    pub fn new(mode: ReleaseMode) -> Self {
        Self::with_timings(mode, LONG_EVENT_DELAY_MS, REPEAT_INTERVAL_MS)
    }

    /// Translator with explicit timings.
    pub fn with_timings(mode: ReleaseMode, long_delay_ms: u64, repeat_interval_ms: u64) -> Self {
        Self {
            mode,
            long_delay_ms,
            // Zero would make `advance` spin forever
            repeat_interval_ms: repeat_interval_ms.max(1),
            held: Vec::new(),
        }
    }

    /// Release detection mode.
    #[must_use]
    pub fn mode(&self) -> ReleaseMode {
        self.mode
    }

    /// Whether `key` is currently considered held.
    #[must_use]
    pub fn is_held(&self, key: InputKey) -> bool {
        self.held.iter().any(|h| h.key == key)
    }

    /// A key was seen going down (or autorepeating) at `now_ms`.
    pub fn key_down(&mut self, key: InputKey, now_ms: u64) -> Vec<InputEvent> {
        let mut events = self.advance(now_ms);

        if let Some(held) = self.held.iter_mut().find(|h| h.key == key) {
            held.last_seen = now_ms;
            // The hold just grew, so Long and Repeat may be due
            events.extend(self.advance(now_ms));
            return events;
        }

        self.held.push(HeldKey {
            key,
            pressed_at: now_ms,
            last_seen: now_ms,
            long_sent: false,
            next_repeat: now_ms + self.long_delay_ms + self.repeat_interval_ms,
        });
        events.push(InputEvent::new(key, InputType::Press));
        events
    }

    /// A key was seen going up at `now_ms`.
    pub fn key_up(&mut self, key: InputKey, now_ms: u64) -> Vec<InputEvent> {
        let mut events = self.advance(now_ms);

        if let Some(pos) = self.held.iter().position(|h| h.key == key) {
            let held = self.held.remove(pos);
            Self::release(&held, &mut events);
        }
        events
    }

    /// Emit timer-driven events due at `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> Vec<InputEvent> {
        self.advance(now_ms)
    }

    fn advance(&mut self, now_ms: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let mode = self.mode;
        let long_delay = self.long_delay_ms;
        let interval = self.repeat_interval_ms;

        self.held.retain_mut(|held| {
            // Inferred holds only extend as far as the last press seen
            let (released, horizon) = match mode {
                ReleaseMode::Inferred {
                    first_gap_ms,
                    repeat_gap_ms,
                } => {
                    let gap = if held.last_seen > held.pressed_at {
                        repeat_gap_ms
                    } else {
                        first_gap_ms
                    };
                    (held.last_seen + gap <= now_ms, held.last_seen)
                }
                ReleaseMode::Reported => (false, now_ms),
            };

            if !held.long_sent && horizon.saturating_sub(held.pressed_at) >= long_delay {
                held.long_sent = true;
                events.push(InputEvent::new(held.key, InputType::Long));
            }
            if held.long_sent {
                while held.next_repeat <= horizon {
                    events.push(InputEvent::new(held.key, InputType::Repeat));
                    held.next_repeat += interval;
                }
            }

            if released {
                Self::release(held, &mut events);
                return false;
            }
            true
        });

        events
    }

    fn release(held: &HeldKey, events: &mut Vec<InputEvent>) {
        events.push(InputEvent::new(held.key, InputType::Release));
        if !held.long_sent {
            events.push(InputEvent::new(held.key, InputType::Short));
        }
    }
}
