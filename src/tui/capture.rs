//! Input capture worker.
//!
//! A dedicated thread reads terminal events, translates them into keypad
//! [`InputEvent`]s, and pushes them into the bounded queue the scheduler
//! drains. The worker never touches `AppState`.
//!
//! # Shutdown
//!
//! Dropping [`InputCapture`] sets the shutdown flag and joins the thread.
//! The worker also exits on its own when the receiver is gone or the
//! terminal read fails; either way the sender is dropped, which the
//! scheduler sees as a disconnect.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use crate::clock::Clock;
use crate::constants::CAPTURE_POLL_MS;
use crate::input::{InputEvent, KeyTranslator};

use super::keymap::{classify, KeyEdge};

/// Where raw terminal events come from.
///
/// Mirrors crossterm's poll/read pair as a single call.
pub trait RawEventSource: Send {
    /// Wait up to `timeout` for the next event. `Ok(None)` on timeout.
    fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Default event source backed by crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermSource;

impl RawEventSource for CrosstermSource {
    fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll terminal events")? {
            Ok(Some(event::read().context("Failed to read terminal event")?))
        } else {
            Ok(None)
        }
    }
}

/// Background worker feeding the event queue.
pub struct InputCapture {
    /// Shutdown flag shared with worker thread.
    shutdown: Arc<AtomicBool>,
    /// Worker thread handle.
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for InputCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputCapture")
            .field("shutdown", &self.shutdown.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl InputCapture {
    /// Start the worker thread.
    ///
    /// # Errors
    ///
    /// Fails if the thread cannot be spawned.
    pub fn spawn<S, C>(
        source: S,
        translator: KeyTranslator,
        clock: C,
        event_tx: SyncSender<InputEvent>,
    ) -> Result<Self>
    where
        S: RawEventSource + 'static,
        C: Clock + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = Arc::clone(&shutdown);

        let thread_handle = thread::Builder::new()
            .name("input-capture".to_string())
            .spawn(move || {
                Self::worker_loop(source, translator, clock, event_tx, &shutdown_clone);
            })
            .context("Failed to spawn input capture thread")?;

        Ok(Self {
            shutdown,
            thread_handle: Some(thread_handle),
        })
    }

    /// Worker loop - runs on dedicated thread.
    fn worker_loop<S: RawEventSource, C: Clock>(
        mut source: S,
        mut translator: KeyTranslator,
        clock: C,
        event_tx: SyncSender<InputEvent>,
        shutdown: &AtomicBool,
    ) {
        log::info!("Input capture started ({:?})", translator.mode());
        let poll = Duration::from_millis(CAPTURE_POLL_MS);

        while !shutdown.load(Ordering::SeqCst) {
            let raw = match source.next_event(poll) {
                Ok(raw) => raw,
                Err(e) => {
                    log::error!("Input capture: {e:#}");
                    break;
                }
            };

            let now = clock.now_ms();
            let events = match raw.as_ref().and_then(classify) {
                Some((key, KeyEdge::Down)) => translator.key_down(key, now),
                Some((key, KeyEdge::Up)) => translator.key_up(key, now),
                None => translator.tick(now),
            };

            for event in events {
                // Blocks while the queue is full
                if event_tx.send(event).is_err() {
                    log::info!("Input capture: queue receiver dropped");
                    return;
                }
            }
        }

        log::info!("Input capture shutting down");
    }

    /// Request graceful shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Whether the worker thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread_handle
            .as_ref()
            .map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for InputCapture {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                log::error!("Input capture thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::input::{InputKey, InputType, ReleaseMode};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use std::collections::VecDeque;
    use std::sync::mpsc;

    /// Replays scripted events, then reports timeouts forever.
    struct ScriptedSource {
        script: VecDeque<Result<Event>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Event>>) -> Self {
            Self {
                script: script.into(),
            }
        }
    }

    impl RawEventSource for ScriptedSource {
        fn next_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
            match self.script.pop_front() {
                Some(item) => item.map(Some),
                None => {
                    thread::sleep(Duration::from_millis(1));
                    Ok(None)
                }
            }
        }
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> Result<Event> {
        Ok(Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            kind,
        )))
    }

    fn recv(rx: &mpsc::Receiver<InputEvent>) -> InputEvent {
        rx.recv_timeout(Duration::from_secs(5))
            .expect("capture should deliver an event")
    }

    #[test]
    fn test_capture_translates_and_preserves_order() {
        let source = ScriptedSource::new(vec![
            key(KeyCode::Right, KeyEventKind::Press),
            key(KeyCode::Right, KeyEventKind::Release),
            key(KeyCode::Char('q'), KeyEventKind::Press),
            key(KeyCode::Enter, KeyEventKind::Press),
            key(KeyCode::Enter, KeyEventKind::Release),
        ]);
        let (tx, rx) = mpsc::sync_channel(8);
        let capture = InputCapture::spawn(
            source,
            KeyTranslator::new(ReleaseMode::Reported),
            ManualClock::new(0),
            tx,
        )
        .unwrap();

        let got: Vec<InputEvent> = (0..6).map(|_| recv(&rx)).collect();
        assert_eq!(
            got,
            vec![
                InputEvent::new(InputKey::Right, InputType::Press),
                InputEvent::new(InputKey::Right, InputType::Release),
                InputEvent::new(InputKey::Right, InputType::Short),
                InputEvent::new(InputKey::Ok, InputType::Press),
                InputEvent::new(InputKey::Ok, InputType::Release),
                InputEvent::new(InputKey::Ok, InputType::Short),
            ]
        );
        drop(capture);
    }

    #[test]
    fn test_source_error_disconnects_queue() {
        let source = ScriptedSource::new(vec![Err(anyhow::anyhow!("tty gone"))]);
        let (tx, rx) = mpsc::sync_channel(8);
        let _capture = InputCapture::spawn(
            source,
            KeyTranslator::new(ReleaseMode::Reported),
            ManualClock::new(0),
            tx,
        )
        .unwrap();

        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        );
    }

    #[test]
    fn test_drop_joins_worker() {
        let (tx, _rx) = mpsc::sync_channel(8);
        let capture = InputCapture::spawn(
            ScriptedSource::new(Vec::new()),
            KeyTranslator::new(ReleaseMode::Reported),
            ManualClock::new(0),
            tx,
        )
        .unwrap();
        assert!(!capture.is_finished());
        drop(capture);
    }

    #[test]
    fn test_inferred_release_arrives_via_tick() {
        let clock = ManualClock::new(0);
        let source = ScriptedSource::new(vec![key(KeyCode::Backspace, KeyEventKind::Press)]);
        let (tx, rx) = mpsc::sync_channel(8);
        let _capture = InputCapture::spawn(
            source,
            KeyTranslator::new(ReleaseMode::Inferred {
                first_gap_ms: 100,
                repeat_gap_ms: 100,
            }),
            clock.clone(),
            tx,
        )
        .unwrap();

        assert_eq!(recv(&rx), InputEvent::new(InputKey::Back, InputType::Press));
        clock.advance(150);
        let release = recv(&rx);
        assert_eq!(release, InputEvent::new(InputKey::Back, InputType::Release));
        assert_eq!(recv(&rx), InputEvent::new(InputKey::Back, InputType::Short));
    }
}
