//! Input state machine.
//!
//! Maps an [`InputEvent`] plus the current [`AppState`] to a new state and a
//! continue/stop decision. Unrecognized events are ignored; the handler never
//! fails.
//!
//! # Key bindings
//!
//! | Key | Not editing | Editing |
//! |---|---|---|
//! | Ok | select TopLeft, or enter edit mode | leave edit mode |
//! | Up / Down | select TopLeft, or switch row | life +1 / -1 |
//! | Left / Right | select TopLeft, or cycle quadrants | ignored |
//! | Back (short) | clear highlight | leave edit mode |
//! | Back (held >= threshold) | stop | stop |

use crate::constants::LONG_PRESS_THRESHOLD_MS;
use crate::state::{AppState, Quadrant};

use super::{InputEvent, InputKey, InputType};

/// The quadrant/edit-mode state machine.
#[derive(Debug, Clone, Copy)]
pub struct InputHandler {
    long_press_ms: u64,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(LONG_PRESS_THRESHOLD_MS)
    }
}

impl InputHandler {
    /// Create a handler that exits on a Back hold of at least `long_press_ms`.
    pub fn new(long_press_ms: u64) -> Self {
        Self { long_press_ms }
    }

    /// Apply `event` to `state`.
    ///
    /// Returns `false` when the app should stop, `true` otherwise.
    pub fn handle_event(&self, event: &InputEvent, state: &mut AppState, now_ms: u64) -> bool {
        match (event.key, event.kind) {
            (InputKey::Back, InputType::Press) => {
                state.back_pressed_time = now_ms;
            }
            (InputKey::Back, InputType::Release) => {
                let held = now_ms.saturating_sub(state.back_pressed_time);
                if held >= self.long_press_ms {
                    log::info!("Back held for {}ms, stopping", held);
                    return false;
                }
                Self::back_short(state);
            }
            (key, InputType::Short) => Self::short_press(key, state),
            (key @ (InputKey::Up | InputKey::Down), InputType::Repeat) if state.editing => {
                Self::adjust_highlighted(key, state);
            }
            _ => {}
        }
        true
    }

    fn back_short(state: &mut AppState) {
        if state.editing {
            log::debug!("Leaving edit mode on {:?}", state.highlighted);
            state.editing = false;
        } else if state.highlighted.is_some() {
            state.highlighted = None;
        }
    }

    fn short_press(key: InputKey, state: &mut AppState) {
        match key {
            InputKey::Ok => match state.highlighted {
                None => state.highlighted = Some(Quadrant::TopLeft),
                Some(quadrant) => {
                    state.editing = !state.editing;
                    log::debug!(
                        "{} edit mode on {:?}",
                        if state.editing { "Entering" } else { "Leaving" },
                        quadrant
                    );
                }
            },
            InputKey::Up | InputKey::Down => {
                if state.editing {
                    Self::adjust_highlighted(key, state);
                } else {
                    state.highlighted = Some(
                        state
                            .highlighted
                            .map_or(Quadrant::TopLeft, Quadrant::vertical_neighbor),
                    );
                }
            }
            InputKey::Left | InputKey::Right => {
                if state.editing {
                    return;
                }
                state.highlighted = Some(match (state.highlighted, key) {
                    (None, _) => Quadrant::TopLeft,
                    (Some(quadrant), InputKey::Right) => quadrant.next(),
                    (Some(quadrant), _) => quadrant.previous(),
                });
            }
            // Back is driven by Press/Release
            InputKey::Back => {}
        }
    }

    fn adjust_highlighted(key: InputKey, state: &mut AppState) {
        let Some(quadrant) = state.highlighted else {
            return;
        };
        let delta = if key == InputKey::Up { 1 } else { -1 };
        state.adjust_life(quadrant, delta);
        log::debug!("{:?} life now {}", quadrant, state.life_of(quadrant));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn back(kind: InputType) -> InputEvent {
        InputEvent::new(InputKey::Back, kind)
    }

    fn editing_top_left() -> AppState {
        let mut state = AppState::default();
        state.highlighted = Some(Quadrant::TopLeft);
        state.editing = true;
        state
    }

    #[test]
    fn test_back_press_records_time_only() {
        let handler = InputHandler::default();
        let mut state = AppState::default();

        assert!(handler.handle_event(&back(InputType::Press), &mut state, 1234));

        let mut expected = AppState::default();
        expected.back_pressed_time = 1234;
        assert_eq!(state, expected);
    }

    #[test]
    fn test_long_back_release_stops_without_mutation() {
        let handler = InputHandler::default();
        let mut state = editing_top_left();
        handler.handle_event(&back(InputType::Press), &mut state, 1_000);
        let before = state.clone();

        assert!(!handler.handle_event(&back(InputType::Release), &mut state, 4_000));
        assert_eq!(state, before);
    }

    #[test]
    fn test_short_back_release_leaves_edit_mode_keeps_highlight() {
        let handler = InputHandler::default();
        let mut state = editing_top_left();
        handler.handle_event(&back(InputType::Press), &mut state, 1_000);

        assert!(handler.handle_event(&back(InputType::Release), &mut state, 1_200));
        assert!(!state.editing);
        assert_eq!(state.highlighted, Some(Quadrant::TopLeft));
    }

    #[test]
    fn test_short_back_release_clears_highlight() {
        let handler = InputHandler::default();
        let mut state = AppState::default();
        state.highlighted = Some(Quadrant::BottomRight);
        handler.handle_event(&back(InputType::Press), &mut state, 0);

        assert!(handler.handle_event(&back(InputType::Release), &mut state, 2_999));
        assert_eq!(state.highlighted, None);
    }

    #[test]
    fn test_short_back_release_without_highlight_is_noop() {
        let handler = InputHandler::default();
        let mut state = AppState::default();
        handler.handle_event(&back(InputType::Press), &mut state, 50);
        let before = state.clone();

        assert!(handler.handle_event(&back(InputType::Release), &mut state, 60));
        assert_eq!(state, before);
    }

    #[test]
    fn test_ok_selects_then_toggles_edit_mode() {
        let handler = InputHandler::default();
        let mut state = AppState::default();
        let ok = InputEvent::short(InputKey::Ok);

        handler.handle_event(&ok, &mut state, 0);
        assert_eq!(state.highlighted, Some(Quadrant::TopLeft));
        assert!(!state.editing);

        handler.handle_event(&ok, &mut state, 0);
        assert!(state.editing);

        handler.handle_event(&ok, &mut state, 0);
        assert!(!state.editing);
        assert_eq!(state.highlighted, Some(Quadrant::TopLeft));
    }

    #[test]
    fn test_up_down_adjust_life_when_editing() {
        let handler = InputHandler::default();
        let mut state = editing_top_left();

        handler.handle_event(&InputEvent::short(InputKey::Up), &mut state, 0);
        handler.handle_event(&InputEvent::short(InputKey::Up), &mut state, 0);
        handler.handle_event(&InputEvent::short(InputKey::Down), &mut state, 0);
        assert_eq!(state.life, [41, 40, 40, 40]);
    }

    #[test]
    fn test_repeat_adjusts_only_when_editing() {
        let handler = InputHandler::default();
        let repeat_down = InputEvent::new(InputKey::Down, InputType::Repeat);

        let mut state = editing_top_left();
        handler.handle_event(&repeat_down, &mut state, 0);
        assert_eq!(state.life_of(Quadrant::TopLeft), 39);

        let mut idle = AppState::default();
        idle.highlighted = Some(Quadrant::TopLeft);
        handler.handle_event(&repeat_down, &mut idle, 0);
        assert_eq!(idle, {
            let mut s = AppState::default();
            s.highlighted = Some(Quadrant::TopLeft);
            s
        });
    }

    #[test]
    fn test_up_down_switch_rows_when_not_editing() {
        let handler = InputHandler::default();
        let mut state = AppState::default();

        handler.handle_event(&InputEvent::short(InputKey::Down), &mut state, 0);
        assert_eq!(state.highlighted, Some(Quadrant::TopLeft));

        handler.handle_event(&InputEvent::short(InputKey::Down), &mut state, 0);
        assert_eq!(state.highlighted, Some(Quadrant::BottomLeft));

        handler.handle_event(&InputEvent::short(InputKey::Up), &mut state, 0);
        assert_eq!(state.highlighted, Some(Quadrant::TopLeft));
        assert_eq!(state.life, [40; 4]);
    }

    #[test]
    fn test_left_right_cycle_quadrants() {
        let handler = InputHandler::default();
        let mut state = AppState::default();
        let right = InputEvent::short(InputKey::Right);

        handler.handle_event(&right, &mut state, 0);
        assert_eq!(state.highlighted, Some(Quadrant::TopLeft));
        handler.handle_event(&right, &mut state, 0);
        assert_eq!(state.highlighted, Some(Quadrant::TopRight));
        handler.handle_event(&right, &mut state, 0);
        handler.handle_event(&right, &mut state, 0);
        assert_eq!(state.highlighted, Some(Quadrant::BottomRight));
        handler.handle_event(&right, &mut state, 0);
        assert_eq!(state.highlighted, Some(Quadrant::TopLeft));

        handler.handle_event(&InputEvent::short(InputKey::Left), &mut state, 0);
        assert_eq!(state.highlighted, Some(Quadrant::BottomRight));
    }

    #[test]
    fn test_left_right_ignored_when_editing() {
        let handler = InputHandler::default();
        let mut state = editing_top_left();
        let before = state.clone();

        handler.handle_event(&InputEvent::short(InputKey::Right), &mut state, 0);
        handler.handle_event(&InputEvent::short(InputKey::Left), &mut state, 0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_other_event_types_are_ignored() {
        let handler = InputHandler::default();
        let mut state = editing_top_left();
        let before = state.clone();

        for key in InputKey::ALL {
            for kind in [InputType::Press, InputType::Release, InputType::Long] {
                if key == InputKey::Back {
                    continue;
                }
                assert!(handler.handle_event(&InputEvent::new(key, kind), &mut state, 0));
            }
        }
        assert!(handler.handle_event(&back(InputType::Short), &mut state, 0));
        assert!(handler.handle_event(&back(InputType::Long), &mut state, 0));
        assert!(handler.handle_event(&back(InputType::Repeat), &mut state, 0));
        assert_eq!(state, before);
    }

    #[test]
    fn test_custom_threshold() {
        let handler = InputHandler::new(100);
        let mut state = AppState::default();
        handler.handle_event(&back(InputType::Press), &mut state, 0);
        assert!(!handler.handle_event(&back(InputType::Release), &mut state, 100));
    }
}
