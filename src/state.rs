//! Application state for the life counter.
//!
//! [`AppState`] is the single mutable instance owned by the scheduler. The
//! input state machine and the renderer both borrow it mutably, one at a
//! time, so no locking is needed.

use crate::constants::{INITIAL_LIFE, QUADRANT_COUNT};
use crate::render::Rect;

/// One of the four screen regions, each tracking its own life total.
///
/// Variants are in reading order, which is also the index into
/// [`AppState::life`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Upper left.
    TopLeft,
    /// Upper right.
    TopRight,
    /// Lower left.
    BottomLeft,
    /// Lower right.
    BottomRight,
}

impl Quadrant {
    /// All quadrants in reading order.
    pub const ALL: [Quadrant; QUADRANT_COUNT] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Index into the life array.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }

    /// Next quadrant in reading order, wrapping to `TopLeft`.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % QUADRANT_COUNT]
    }

    /// Previous quadrant in reading order, wrapping to `BottomRight`.
    #[must_use]
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + QUADRANT_COUNT - 1) % QUADRANT_COUNT]
    }

    /// Quadrant in the other row, same column.
    #[must_use]
    pub fn vertical_neighbor(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomLeft,
            Self::TopRight => Self::BottomRight,
            Self::BottomLeft => Self::TopLeft,
            Self::BottomRight => Self::TopRight,
        }
    }

    fn is_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    fn is_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight)
    }

    /// Screen rectangle of this quadrant on a `width` x `height` surface.
    ///
    /// Every quadrant is exactly half the width and half the height.
    #[must_use]
    pub fn rect(self, width: u16, height: u16) -> Rect {
        let w = width / 2;
        let h = height / 2;
        Rect {
            x: if self.is_right() { w } else { 0 },
            y: if self.is_bottom() { h } else { 0 },
            width: w,
            height: h,
        }
    }

    /// Center point of this quadrant, where its life total is drawn.
    #[must_use]
    pub fn center(self, width: u16, height: u16) -> (u16, u16) {
        let rect = self.rect(width, height);
        (rect.x + rect.width / 2, rect.y + rect.height / 2)
    }
}

/// Mutable state of a running counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Life totals indexed by [`Quadrant::index`]. Unclamped.
    pub life: [i64; QUADRANT_COUNT],
    /// Quadrant under cursor focus, if any.
    pub highlighted: Option<Quadrant>,
    /// Whether the highlighted quadrant's value is being edited.
    pub editing: bool,
    /// Clock reading when Back last went down.
    pub back_pressed_time: u64,
    /// Clock reading of the last blink toggle.
    pub last_blink_time: u64,
    /// Whether the edit-mode frame is currently visible.
    pub blink_state: bool,
}

impl AppState {
    /// Fresh state with every quadrant at `initial_life`.
    pub fn new(initial_life: i64) -> Self {
        Self {
            life: [initial_life; QUADRANT_COUNT],
            highlighted: None,
            editing: false,
            back_pressed_time: 0,
            last_blink_time: 0,
            blink_state: false,
        }
    }

    /// Life total of `quadrant`.
    #[must_use]
    pub fn life_of(&self, quadrant: Quadrant) -> i64 {
        self.life[quadrant.index()]
    }

    /// Add `delta` to the life of `quadrant`, wrapping instead of panicking.
    pub fn adjust_life(&mut self, quadrant: Quadrant, delta: i64) {
        let slot = &mut self.life[quadrant.index()];
        *slot = slot.wrapping_add(delta);
    }

    /// Whether the blink timer is allowed to run.
    #[must_use]
    pub fn is_blinking(&self) -> bool {
        self.editing && self.highlighted.is_some()
    }

    /// Advance the blink phase.
    ///
    /// Toggles `blink_state` at most once per call, and only when editing a
    /// highlighted quadrant and `interval_ms` has passed since the last
    /// toggle. Returns whether a toggle happened.
    pub fn update_blink(&mut self, now_ms: u64, interval_ms: u64) -> bool {
        if !self.is_blinking() {
            return false;
        }
        if now_ms.saturating_sub(self.last_blink_time) < interval_ms {
            return false;
        }
        self.blink_state = !self.blink_state;
        self.last_blink_time = now_ms;
        true
    }

    /// Editing requires a highlight.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        !self.editing || self.highlighted.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(INITIAL_LIFE)
    }
}
