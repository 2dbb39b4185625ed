//! Life total rendering.
//!
//! [`Renderer::render`] draws one frame of [`AppState`] onto any [`Canvas`]:
//!
//! ```text
//! +--------+--------+
//! |   40   |   40   |
//! +--------+--------+
//! |   40   |   40   |
//! +--------+--------+
//! ```
//!
//! The highlighted quadrant gets a frame: solid while selecting, blinking at
//! the blink interval while editing. Rendering only mutates the blink timer.

pub mod canvas;

#[doc(inline)]
pub use canvas::{Canvas, Color, DrawOp, Font, Rect, RecordingCanvas};

use crate::constants::{BLINK_INTERVAL_MS, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::state::{AppState, Quadrant};

/// Draws [`AppState`] on a fixed-size surface.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    width: u16,
    height: u16,
    blink_interval_ms: u64,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(BLINK_INTERVAL_MS)
    }
}

impl Renderer {
    /// Renderer for the standard 128x64 surface.
    pub fn new(blink_interval_ms: u64) -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            blink_interval_ms,
        }
    }

    /// Surface size as `(width, height)`.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Draw one frame and advance the blink timer.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, state: &mut AppState, now_ms: u64) {
        let (w, h) = (self.width, self.height);

        canvas.clear();
        canvas.set_font(Font::Primary);

        canvas.draw_line(w / 2, 0, w / 2, h);
        canvas.draw_line(0, h / 2, w, h / 2);

        canvas.set_font(Font::BigNumbers);
        for quadrant in Quadrant::ALL {
            let (x, y) = quadrant.center(w, h);
            canvas.draw_text_centered(x, y, &format_life(state.life_of(quadrant)));
        }

        let Some(quadrant) = state.highlighted else {
            return;
        };
        let rect = quadrant.rect(w, h);

        if state.editing {
            state.update_blink(now_ms, self.blink_interval_ms);
            if state.blink_state {
                canvas.set_color(Color::Black);
                canvas.draw_rect_frame(rect);
            }
        } else {
            canvas.set_color(Color::Black);
            canvas.draw_rect_frame(rect);
        }
    }
}

/// Plain decimal, no padding, leading `-` when negative.
#[must_use]
pub fn format_life(value: i64) -> String {
    value.to_string()
}
