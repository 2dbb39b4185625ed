//! Drawing surface interface.
//!
//! [`Canvas`] is the small set of primitives the renderer needs. The
//! terminal view port records them into a [`RecordingCanvas`] and paints the
//! recorded [`DrawOp`]s with ratatui; tests inspect the recording directly.

/// Axis-aligned rectangle in surface coordinates (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: u16,
    /// Top edge.
    pub y: u16,
    /// Width.
    pub width: u16,
    /// Height.
    pub height: u16,
}

impl Rect {
    /// Build a rectangle.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Text face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Regular UI text.
    #[default]
    Primary,
    /// Large digits for life totals.
    BigNumbers,
}

/// Ink color on a monochrome surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Foreground ink.
    #[default]
    Black,
    /// Background ink (erases).
    White,
}

/// Drawing primitives supplied by the host display.
pub trait Canvas {
    /// Erase the whole surface.
    fn clear(&mut self);

    /// Select the font for subsequent text.
    fn set_font(&mut self, font: Font);

    /// Select the ink for subsequent primitives.
    fn set_color(&mut self, color: Color);

    /// Straight line between two points, inclusive.
    fn draw_line(&mut self, x0: u16, y0: u16, x1: u16, y1: u16);

    /// One-pixel border along the inside edge of `rect`.
    fn draw_rect_frame(&mut self, rect: Rect);

    /// Text centered both ways on `(x, y)`.
    fn draw_text_centered(&mut self, x: u16, y: u16, text: &str);
}

/// A recorded drawing primitive, with the font and color in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// Line segment.
    Line {
        /// Start x.
        x0: u16,
        /// Start y.
        y0: u16,
        /// End x.
        x1: u16,
        /// End y.
        y1: u16,
        /// Ink.
        color: Color,
    },
    /// Rectangle border.
    Frame {
        /// Bounds.
        rect: Rect,
        /// Ink.
        color: Color,
    },
    /// Centered text.
    Text {
        /// Center x.
        x: u16,
        /// Center y.
        y: u16,
        /// Content.
        text: String,
        /// Face.
        font: Font,
        /// Ink.
        color: Color,
    },
}

/// [`Canvas`] that stores every primitive in order.
///
/// `clear` drops everything recorded so far, so after a full render the ops
/// describe exactly one frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
    font: Font,
    color: Color,
    clears: usize,
}

impl RecordingCanvas {
    /// Empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Primitives drawn since the last clear.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// How many times `clear` was called.
    #[must_use]
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Recorded frames, in order.
    pub fn frames(&self) -> impl Iterator<Item = Rect> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Frame { rect, .. } => Some(*rect),
            _ => None,
        })
    }

    /// Recorded text, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.ops.clear();
        self.font = Font::default();
        self.color = Color::default();
        self.clears += 1;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_line(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) {
        self.ops.push(DrawOp::Line {
            x0,
            y0,
            x1,
            y1,
            color: self.color,
        });
    }

    fn draw_rect_frame(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Frame {
            rect,
            color: self.color,
        });
    }

    fn draw_text_centered(&mut self, x: u16, y: u16, text: &str) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            font: self.font,
            color: self.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_captures_font_and_color() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_font(Font::BigNumbers);
        canvas.set_color(Color::White);
        canvas.draw_text_centered(1, 2, "7");

        assert_eq!(
            canvas.ops(),
            &[DrawOp::Text {
                x: 1,
                y: 2,
                text: "7".to_string(),
                font: Font::BigNumbers,
                color: Color::White,
            }]
        );
    }

    #[test]
    fn test_clear_resets_recording() {
        let mut canvas = RecordingCanvas::new();
        canvas.draw_rect_frame(Rect::new(0, 0, 4, 4));
        canvas.set_font(Font::BigNumbers);
        canvas.clear();

        assert!(canvas.ops().is_empty());
        assert_eq!(canvas.clears(), 1);
        canvas.draw_text_centered(0, 0, "x");
        assert!(matches!(
            canvas.ops()[0],
            DrawOp::Text {
                font: Font::Primary,
                ..
            }
        ));
    }
}
