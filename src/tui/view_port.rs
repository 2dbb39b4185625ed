//! Terminal view port.
//!
//! Renders [`AppState`] into a [`RecordingCanvas`], then paints the recorded
//! operations onto a ratatui braille canvas scaled to the terminal.
//!
//! # Coordinates
//!
//! The logical surface is 128x64 with the origin at the top-left. ratatui's
//! canvas has its origin at the bottom-left, so y is flipped on the way out.
//! Points on the far edge (x = 128, y = 64) are clamped onto the last pixel.

use anyhow::{Context, Result};
use ratatui::{
    backend::Backend,
    layout::Rect as TermRect,
    style::{Color as TermColor, Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::canvas::{Canvas as TermCanvas, Line as CanvasLine, Rectangle},
    Frame, Terminal,
};

use crate::render::{Color, DrawOp, Font, RecordingCanvas, Renderer};
use crate::scheduler::ViewPort;
use crate::state::AppState;

/// [`ViewPort`] that draws on a ratatui terminal.
///
/// The `B` type parameter is the ratatui backend type. For production use,
/// this is `CrosstermBackend<Stdout>`. For testing, `TestBackend` can be used.
pub struct TerminalViewPort<B: Backend> {
    terminal: Terminal<B>,
    renderer: Renderer,
    canvas: RecordingCanvas,
}

impl<B: Backend> std::fmt::Debug for TerminalViewPort<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalViewPort")
            .field("renderer", &self.renderer)
            .field("ops", &self.canvas.ops().len())
            .finish_non_exhaustive()
    }
}

impl<B: Backend> TerminalViewPort<B> {
    /// Wrap a terminal.
    pub fn new(terminal: Terminal<B>, renderer: Renderer) -> Self {
        Self {
            terminal,
            renderer,
            canvas: RecordingCanvas::new(),
        }
    }

    /// The underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Operations drawn in the last frame.
    #[must_use]
    pub fn last_frame(&self) -> &[DrawOp] {
        self.canvas.ops()
    }
}

impl<B> ViewPort for TerminalViewPort<B>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    fn update(&mut self, state: &mut AppState, now_ms: u64) -> Result<()> {
        self.renderer.render(&mut self.canvas, state, now_ms);

        let ops = self.canvas.ops();
        let size = self.renderer.size();
        self.terminal
            .draw(|frame| {
                let area = frame.area();
                paint(frame, area, ops, size);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }
}

fn ink(color: Color) -> TermColor {
    match color {
        Color::Black => TermColor::Reset,
        Color::White => TermColor::Black,
    }
}

fn text_style(font: Font, color: Color) -> Style {
    let style = Style::default().fg(ink(color));
    match font {
        Font::BigNumbers => style.add_modifier(Modifier::BOLD),
        Font::Primary => style,
    }
}

/// Paint recorded operations for a `size` (width, height) surface into `area`.
pub fn paint(frame: &mut Frame, area: TermRect, ops: &[DrawOp], size: (u16, u16)) {
    let (width, height) = size;
    if width == 0 || height == 0 || area.width == 0 || area.height == 0 {
        return;
    }
    let max_x = f64::from(width - 1);
    let max_y = f64::from(height - 1);
    let px = |x: u16| f64::from(x.min(width - 1));
    let py = |y: u16| max_y - f64::from(y.min(height - 1));
    // One terminal column in logical units, for centering labels
    let cell_width = f64::from(width) / f64::from(area.width);

    let canvas = TermCanvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, max_x])
        .y_bounds([0.0, max_y])
        .paint(move |ctx| {
            for op in ops {
                match op {
                    DrawOp::Line {
                        x0,
                        y0,
                        x1,
                        y1,
                        color,
                    } => ctx.draw(&CanvasLine {
                        x1: px(*x0),
                        y1: py(*y0),
                        x2: px(*x1),
                        y2: py(*y1),
                        color: ink(*color),
                    }),
                    DrawOp::Frame { rect, color } => {
                        if rect.width == 0 || rect.height == 0 {
                            continue;
                        }
                        let right = rect.x.saturating_add(rect.width - 1);
                        let bottom = rect.y.saturating_add(rect.height - 1);
                        ctx.draw(&Rectangle {
                            x: px(rect.x),
                            y: py(bottom),
                            width: px(right) - px(rect.x),
                            height: py(rect.y) - py(bottom),
                            color: ink(*color),
                        });
                    }
                    DrawOp::Text {
                        x,
                        y,
                        text,
                        font,
                        color,
                    } => {
                        let half = text.chars().count() as f64 * cell_width / 2.0;
                        ctx.print(
                            (px(*x) - half).max(0.0),
                            py(*y),
                            Line::styled(text.clone(), text_style(*font, *color)),
                        );
                    }
                }
            }
        });

    frame.render_widget(canvas, area);
}
