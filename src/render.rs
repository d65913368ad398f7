//! Drawing interface the engine talks to.
//!
//! The engine only ever issues deltas: a wall cell, a snake cell, a food cell
//! or an erased cell, plus the occasional line of text. A terminal adapter
//! implements [`Renderer`]; tests use [`RecordingRenderer`].

use crate::error::Result;
use crate::point::Point;

/// Play field inset from the top-left corner of the screen, leaving room
/// for the border.
pub const BUFFER_OFFSET: Point = Point::new(1, 1);

/// What a cell is painted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Wall,
    Snake,
    Food,
    Empty,
}

pub trait Renderer {
    /// Paints one board cell. `buffered` positions are relative to the play
    /// field and get [`BUFFER_OFFSET`] applied; unbuffered ones are absolute.
    fn draw_cell(&mut self, pos: Point, paint: Paint, buffered: bool) -> Result<()>;

    /// Writes text at an absolute screen position on the default background.
    fn draw_text(&mut self, pos: Point, text: &str) -> Result<()>;

    fn clear(&mut self) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}

/// Screen column/row of the left half of a cell. Cells are two columns wide
/// so they look square in a terminal.
pub fn screen_cell(pos: Point, buffered: bool) -> Point {
    let offset = if buffered { BUFFER_OFFSET } else { Point::default() };
    let p = pos.add(offset);
    Point::new(p.x * 2, p.y)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Cell { pos: Point, paint: Paint, buffered: bool },
    Text { pos: Point, text: String },
    Clear,
    Flush,
}

/// Renderer that remembers every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Buffered cells painted with `paint`, in call order.
    pub fn cells(&self, paint: Paint) -> Vec<Point> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Cell { pos, paint: p, buffered: true } if *p == paint => Some(*pos),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn draw_cell(&mut self, pos: Point, paint: Paint, buffered: bool) -> Result<()> {
        self.calls.push(DrawCall::Cell { pos, paint, buffered });
        Ok(())
    }

    fn draw_text(&mut self, pos: Point, text: &str) -> Result<()> {
        self.calls.push(DrawCall::Text { pos, text: text.to_string() });
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.calls.push(DrawCall::Clear);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.calls.push(DrawCall::Flush);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffered_cells_are_inset_and_doubled() {
        assert_eq!(screen_cell(Point::new(0, 0), true), Point::new(2, 1));
        assert_eq!(screen_cell(Point::new(3, 5), true), Point::new(8, 6));
    }

    #[test]
    fn unbuffered_cells_are_only_doubled() {
        assert_eq!(screen_cell(Point::new(0, 0), false), Point::new(0, 0));
        assert_eq!(screen_cell(Point::new(21, 3), false), Point::new(42, 3));
    }
}
