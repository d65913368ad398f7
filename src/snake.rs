use std::collections::VecDeque;

use crate::point::Point;

/// Outcome of advancing the snake by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Point, old_tail: Option<Point>, ate: bool },
    Crashed,
}

/// Snake body, head at the front. No position appears twice while alive.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Point>,
}

impl Snake {
    pub fn new(start: Point) -> Self {
        let mut body = VecDeque::new();
        body.push_back(start);
        Snake { body }
    }

    pub fn head(&self) -> Point {
        // The body is never empty: it starts with one segment and only
        // loses its tail after a new head has been pushed.
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn body(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn occupies(&self, p: Point) -> bool {
        self.body.contains(&p)
    }

    pub fn push_head(&mut self, p: Point) {
        self.body.push_front(p);
    }

    /// Removes the tail segment, keeping at least one segment in place.
    pub fn pop_tail(&mut self) -> Option<Point> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }
}
