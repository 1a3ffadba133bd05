use std::collections::VecDeque;

use crate::{Coords, TermInt};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Glyph for the snake's head when moving this way.
    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// Snake body stored head-first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
}

impl Snake {
    pub fn new(pos: Coords, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(pos);
        Snake { body, direction }
    }

    #[cfg(test)]
    pub(crate) fn from_segments(segments: &[Coords], direction: Direction) -> Self {
        assert!(!segments.is_empty());
        Snake { body: segments.iter().copied().collect(), direction }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        // never empty
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Where the head lands after one step, wrapping at the grid edges.
    pub fn next_head(&self, grid_size: TermInt) -> Coords {
        let (x, y) = self.head();

        match &self.direction {
            Up => (x, (y + grid_size - 1) % grid_size),
            Down => (x, (y + 1) % grid_size),
            Left => ((x + grid_size - 1) % grid_size, y),
            Right => ((x + 1) % grid_size, y),
        }
    }

    /// Prepends `new_head` and drops the tail unless growing.
    pub fn advance(&mut self, new_head: Coords, grow: bool) {
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.is_opposite(self.direction) {
            return false;
        }

        self.direction = new_direction;
        true
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}
