use std::collections::VecDeque;

use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit step on the board; y grows downwards.
    pub fn delta(self) -> Coords {
        match self {
            Up => Coords::new(0, -1),
            Down => Coords::new(0, 1),
            Left => Coords::new(-1, 0),
            Right => Coords::new(1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Left | Right)
    }

    /// Same axis, either way.
    pub fn is_parallel(self, other: Direction) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }
}

#[derive(Clone, Debug)]
pub struct Snake {
    // Head at the front
    body: VecDeque<Coords>,
    heading: Direction,
    pending: Option<Direction>,
    vacated: Option<Coords>,
}

impl Snake {
    /// Lays `size` segments out behind `head`, against `heading`.
    pub fn new(head: Coords, size: usize, heading: Direction) -> Self {
        let back = heading.delta() * Coords::splat(-1);

        let body = (0..size.max(1) as i32)
            .map(|i| head + back * Coords::splat(i))
            .collect();
        Snake { body, heading, pending: None, vacated: None }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn pending_heading(&self) -> Option<Direction> {
        self.pending
    }

    /// Cell the tail left on the last `step`, if any.
    pub fn vacated(&self) -> Option<Coords> {
        self.vacated
    }

    /// Queues a turn for the next step. Turns along the current axis are
    /// dropped, so the snake can never reverse into its own neck. Returns
    /// whether the request was accepted.
    pub fn request_heading(&mut self, dir: Direction) -> bool {
        if dir.is_parallel(self.heading) || self.pending == Some(dir) {
            return false;
        }

        self.pending = Some(dir);
        true
    }

    /// Moves one cell along the (possibly just updated) heading. Every segment
    /// takes the place of the one ahead of it. No bounds or collision checks.
    pub fn step(&mut self) -> Coords {
        if let Some(dir) = self.pending.take() {
            self.heading = dir;
        }

        let new_head = self.head() + self.heading.delta();
        self.body.push_front(new_head);
        self.vacated = self.body.pop_back();

        new_head
    }

    /// Puts the tail back where it was before the last step and returns it.
    pub fn grow(&mut self) -> Option<Coords> {
        let tail = self.vacated.take()?;
        self.body.push_back(tail);
        Some(tail)
    }

    /// True if the head shares a cell with any other segment.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|pos| *pos == head)
    }
}
