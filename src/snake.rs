use std::collections::VecDeque;

use Direction::*;

/// A pixel position on the board, always a multiple of the grid unit
pub type Cell = (i32, i32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit step on screen axes (y grows downwards)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }

    /// Only the two perpendicular turns are transitions. Carrying on in the
    /// same direction is a no-op and a reversal is rejected.
    pub fn can_turn_to(self, next: Direction) -> bool {
        self != next && !self.is_opposite(next)
    }
}

pub struct Snake {
    head: Cell,
    direction: Direction,
    step: i32,
    body: VecDeque<Cell>,
    max_length: usize,
}

impl Snake {
    /// A snake with an empty body at `head`. The body fills in behind the
    /// head over the first `max_length` moves.
    pub fn new(head: Cell, direction: Direction, step: i32, max_length: usize) -> Self {
        Snake { head, direction, step, body: VecDeque::with_capacity(max_length + 1), max_length }
    }

    pub fn head(&self) -> Cell {
        self.head
    }

    /// Body cells, head first
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn velocity(&self) -> (i32, i32) {
        let (dx, dy) = self.direction.delta();
        (dx * self.step, dy * self.step)
    }

    /// Advances the head by one velocity step and drops the tail once the
    /// body is longer than `max_length`. Bounds are not checked here.
    pub fn move_step(&mut self) -> Cell {
        let (vx, vy) = self.velocity();
        self.head = (self.head.0 + vx, self.head.1 + vy);
        self.body.push_front(self.head);

        if self.body.len() > self.max_length {
            self.body.pop_back();
        }

        self.head
    }

    /// Turns toward `new_direction` unless it would reverse the snake.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if !self.direction.is_opposite(new_direction) {
            self.direction = new_direction;
        }
    }

    pub fn grow(&mut self) {
        self.max_length += 1;
    }

    /// True when the head shares a cell with any other segment
    pub fn bites_itself(&self) -> bool {
        self.body.iter().skip(1).any(|cell| *cell == self.head)
    }
}
