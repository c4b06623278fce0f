use std::collections::VecDeque;

use crate::grid::Position;
use crate::input::Direction;

/// Mutable snake body and direction buffering.
///
/// Segments are ordered head first. The buffered direction is plain state:
/// it sticks until replaced by a later request, it is not consumed by a
/// tick. Reversal requests are dropped both when buffered and again when
/// resolved, so the applied direction is never the opposite of the previous
/// tick's direction while the snake has a body to run into.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    applied: Direction,
    buffered: Direction,
}

impl Snake {
    /// Creates a snake of `length` cells with its head at `head`, laid out
    /// in a straight line trailing away from `direction`.
    #[must_use]
    pub fn new(head: Position, length: usize, direction: Direction) -> Self {
        debug_assert!(length >= 1, "snake needs at least a head");

        let (dx, dy) = direction.opposite().delta();
        let mut body = VecDeque::with_capacity(length);
        for offset in 0..length as i32 {
            body.push_back(Position {
                x: head.x + dx * offset,
                y: head.y + dy * offset,
            });
        }

        Self {
            body,
            applied: direction,
            buffered: direction,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty(), "snake needs at least a head");

        Self {
            body: VecDeque::from(segments),
            applied: direction,
            buffered: direction,
        }
    }

    /// Records `requested` as the next intended direction.
    ///
    /// Silently dropped when `requested` would reverse the applied direction
    /// and the snake is longer than one cell; the previously buffered value
    /// is retained. A single-cell snake has no body to reverse into and may
    /// turn any way.
    pub fn buffer_direction(&mut self, requested: Direction) {
        if self.len() > 1 && requested == self.applied.opposite() {
            return;
        }
        self.buffered = requested;
    }

    /// Promotes the buffered direction to applied and returns it.
    ///
    /// Called once per tick. A buffered value that would reverse the applied
    /// direction is ignored and the prior applied direction is kept.
    pub fn resolve_direction(&mut self) -> Direction {
        if self.len() == 1 || self.buffered != self.applied.opposite() {
            self.applied = self.buffered;
        }
        self.applied
    }

    /// Returns the head position one cell away in `direction`.
    #[must_use]
    pub fn next_head(&self, direction: Direction) -> Position {
        self.head().step(direction)
    }

    /// Prepends `new_head` and keeps the tail. Used on a food-eaten tick.
    pub fn grow(&mut self, new_head: Position) {
        self.body.push_front(new_head);
    }

    /// Prepends `new_head` and drops the tail. Used on a normal tick.
    pub fn advance(&mut self, new_head: Position) {
        self.body.push_front(new_head);
        let _ = self.body.pop_back();
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    ///
    /// The tail is included: moving into the cell the tail has not yet
    /// vacated this tick counts as a collision.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction applied on the most recent tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.applied
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
