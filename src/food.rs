use rand::Rng;

use crate::grid::{Grid, Position};
use crate::snake::Snake;

/// Attempt budget for randomized placement before the deterministic fallback.
pub const MAX_SPAWN_ATTEMPTS: u32 = 200;

/// Picks a spawn position for food, avoiding the snake where possible.
///
/// Draws uniformly random cells until one is unoccupied, up to
/// [`MAX_SPAWN_ATTEMPTS`]. Past the budget the position is computed from the
/// head instead and is not re-checked against the body, so on a near-full
/// board it may land on an occupied cell.
#[must_use]
pub fn spawn_food<R: Rng + ?Sized>(rng: &mut R, grid: Grid, snake: &Snake) -> Position {
    let size = i32::from(grid.size());

    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..size),
            y: rng.gen_range(0..size),
        };
        if !snake.occupies(candidate) {
            return candidate;
        }
    }

    let head = snake.head();
    Position {
        x: (head.x + 3) % size,
        y: (head.y + 3) % size,
    }
}
