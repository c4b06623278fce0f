use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns the adjacent position one cell away in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Square playing field, fixed for the duration of one session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: u16,
}

impl Grid {
    /// Creates a grid with `size` cells per side.
    #[must_use]
    pub fn new(size: u16) -> Self {
        debug_assert!(size > 0, "grid must have at least one cell");
        Self { size }
    }

    /// Returns the number of cells per side.
    #[must_use]
    pub fn size(self) -> u16 {
        self.size
    }

    /// Returns the total number of cells.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }

    /// Returns true when the position lies inside the board.
    #[must_use]
    pub fn in_bounds(self, position: Position) -> bool {
        let size = i32::from(self.size);
        position.x >= 0 && position.x < size && position.y >= 0 && position.y < size
    }

    /// Returns the cell at the middle of the board.
    #[must_use]
    pub fn center(self) -> Position {
        let mid = i32::from(self.size / 2);
        Position { x: mid, y: mid }
    }
}
