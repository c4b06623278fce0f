use thiserror::Error;

/// Base tick interval in milliseconds.
pub const BASE_TICK_INTERVAL_MS: u64 = 140;

/// Fastest allowed tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Interval reduction applied at each speed step, in milliseconds.
pub const SPEED_STEP_MS: u64 = 6;

/// Score points between speed steps.
pub const POINTS_PER_SPEED_STEP: u32 = 3;

/// Number of segments a fresh snake starts with.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Board sizes selectable from the command line.
pub const GRID_SIZES: &[u16] = &[12, 16, 20, 26];

/// Board size used when none is requested.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Rejected grid-size argument.
#[derive(Debug, Error)]
pub enum GridSizeError {
    #[error("grid size must be a whole number: {0}")]
    NotANumber(#[from] std::num::ParseIntError),
    #[error("unsupported grid size {0}; expected one of 12, 16, 20, 26")]
    Unsupported(u16),
}

/// Parses and validates a grid-size argument against the size menu.
pub fn parse_grid_size(raw: &str) -> Result<u16, GridSizeError> {
    let size: u16 = raw.trim().parse()?;
    if GRID_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(GridSizeError::Unsupported(size))
    }
}
