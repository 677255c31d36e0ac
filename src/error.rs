use thiserror::Error;

use crate::grid::{Cell, Coord};

/// Reasons a game refuses to start.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("block size must be positive")]
    ZeroBlockSize,
    /// The grid has no cell inside its barrier ring.
    #[error("grid of {cols}x{rows} blocks has no room inside the barrier")]
    GridTooSmall { cols: Coord, rows: Coord },
    /// More blocks per side than `Grid::MAX_SIDE`.
    #[error("grid of {cols}x{rows} blocks is too large")]
    GridTooLarge { cols: u32, rows: u32 },
    #[error("initial snake length must be at least 1")]
    ZeroLength,
    /// Some initial cell, head included, would sit on the barrier.
    #[error("no clearance for a snake of length {length} behind {head:?}")]
    InsufficientClearance { head: Cell, length: usize },
    #[error("no free cell left for food ({free} free)")]
    NoRoomForFood { free: usize },
}
