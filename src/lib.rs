//! Grid Snake: a bounded board with a barrier ring, a snake that grows on food,
//! and a per-tick state machine that ends on collision.
//!
//! The core (`grid`, `snake`, `game`) knows nothing about terminals or pixels;
//! `render` only reads the game's accessors.

pub mod error;
pub mod game;
pub mod grid;
pub mod render;
pub mod snake;

pub use error::ConfigError;
pub use game::{GameConfig, GameState, GameStatus, OverReason, TickResult};
pub use grid::{Cell, Coord, Grid};
pub use render::{Raster2D, Tile, rasterize_game};
pub use snake::{Direction, Snake};
