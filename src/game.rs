use log::{debug, info, trace};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::ConfigError;
use crate::grid::{Cell, Grid};
use crate::snake::{Direction, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Over,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverReason {
    Barrier,
    SelfCollision,
    /// The snake filled every free cell, leaving nowhere for food.
    BoardFull,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Window size in pixels; the grid is this divided by `block_size`.
    pub window_width: u32,
    pub window_height: u32,
    pub block_size: u32,
    /// Starting head cell, in blocks. The body trails to the left of it.
    pub initial_head: Cell,
    /// Initial snake length (>= 1)
    pub initial_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 660,
            window_height: 500,
            block_size: 20,
            initial_head: Cell::new(6, 10),
            initial_length: 5,
        }
    }
}

impl GameConfig {
    pub fn grid(&self) -> Grid {
        Grid::from_window(self.window_width, self.window_height, self.block_size)
    }

    /// Checks that a game can start from this configuration.
    pub fn validate(&self) -> Result<Grid, ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        let cols = self.window_width / self.block_size;
        let rows = self.window_height / self.block_size;
        let max_side = Grid::MAX_SIDE as u32;
        if cols > max_side || rows > max_side {
            return Err(ConfigError::GridTooLarge { cols, rows });
        }
        let grid = self.grid();
        if grid.interior_len() == 0 {
            return Err(ConfigError::GridTooSmall {
                cols: grid.cols(),
                rows: grid.rows(),
            });
        }
        if self.initial_length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        // The body lies along one row, so it can be no longer than the interior
        // is wide.
        let interior_width = (grid.cols() - 2) as usize;
        if self.initial_length > interior_width {
            return Err(ConfigError::InsufficientClearance {
                head: self.initial_head,
                length: self.initial_length,
            });
        }

        let snake = Snake::new(self.initial_head, self.initial_length);
        if snake.body().any(|&c| grid.is_barrier(c)) {
            return Err(ConfigError::InsufficientClearance {
                head: self.initial_head,
                length: self.initial_length,
            });
        }

        let free = grid.interior_len() - snake.len();
        if free == 0 {
            return Err(ConfigError::NoRoomForFood { free });
        }
        Ok(grid)
    }
}

/// UI-agnostic result of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    pub ate_food: bool,
    pub status: GameStatus,
    pub score: u32,
}

impl TickResult {
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }
}

#[derive(Debug)]
pub struct GameState {
    cfg: GameConfig,
    grid: Grid,
    snake: Snake,
    dir: Direction,
    /// `None` only once the board is full.
    food: Option<Cell>,
    rng: ChaCha8Rng,
    status: GameStatus,
    over_reason: Option<OverReason>,
    score: u32,
    ticks: u64,
}

impl GameState {
    /// Create a new game with deterministic RNG from `seed`.
    pub fn with_seed(cfg: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(cfg, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(cfg: GameConfig, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        let grid = cfg.validate()?;
        let mut game = Self {
            snake: Snake::new(cfg.initial_head, cfg.initial_length),
            cfg,
            grid,
            dir: Direction::Right,
            food: None,
            rng,
            status: GameStatus::Running,
            over_reason: None,
            score: 0,
            ticks: 0,
        };
        game.food = game.place_food();
        info!(
            "new game on {}x{} grid, head {:?}, length {}, food {:?}",
            grid.cols(),
            grid.rows(),
            game.snake.head(),
            game.snake.len(),
            game.food
        );
        Ok(game)
    }

    /// Create a new game with non-deterministic seed
    pub fn new(cfg: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(cfg, ChaCha8Rng::from_os_rng())
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn over_reason(&self) -> Option<OverReason> {
        self.over_reason
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ticks processed while running.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn body(&self) -> impl Iterator<Item = &Cell> {
        self.snake.body()
    }

    pub fn head(&self) -> Cell {
        self.snake.head()
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    /// Advance the game by one tick, turning first if `input` is a legal turn.
    /// Once the game is over this only reports the final state.
    pub fn step(&mut self, input: Option<Direction>) -> TickResult {
        if self.status == GameStatus::Over {
            return self.result(false);
        }

        if let Some(next) = input {
            if self.snake.legal_turn(next, self.dir) {
                trace!("turn {:?} -> {:?}", self.dir, next);
                self.dir = next;
            } else {
                trace!("ignored reversal {:?} while heading {:?}", next, self.dir);
            }
        }

        let (dx, dy) = self.dir.dx_dy();
        let next_head = self.snake.head().offset(dx, dy);
        self.ticks += 1;

        let ate_food = self.food == Some(next_head);
        if ate_food {
            self.score += 1;
            self.snake.advance(next_head, true);
            self.food = self.place_food();
            debug!(
                "ate food at {:?}, score {}, length {}",
                next_head,
                self.score,
                self.snake.len()
            );
        } else {
            self.snake.advance(next_head, false);
        }

        let reason = if self.snake.has_boundary_collision(&self.grid) {
            Some(OverReason::Barrier)
        } else if self.snake.has_self_collision() {
            Some(OverReason::SelfCollision)
        } else if self.food.is_none() {
            Some(OverReason::BoardFull)
        } else {
            None
        };
        if let Some(reason) = reason {
            self.status = GameStatus::Over;
            self.over_reason = Some(reason);
            info!(
                "game over ({:?}) at {:?} after {} ticks, score {}",
                reason, next_head, self.ticks, self.score
            );
        }

        self.result(ate_food)
    }

    fn result(&self, ate_food: bool) -> TickResult {
        TickResult {
            ate_food,
            status: self.status,
            score: self.score,
        }
    }

    /// Picks a uniformly random interior cell not covered by the snake.
    fn place_food(&mut self) -> Option<Cell> {
        let max_attempts = self.grid.interior_len().saturating_mul(2).max(8);
        self.place_food_within(max_attempts)
    }

    /// Rejection sampling for up to `max_attempts` draws, then a pick among the
    /// enumerated free cells.
    fn place_food_within(&mut self, max_attempts: usize) -> Option<Cell> {
        let grid = self.grid;
        for _ in 0..max_attempts {
            let x = self.rng.random_range(1..grid.cols() - 1);
            let y = self.rng.random_range(1..grid.rows() - 1);
            let cell = Cell::new(x, y);
            if !self.snake.occupies(cell) {
                debug!("food placed at {:?}", cell);
                return Some(cell);
            }
        }

        // Crowded board: sample from what is actually free.
        let free: Vec<Cell> = grid
            .interior_cells()
            .filter(|&c| !self.snake.occupies(c))
            .collect();
        let cell = free.choose(&mut self.rng).copied();
        debug!("food placed at {:?} from {} free cells", cell, free.len());
        cell
    }
}
