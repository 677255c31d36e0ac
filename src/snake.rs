use std::collections::VecDeque;

use crate::grid::{Cell, Coord, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[inline]
    pub fn dx_dy(self) -> (Coord, Coord) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Body geometry of the snake, head first.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Lays `length` cells out to the left of `head`. A zero length is treated
    /// as one and lengths past `Coord::MAX` saturate; `GameConfig::validate`
    /// rejects both before getting here.
    pub fn new(head: Cell, length: usize) -> Self {
        let length = Coord::try_from(length.max(1)).unwrap_or(Coord::MAX);
        let body = (0..length)
            .map(|i| head.offset(-i, 0))
            .collect();
        Self { body }
    }

    pub fn head(&self) -> Cell {
        // Never empty: `new` lays down at least one cell and `advance` only
        // removes after inserting.
        self.body[0]
    }

    pub fn body(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// A turn is illegal only when it would put the head straight back onto the
    /// second segment. `current` is accepted for symmetry with callers that
    /// track the heading; the geometry alone decides.
    pub fn legal_turn(&self, requested: Direction, _current: Direction) -> bool {
        match self.body.get(1) {
            Some(&neck) => {
                let (dx, dy) = requested.dx_dy();
                self.head().offset(dx, dy) != neck
            }
            None => true,
        }
    }

    /// Pushes `new_head` and drops the tail unless the snake `grew`.
    pub fn advance(&mut self, new_head: Cell, grew: bool) {
        self.body.push_front(new_head);
        if !grew {
            self.body.pop_back();
        }
    }

    pub fn has_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&c| c == head)
    }

    pub fn has_boundary_collision(&self, grid: &Grid) -> bool {
        grid.is_barrier(self.head())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Snake {
        Snake::new(Cell::new(6, 10), 5)
    }

    fn cells(s: &Snake) -> Vec<Cell> {
        s.body().copied().collect()
    }

    #[test]
    fn lays_out_backwards_from_head() {
        let s = start();
        assert_eq!(
            cells(&s),
            vec![
                Cell::new(6, 10),
                Cell::new(5, 10),
                Cell::new(4, 10),
                Cell::new(3, 10),
                Cell::new(2, 10),
            ]
        );
    }

    #[test]
    fn reversal_into_neck_is_illegal() {
        let s = start();
        assert!(!s.legal_turn(Direction::Left, Direction::Right));
        assert!(s.legal_turn(Direction::Up, Direction::Right));
        assert!(s.legal_turn(Direction::Down, Direction::Right));
        assert!(s.legal_turn(Direction::Right, Direction::Right));
    }

    #[test]
    fn exactly_one_turn_rejected_for_every_heading() {
        for heading in Direction::ALL {
            let mut s = Snake::new(Cell::new(10, 10), 3);
            let (dx, dy) = heading.dx_dy();
            // Two moves in `heading` put the neck directly behind the head.
            for _ in 0..2 {
                let next = s.head().offset(dx, dy);
                s.advance(next, false);
            }
            let rejected: Vec<_> = Direction::ALL
                .into_iter()
                .filter(|&d| !s.legal_turn(d, heading))
                .collect();
            assert_eq!(rejected, vec![heading.opposite()], "heading {heading:?}");
        }
    }

    #[test]
    fn single_segment_turns_anywhere() {
        let s = Snake::new(Cell::new(3, 3), 1);
        assert!(Direction::ALL.into_iter().all(|d| s.legal_turn(d, Direction::Right)));
    }

    #[test]
    fn advance_moves_or_grows() {
        let mut s = start();
        s.advance(Cell::new(7, 10), false);
        assert_eq!(s.len(), 5);
        assert_eq!(s.head(), Cell::new(7, 10));
        assert!(!s.occupies(Cell::new(2, 10)));

        s.advance(Cell::new(8, 10), true);
        assert_eq!(s.len(), 6);
        assert!(s.occupies(Cell::new(3, 10)));
    }

    #[test]
    fn detects_self_collision() {
        let mut s = start();
        assert!(!s.has_self_collision());
        s.advance(Cell::new(4, 10), false);
        assert!(s.has_self_collision());
    }

    #[test]
    fn detects_boundary_collision() {
        let grid = Grid::new(10, 8);
        let mut s = Snake::new(Cell::new(8, 4), 2);
        assert!(!s.has_boundary_collision(&grid));
        s.advance(Cell::new(9, 4), false);
        assert!(s.has_boundary_collision(&grid));
    }
}
