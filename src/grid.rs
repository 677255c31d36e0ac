/// Integer coordinate type for grid cells (not pixels)
pub type Coord = i32;

/// One grid square, addressed by (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
}

impl Cell {
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn offset(self, dx: Coord, dy: Coord) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// The playable board. The outermost ring of cells is a barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cols: Coord,
    rows: Coord,
    block_size: u32,
}

impl Grid {
    /// Largest side, in blocks, a playable grid may have.
    pub const MAX_SIDE: Coord = 4096;

    pub const fn new(cols: Coord, rows: Coord) -> Self {
        Self {
            cols,
            rows,
            block_size: 1,
        }
    }

    /// Grid covering a `width_px` x `height_px` window in blocks of `block_size`
    /// pixels. Partial blocks at the right/bottom edge are dropped.
    ///
    /// `block_size` must be non-zero and each side at most `MAX_SIDE` blocks;
    /// `GameConfig::validate` rejects anything else before building a grid.
    /// Sides too long for `Coord` saturate.
    pub fn from_window(width_px: u32, height_px: u32, block_size: u32) -> Self {
        let block = block_size.max(1);
        Self {
            cols: Coord::try_from(width_px / block).unwrap_or(Coord::MAX),
            rows: Coord::try_from(height_px / block).unwrap_or(Coord::MAX),
            block_size: block,
        }
    }

    pub fn cols(&self) -> Coord {
        self.cols
    }

    pub fn rows(&self) -> Coord {
        self.rows
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.cols && cell.y >= 0 && cell.y < self.rows
    }

    /// True for the outer ring. Cells outside the grid count as barrier too, so
    /// nothing can slip past the ring.
    #[inline]
    pub fn is_barrier(&self, cell: Cell) -> bool {
        !self.contains(cell)
            || cell.x == 0
            || cell.y == 0
            || cell.x == self.cols - 1
            || cell.y == self.rows - 1
    }

    /// Number of traversable cells.
    pub fn interior_len(&self) -> usize {
        let w = (self.cols - 2).max(0) as usize;
        let h = (self.rows - 2).max(0) as usize;
        w * h
    }

    /// Traversable cells in row-major order.
    pub fn interior_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (1..self.rows - 1).flat_map(move |y| (1..self.cols - 1).map(move |x| Cell::new(x, y)))
    }

    /// Top-left pixel corner of `cell`.
    pub fn to_pixels(&self, cell: Cell) -> (i64, i64) {
        let b = i64::from(self.block_size);
        (i64::from(cell.x) * b, i64::from(cell.y) * b)
    }

    /// Cell containing the pixel `(x, y)`.
    pub fn from_pixels(&self, x: i64, y: i64) -> Cell {
        let b = i64::from(self.block_size);
        Cell::new(x.div_euclid(b) as Coord, y.div_euclid(b) as Coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_grid() -> Grid {
        Grid::from_window(660, 500, 20)
    }

    #[test]
    fn window_maps_to_blocks() {
        let g = window_grid();
        assert_eq!(g.cols(), 33);
        assert_eq!(g.rows(), 25);
        assert_eq!(g.interior_len(), 31 * 23);
        assert_eq!(g.interior_cells().count(), g.interior_len());
    }

    #[test]
    fn ring_is_barrier() {
        let g = window_grid();
        assert!(g.is_barrier(Cell::new(0, 10)));
        assert!(g.is_barrier(Cell::new(10, 0)));
        assert!(g.is_barrier(Cell::new(32, 10)));
        assert!(g.is_barrier(Cell::new(10, 24)));
        assert!(g.is_barrier(Cell::new(-1, 10)));
        assert!(g.is_barrier(Cell::new(33, 10)));
        assert!(!g.is_barrier(Cell::new(1, 1)));
        assert!(!g.is_barrier(Cell::new(31, 23)));
        assert!(g.interior_cells().all(|c| !g.is_barrier(c)));
    }

    #[test]
    fn ring_agrees_with_pixel_bounds() {
        // Pixel test: dead when x < block, y < block, x > W - 2*block or y > H - 2*block.
        for (w, h, b) in [(660u32, 500u32, 20u32), (670, 510, 20), (679, 519, 20)] {
            let g = Grid::from_window(w, h, b);
            for y in -1..=g.rows() {
                for x in -1..=g.cols() {
                    let cell = Cell::new(x, y);
                    let (px, py) = g.to_pixels(cell);
                    let (b, w, h) = (i64::from(b), i64::from(w), i64::from(h));
                    let pixel_dead = px < b || py < b || px > w - 2 * b || py > h - 2 * b;
                    assert_eq!(g.is_barrier(cell), pixel_dead, "{w}x{h} at {cell:?}");
                }
            }
        }
    }

    #[test]
    fn huge_window_saturates() {
        let g = Grid::from_window(u32::MAX, u32::MAX, 1);
        assert_eq!(g.cols(), Coord::MAX);
        assert_eq!(g.rows(), Coord::MAX);
        assert!(g.cols() > 0);
    }

    #[test]
    fn pixel_round_trip_is_top_left() {
        let g = window_grid();
        assert_eq!(g.to_pixels(Cell::new(6, 10)), (120, 200));
        assert_eq!(g.from_pixels(139, 219), Cell::new(6, 10));
        assert_eq!(g.from_pixels(-1, 0), Cell::new(-1, 0));
    }
}
