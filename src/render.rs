use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::game::GameState;
use crate::grid::{Cell, Coord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Empty,
    Barrier,
    SnakeHead,
    SnakeBody,
    Food,
}

impl Tile {
    fn ascii(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Barrier => '#',
            Self::SnakeHead => '@',
            Self::SnakeBody => 'o',
            Self::Food => '*',
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Empty => Style::default().fg(Color::DarkGray),
            Self::Barrier => Style::default().fg(Color::White),
            Self::SnakeHead => Style::default().fg(Color::LightGreen),
            Self::SnakeBody => Style::default().fg(Color::Green),
            Self::Food => Style::default().fg(Color::Red),
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Self::Empty => "··",
            Self::Barrier => "▒▒",
            Self::SnakeHead | Self::SnakeBody => "██",
            Self::Food => "◆◆",
        }
    }
}

/// A snapshot of the board, one tile per grid cell.
#[derive(Debug, Clone)]
pub struct Raster2D {
    pub width: Coord,
    pub height: Coord,
    pub tiles: Vec<Tile>,
}

impl Raster2D {
    pub fn new(width: Coord, height: Coord) -> Self {
        let size = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; size],
        }
    }

    #[inline]
    fn idx(&self, x: Coord, y: Coord) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some(y as usize * self.width as usize + x as usize)
        }
    }

    pub fn set(&mut self, x: Coord, y: Coord, tile: Tile) {
        if let Some(i) = self.idx(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Out-of-range cells read as empty.
    pub fn get(&self, x: Coord, y: Coord) -> Tile {
        self.idx(x, y).map_or(Tile::Empty, |i| self.tiles[i])
    }
}

impl std::fmt::Display for Raster2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            let row: String = (0..self.width).map(|x| self.get(x, y).ascii()).collect();
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

pub fn rasterize_game(state: &GameState) -> Raster2D {
    let grid = state.grid();
    let mut r = Raster2D::new(grid.cols(), grid.rows());
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            if grid.is_barrier(Cell::new(x, y)) {
                r.set(x, y, Tile::Barrier);
            }
        }
    }
    if let Some(food) = state.food() {
        r.set(food.x, food.y, Tile::Food);
    }
    // Tail first so the head wins if a collision left them overlapping.
    let segments: Vec<_> = state.body().collect();
    for p in segments.iter().skip(1).rev() {
        r.set(p.x, p.y, Tile::SnakeBody);
    }
    let head = state.head();
    r.set(head.x, head.y, Tile::SnakeHead);
    r
}

/// Two terminal columns per cell so blocks come out roughly square.
pub fn render_blocks(raster: &Raster2D) -> Vec<Line<'static>> {
    (0..raster.height)
        .map(|y| {
            let spans: Vec<Span<'static>> = (0..raster.width)
                .map(|x| {
                    let tile = raster.get(x, y);
                    Span::styled(tile.glyph(), tile.style())
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Packs 2x4 cells into each Braille glyph. Ragged edges are padded with empty
/// cells.
pub fn render_braille(raster: &Raster2D) -> String {
    let width = ((raster.width.max(0) + 1) / 2) as usize;
    let height = ((raster.height.max(0) + 3) / 4) as usize;

    // U+2800 is the empty Braille pattern; dots are bits of the low byte.
    let mut dots: Vec<Vec<u8>> = vec![vec![0u8; width]; height];
    for h in 0..raster.height {
        for w in 0..raster.width {
            if raster.get(w, h) == Tile::Empty {
                continue;
            }
            let bit = match (h % 4, w % 2) {
                (0, 0) => 0x01,
                (1, 0) => 0x02,
                (2, 0) => 0x04,
                (3, 0) => 0x40,
                (0, _) => 0x08,
                (1, _) => 0x10,
                (2, _) => 0x20,
                _ => 0x80,
            };
            dots[h as usize / 4][w as usize / 2] |= bit;
        }
    }
    dots.into_iter()
        .map(|line| {
            line.into_iter()
                .map(|d| char::from_u32(0x2800 + u32::from(d)).unwrap_or(' '))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    fn small_game() -> GameState {
        let cfg = GameConfig {
            window_width: 8,
            window_height: 4,
            block_size: 1,
            initial_head: Cell::new(3, 1),
            initial_length: 3,
        };
        GameState::with_seed(cfg, 5).unwrap()
    }

    #[test]
    fn ascii_shows_board() {
        let g = small_game();
        let food = g.food().unwrap();
        let mut expected: Vec<Vec<char>> = vec![
            "########".chars().collect(),
            "#oo@...#".chars().collect(),
            "#......#".chars().collect(),
            "########".chars().collect(),
        ];
        expected[food.y as usize][food.x as usize] = '*';
        let expected = expected
            .into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(rasterize_game(&g).to_string(), expected);
    }

    #[test]
    fn out_of_range_reads_empty() {
        let mut r = Raster2D::new(2, 2);
        r.set(5, 5, Tile::Food);
        assert_eq!(r.get(5, 5), Tile::Empty);
        assert_eq!(r.get(-1, 0), Tile::Empty);
    }

    #[test]
    fn blocks_are_two_columns_wide() {
        let lines = render_blocks(&rasterize_game(&small_game()));
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.width() == 16));
    }

    #[test]
    fn braille_packs_and_pads() {
        let mut r = Raster2D::new(3, 5);
        r.set(0, 0, Tile::Barrier);
        r.set(1, 3, Tile::Food);
        r.set(2, 4, Tile::SnakeHead);
        let out = render_braille(&r);
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], "\u{2881}\u{2800}");
        assert_eq!(rows[1], "\u{2800}\u{2801}");
    }
}
