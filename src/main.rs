use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::render::{render_blocks, render_braille};
use grid_snake::{Cell, Direction, GameConfig, GameState, GameStatus, rasterize_game};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{LevelFilter, info};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::Stylize,
    text::Text,
    widgets::{Block, Borders, Paragraph},
};
use simplelog::{Config, WriteLogger};

#[derive(Parser)]
#[command(name = "grid-snake")]
#[command(version, about = "Snake on a walled grid")]
struct Cli {
    /// Window width in pixels
    #[arg(long, default_value_t = 660)]
    window_width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 500)]
    window_height: u32,

    /// Pixels per grid block
    #[arg(long, default_value_t = 20)]
    block_size: u32,

    /// Starting head column, in blocks
    #[arg(long, default_value_t = 6)]
    head_x: i32,

    /// Starting head row, in blocks
    #[arg(long, default_value_t = 10)]
    head_y: i32,

    /// Initial snake length
    #[arg(long, default_value_t = 5)]
    length: usize,

    /// Milliseconds per tick
    #[arg(long, default_value_t = 50)]
    tick_millis: u64,

    /// Seed for food placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Draw the board in Braille (2x4 cells per character)
    #[arg(long)]
    braille: bool,

    /// Where to write the log (the terminal is busy drawing the game)
    #[arg(long, default_value = "grid-snake.log")]
    log_file: PathBuf,

    /// Log food placement and turns as well
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            window_width: self.window_width,
            window_height: self.window_height,
            block_size: self.block_size,
            initial_head: Cell::new(self.head_x, self.head_y),
            initial_length: self.length,
        }
    }
}

/// What a key press asks for.
enum KeyAction {
    Quit,
    Steer(Direction),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("creating log file {}", cli.log_file.display()))?;
    WriteLogger::init(level, Config::default(), log_file).context("installing logger")?;

    // Fail before touching the terminal if the board can't be built.
    let cfg = cli.game_config();
    let mut game = match cli.seed {
        Some(seed) => GameState::with_seed(cfg, seed),
        None => GameState::new(cfg),
    }
    .context("invalid game configuration")?;

    // --- Init terminal ---
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let res = run(&mut terminal, &mut game, &cli);

    // --- Restore terminal even on error ---
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    info!(
        "quit with score {} after {} ticks ({:?})",
        game.score(),
        game.ticks(),
        game.over_reason()
    );
    info!("final board:\n{}", rasterize_game(&game));
    println!("Final score: {}", game.score());
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut GameState,
    cli: &Cli,
) -> Result<()> {
    let tick_rate = Duration::from_millis(cli.tick_millis.max(1));
    let mut last_tick = Instant::now();
    // First direction pressed during a tick; later ones wait for the next.
    let mut pending: Option<Direction> = None;

    loop {
        terminal.draw(|f| draw(f, game, cli.braille))?;

        // --- Input (non-blocking) ---
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_key(key) {
                        Some(KeyAction::Quit) => return Ok(()),
                        Some(KeyAction::Steer(dir)) => {
                            pending.get_or_insert(dir);
                        }
                        None => {}
                    }
                }
            }
        }

        // --- Tick ---
        if last_tick.elapsed() >= tick_rate {
            if game.is_alive() {
                game.step(pending.take());
            } else {
                pending = None;
            }
            last_tick = Instant::now();
        }
    }
}

fn draw(f: &mut Frame, game: &GameState, braille: bool) {
    let area = f.area();

    let status = match game.status() {
        GameStatus::Running => "running",
        GameStatus::Over => "game over (press q to quit)",
    };
    let title = format!(" Snake - score: {} - {} ", game.score(), status);

    let raster = rasterize_game(game);
    let (content, cols, rows): (Text, i32, i32) = if braille {
        (
            Text::from(render_braille(&raster)),
            (raster.width + 1) / 2,
            (raster.height + 3) / 4,
        )
    } else {
        (
            Text::from(render_blocks(&raster)),
            raster.width * 2,
            raster.height,
        )
    };

    // Block adds a 1-char border around the board.
    let outer_w = (cols.max(0) as u16).saturating_add(2);
    let outer_h = (rows.max(0) as u16).saturating_add(2);
    let x = area.x.saturating_add(area.width.saturating_sub(outer_w) / 2);
    let y = area.y.saturating_add(area.height.saturating_sub(outer_h) / 2);
    let frame_area = Rect::new(x, y, outer_w.min(area.width), outer_h.min(area.height));

    let block = Block::default().borders(Borders::ALL).title(title.bold());
    let para = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Left);

    f.render_widget(para, frame_area);
}

fn handle_key(key: KeyEvent) -> Option<KeyAction> {
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        // Vim movement (k/j/h/l) → Up/Down/Left/Right
        KeyCode::Char('k') | KeyCode::Up => KeyAction::Steer(Direction::Up),
        KeyCode::Char('j') | KeyCode::Down => KeyAction::Steer(Direction::Down),
        KeyCode::Char('h') | KeyCode::Left => KeyAction::Steer(Direction::Left),
        KeyCode::Char('l') | KeyCode::Right => KeyAction::Steer(Direction::Right),

        _ => return None,
    };
    Some(action)
}
