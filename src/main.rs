mod food;
mod game;
mod input;
mod render;
mod snake;
mod state;
mod term;

use std::io::{self, Write};
use std::{env, fs::File, process::exit, time::Duration};

use anyhow::{Context, Result};
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};

use crate::render::render;
use crate::state::{Board, GameState};
use crate::term::{TermEvents, TermManager};

const BOARD_WIDTH: i32 = 20;
const BOARD_HEIGHT: i32 = 10;
const TICK_INTERVAL: Duration = Duration::from_millis(200);

fn main() {
    if let Err(err) = run() {
        println!("Error: {:#}", err);
        exit(1);
    }
}

fn run() -> Result<()> {
    init_logging()?;

    let mut term = TermManager::new();
    // Puts the terminal back by itself when it fails halfway
    term.setup()?;

    let result = play(&mut term);

    // Always give the terminal back, even when the game failed
    let restored = term.restore();
    let end = result?;
    restored?;

    // Leaving the alternate screen wiped the last frame, so show it again
    print_final_view(&mut io::stdout(), &end)?;

    info!("quit with score {}", end.score());
    Ok(())
}

fn play(term: &mut TermManager) -> Result<GameState> {
    let mut rng = rand::thread_rng();
    let board = Board { width: BOARD_WIDTH, height: BOARD_HEIGHT };
    let state = GameState::new(board, &mut rng);

    info!("starting on a {}x{} board", BOARD_WIDTH, BOARD_HEIGHT);
    game::play(state, &mut TermEvents::new(), term, &mut rng, TICK_INTERVAL)
}

fn print_final_view<W: Write>(out: &mut W, end: &GameState) -> Result<()> {
    out.write_all(render(end).as_bytes()).context("printing final view")?;
    out.flush().context("printing final view")
}

// The terminal is the game surface, so logs only go to a file when asked
fn init_logging() -> Result<()> {
    let path = match env::var_os("SNAKE_LOG") {
        Some(path) => path,
        None => return Ok(()),
    };

    let level = env::var("SNAKE_LOG_LEVEL")
        .ok()
        .and_then(|l| l.parse().ok())
        .unwrap_or(LevelFilter::Info);

    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", path.to_string_lossy()))?;
    WriteLogger::init(level, Config::default(), file).context("initializing logger")?;
    Ok(())
}
