//! Terminal Tetris runner (default binary).
//!
//! Parses the command line, sets up optional file logging, takes over the
//! terminal and runs the game loop until the player quits or the game ends.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};

use text_tetris::core::{GameConfig, GameState};
use text_tetris::engine::{run, LoopOutcome};
use text_tetris::term::TerminalFrontend;
use text_tetris::types::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, TICK_MS};

#[derive(Debug, Parser)]
#[command(name = "text-tetris", about = "Falling blocks drawn as text")]
struct Cli {
    #[arg(long, default_value_t = DEFAULT_FIELD_WIDTH, help = "Field width including both walls")]
    width: u16,

    #[arg(long, default_value_t = DEFAULT_FIELD_HEIGHT, help = "Field height including the floor")]
    height: u16,

    #[arg(long = "tick-ms", default_value_t = TICK_MS, help = "Milliseconds per simulated frame")]
    tick_ms: u32,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    verbose: u8,

    #[arg(long, help = "Write logs to this file (the terminal is busy drawing the game)")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = GameConfig::new(cli.width, cli.height, cli.tick_ms).map_err(|e| {
        warn!(error = %e, "rejected configuration");
        e
    })?;

    let mut frontend = TerminalFrontend::default();
    frontend.enter()?;

    let result = play(config, &mut frontend);

    // Always try to restore terminal state.
    let restored = frontend.exit();
    let outcome = result?;
    restored?;

    match outcome {
        LoopOutcome::GameOver { score } => println!("game over, score = {score}"),
        other => println!("score = {}", other.score()),
    }
    Ok(())
}

fn play(config: GameConfig, frontend: &mut TerminalFrontend) -> Result<LoopOutcome> {
    let mut state = GameState::new(config, clock_seed());
    let outcome = run(&mut state, frontend)?;
    info!(?outcome, lines = state.lines_cleared(), "session ended");

    if let LoopOutcome::GameOver { .. } = outcome {
        frontend.show_game_over(&state.render())?;
        frontend.wait_for_key()?;
    }
    Ok(outcome)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .init();
    info!(%level, "logging initialized");
    Ok(())
}
