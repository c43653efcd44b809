//! Frame sequencing: timing -> input -> simulation step -> render handoff.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::{GameState, Screen};
use crate::types::InputEvent;

/// The display/input collaborator the loop drives.
pub trait Frontend {
    /// Block for one tick. This is the only place the loop waits.
    fn sleep(&mut self, tick: Duration) {
        std::thread::sleep(tick);
    }

    /// Return at most one pending input event without blocking.
    fn poll_input(&mut self) -> Result<Option<InputEvent>>;

    /// Display a frame.
    fn present(&mut self, screen: &Screen) -> Result<()>;
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The player asked to quit; the last frame was still presented
    Quit { score: u32 },
    /// A freshly spawned piece did not fit; the terminal frame is not presented
    GameOver { score: u32 },
    /// `run_frames` used up its frame budget
    FrameLimit { score: u32 },
}

impl LoopOutcome {
    pub fn score(&self) -> u32 {
        match *self {
            LoopOutcome::Quit { score }
            | LoopOutcome::GameOver { score }
            | LoopOutcome::FrameLimit { score } => score,
        }
    }
}

/// Run until the player quits, the game ends, or the frontend fails.
///
/// Poll and present failures are fatal and come back as `Err`; game over is
/// a normal `Ok` outcome.
pub fn run<F: Frontend>(state: &mut GameState, frontend: &mut F) -> Result<LoopOutcome> {
    run_frames(state, frontend, u64::MAX)
}

/// Like [`run`], but stops after `max_frames` frames.
pub fn run_frames<F: Frontend>(
    state: &mut GameState,
    frontend: &mut F,
    max_frames: u64,
) -> Result<LoopOutcome> {
    let config = *state.config();
    let tick = Duration::from_millis(config.tick_ms as u64);
    let mut screen = Screen::new(config.field_width, config.field_height + 1);
    info!(
        width = config.field_width,
        height = config.field_height,
        tick_ms = config.tick_ms,
        seed = state.seed(),
        "game loop started"
    );

    if state.is_game_over() {
        return Ok(LoopOutcome::GameOver {
            score: state.score(),
        });
    }

    let mut frame: u64 = 0;
    while frame < max_frames {
        frame += 1;

        frontend.sleep(tick);

        let input = frontend.poll_input().context("failed to poll input")?;
        let quit = input == Some(InputEvent::Quit);

        let report = state.step(input);
        if let Some(lock) = report.lock {
            debug!(frame, lines = lock.lines_cleared, "lock resolved");
        }
        if report.game_over {
            info!(frame, score = state.score(), "game loop finished: game over");
            return Ok(LoopOutcome::GameOver {
                score: state.score(),
            });
        }

        state.render_into(&mut screen);
        frontend
            .present(&screen)
            .context("failed to present frame")?;

        if quit {
            info!(frame, score = state.score(), "game loop finished: quit");
            return Ok(LoopOutcome::Quit {
                score: state.score(),
            });
        }
    }

    Ok(LoopOutcome::FrameLimit {
        score: state.score(),
    })
}
