//! Game loop driver.
//!
//! The loop is single-threaded and strictly sequential: each frame sleeps for
//! one tick, polls at most one input event, advances the simulation by one
//! step and hands the resulting character grid to the display. Everything
//! platform-specific sits behind [`Frontend`], so the loop runs the same way
//! against a terminal or a scripted test double.

pub mod game_loop;

pub use text_tetris_core as core;
pub use text_tetris_types as types;

pub use game_loop::{run, run_frames, Frontend, LoopOutcome};
