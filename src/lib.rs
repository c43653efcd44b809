//! Text Tetris (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `text_tetris::{types, core, engine, input, term}`.

pub use text_tetris_core as core;
pub use text_tetris_engine as engine;
pub use text_tetris_input as input;
pub use text_tetris_term as term;
pub use text_tetris_types as types;
