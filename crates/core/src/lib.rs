//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on terminals, windows or input devices, making it:
//!
//! - **Deterministic**: Same seed and inputs produce identical games
//! - **Testable**: Every rule is reachable through [`GameState::step`]
//! - **Portable**: The only output is a character grid ([`Screen`])
//!
//! # Module Structure
//!
//! - [`pieces`]: 4x4 tetromino masks and the quarter-turn index mapping
//! - [`field`]: bordered playing field, fit test, row completion and collapse
//! - [`game_state`]: active piece, tick counter, locking, scoring, spawning
//! - [`rng`]: seeded uniform piece selection
//! - [`scoring`]: lock bonus, line clear bonus and gravity speed-up
//! - [`screen`]: the character grid handed to a display
//! - [`config`]: field geometry and tick rate
//!
//! # Game Rules
//!
//! - **Gravity**: the piece drops one row every `ticks_per_drop` frames; on
//!   those frames player input is ignored
//! - **Lock**: a piece that cannot drop is written into the field (+3 points)
//! - **Line clear**: completed rows collapse; `k` rows at once earn `2^k * 10`
//! - **Speed-up**: every 10 locks gravity fires one tick sooner (floor: 1)
//! - **Game over**: a freshly spawned piece does not fit
//!
//! # Example
//!
//! ```
//! use text_tetris_core::{GameConfig, GameState};
//! use text_tetris_types::InputEvent;
//!
//! let mut game = GameState::new(GameConfig::default(), 12345);
//! game.step(Some(InputEvent::MoveLeft));
//! game.step(None);
//!
//! let screen = game.render();
//! assert_eq!(screen.height(), 19);
//! assert!(!game.is_game_over());
//! ```

pub mod config;
pub mod field;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod screen;

pub use text_tetris_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, GameConfig};
pub use field::Field;
pub use game_state::{ActivePiece, GameState, Phase, StepReport};
pub use pieces::{cells, mask_cell, rotate};
pub use rng::SimpleRng;
pub use screen::Screen;
