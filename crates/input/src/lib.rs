//! Terminal input module.
//!
//! Maps `crossterm` events into [`crate::types::InputEvent`]. Only the five
//! game events survive; everything else (mouse, focus, paste, unmapped keys,
//! key releases) is dropped here.

pub mod map;

pub use text_tetris_types as types;

pub use map::{handle_key_event, map_event};
