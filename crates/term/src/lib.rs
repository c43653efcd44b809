//! Terminal frontend.
//!
//! A small rendering layer for terminal gameplay: the core's character grid is
//! drawn into a styled framebuffer which is then flushed (diffed) to the
//! terminal through crossterm. [`TerminalFrontend`] packages this together
//! with key polling as the engine's display/input collaborator.

pub mod fb;
pub mod frontend;
pub mod renderer;
pub mod screen_view;

pub use text_tetris_core as core;
pub use text_tetris_engine as engine;
pub use text_tetris_input as input;
pub use text_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use frontend::TerminalFrontend;
pub use renderer::TerminalRenderer;
pub use screen_view::{ScreenView, Viewport};
