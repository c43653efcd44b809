//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, terminal rendering, tests).
//!
//! # Field Dimensions
//!
//! The default playing field is 12 columns by 18 rows *including* its
//! boundary: column 0, column `width - 1` and row `height - 1` are permanent
//! boundary cells, leaving a 10x17 play area.
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 18 rows (indexed 0-17)
//! - **Spawn position**: (`width / 2`, 0), rotation 0
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Fixed sleep per simulated frame |
//! | `TICK_RESET_MS` | 1000 | Tick counter resets once this much time has accumulated |
//! | `INITIAL_TICKS_PER_DROP` | 10 | Gravity fires every N ticks at the start |
//! | `PIECES_PER_SPEEDUP` | 10 | Gravity speeds up by one tick every N locks |
//! | `MIN_TICKS_PER_DROP` | 1 | Gravity never gets faster than every tick |
//!
//! # Examples
//!
//! ```
//! use text_tetris_types::{FieldCell, InputEvent, PieceId, DEFAULT_FIELD_WIDTH};
//!
//! assert_eq!(FieldCell::Boundary.as_char(), '#');
//! assert_eq!(InputEvent::from_str("rotate"), Some(InputEvent::Rotate));
//! assert_eq!(PieceId::new(3).index(), 3);
//! assert_eq!(DEFAULT_FIELD_WIDTH, 12);
//! ```

/// Default field width in cells, boundary columns included
pub const DEFAULT_FIELD_WIDTH: u16 = 12;

/// Default field height in cells, boundary row included
pub const DEFAULT_FIELD_HEIGHT: u16 = 18;

/// Fixed per-frame sleep in milliseconds
pub const TICK_MS: u32 = 50;

/// The tick counter resets once `counter * tick_ms` reaches this value
pub const TICK_RESET_MS: u32 = 1000;

/// Gravity interval (in ticks) for a fresh game
pub const INITIAL_TICKS_PER_DROP: u32 = 10;

/// Number of locked pieces between two gravity speed-ups
pub const PIECES_PER_SPEEDUP: u32 = 10;

/// Fastest possible gravity interval (in ticks)
pub const MIN_TICKS_PER_DROP: u32 = 1;

/// Points awarded for every locked piece
pub const LOCK_SCORE: u32 = 3;

/// Base of the line clear bonus: `2^lines * LINE_CLEAR_BASE`
pub const LINE_CLEAR_BASE: u32 = 10;

/// Number of tetromino shapes in the catalog
pub const PIECE_COUNT: usize = 7;

/// Side length of a piece mask
pub const MASK_SIZE: usize = 4;

/// Character used to draw the active piece
pub const ACTIVE_PIECE_CHAR: char = 'X';


/// A single cell of the playing field
///
/// - **Empty**: free space, the only value a piece may move into
/// - **Block**: a locked piece cell
/// - **Boundary**: permanent left/right/bottom wall
/// - **LineToRemove**: a completed row, flagged until it is collapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldCell {
    #[default]
    Empty,
    Block,
    Boundary,
    LineToRemove,
}

impl FieldCell {
    /// Display character for the cell
    ///
    /// # Examples
    ///
    /// ```
    /// use text_tetris_types::FieldCell;
    ///
    /// assert_eq!(FieldCell::Empty.as_char(), ' ');
    /// assert_eq!(FieldCell::Block.as_char(), 'X');
    /// assert_eq!(FieldCell::LineToRemove.as_char(), '=');
    /// ```
    pub fn as_char(&self) -> char {
        match self {
            FieldCell::Empty => ' ',
            FieldCell::Block => 'X',
            FieldCell::Boundary => '#',
            FieldCell::LineToRemove => '=',
        }
    }

    /// Inverse of [`FieldCell::as_char`]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(FieldCell::Empty),
            'X' => Some(FieldCell::Block),
            '#' => Some(FieldCell::Boundary),
            '=' => Some(FieldCell::LineToRemove),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldCell::Empty)
    }
}

/// Index of a shape in the piece catalog (0-6)
///
/// Construction asserts the index is inside the catalog: an out-of-range id is
/// a programming error, not a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(u8);

impl PieceId {
    /// Every catalog entry, in index order
    pub const ALL: [PieceId; PIECE_COUNT] = [
        PieceId(0),
        PieceId(1),
        PieceId(2),
        PieceId(3),
        PieceId(4),
        PieceId(5),
        PieceId(6),
    ];

    pub fn new(index: usize) -> Self {
        assert!(index < PIECE_COUNT, "piece index out of range: {index}");
        Self(index as u8)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Discrete per-frame input
///
/// At most one event is consumed per frame; anything the frontend cannot map
/// to one of these is dropped before it reaches the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    MoveDown,
    /// Rotate piece by 90°
    Rotate,
    /// End the game loop after the current frame
    Quit,
}

impl InputEvent {
    /// Parse event from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use text_tetris_types::InputEvent;
    ///
    /// assert_eq!(InputEvent::from_str("moveLeft"), Some(InputEvent::MoveLeft));
    /// assert_eq!(InputEvent::from_str("QUIT"), Some(InputEvent::Quit));
    /// assert_eq!(InputEvent::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(InputEvent::MoveLeft),
            "moveright" => Some(InputEvent::MoveRight),
            "movedown" => Some(InputEvent::MoveDown),
            "rotate" => Some(InputEvent::Rotate),
            "quit" => Some(InputEvent::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string (used in logs)
    pub fn as_str(&self) -> &'static str {
        match self {
            InputEvent::MoveLeft => "moveLeft",
            InputEvent::MoveRight => "moveRight",
            InputEvent::MoveDown => "moveDown",
            InputEvent::Rotate => "rotate",
            InputEvent::Quit => "quit",
        }
    }
}

/// Core-side event emitted after a piece locks.
///
/// `rows` lists the completed rows top to bottom, as they were detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub rows: [u16; MASK_SIZE],
    pub score_gained: u32,
    pub ticks_per_drop: u32,
}

impl LockEvent {
    /// The completed rows as a slice
    pub fn cleared_rows(&self) -> &[u16] {
        &self.rows[..self.lines_cleared as usize]
    }
}
