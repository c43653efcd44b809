//! Game state module - manages the complete game state
//!
//! This module ties together the field, piece catalog, randomizer and scoring.
//! [`GameState::step`] advances exactly one frame: tick bookkeeping, at most one
//! input event, gravity, locking, line clears and spawning.

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::field::Field;
use crate::pieces;
use crate::rng::SimpleRng;
use crate::scoring::{line_clear_score, lock_score, next_ticks_per_drop, tick_window_elapsed};
use crate::screen::Screen;
use crate::types::*;

/// Active falling piece
///
/// `(x, y)` is the field position of the mask's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub id: PieceId,
    /// Quarter turns, always kept in 0..4
    pub rotation: i32,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// A piece at the spawn pose
    pub fn spawn(id: PieceId, x: i32) -> Self {
        Self {
            id,
            rotation: 0,
            x,
            y: 0,
        }
    }

    /// Check the pose against the field
    pub fn fits(&self, field: &Field) -> bool {
        field.fits(self.id, self.rotation, self.x, self.y)
    }

    /// Candidate pose for an input event; `Quit` leaves the pose unchanged
    pub fn moved_by(&self, input: InputEvent) -> Self {
        match input {
            InputEvent::MoveLeft => Self {
                x: self.x - 1,
                ..*self
            },
            InputEvent::MoveRight => Self {
                x: self.x + 1,
                ..*self
            },
            InputEvent::MoveDown => Self {
                y: self.y + 1,
                ..*self
            },
            InputEvent::Rotate => Self {
                rotation: (self.rotation + 1).rem_euclid(4),
                ..*self
            },
            InputEvent::Quit => *self,
        }
    }

    /// Field coordinates of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (x, y) = (self.x, self.y);
        pieces::cells(self.id, self.rotation).map(move |(lx, ly)| (x + lx, y + ly))
    }
}

/// Where the simulation is in the drop cycle.
///
/// Between frames the state is either `Falling` or `GameOver`; the other
/// phases only exist while a lock is being resolved inside [`GameState::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Locking,
    LineClear,
    Spawning,
    GameOver,
}

/// What a single frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// Gravity fired this frame (input other than the forced drop was ignored)
    pub gravity: bool,
    /// The active piece changed pose
    pub moved: bool,
    /// Set when the active piece locked this frame
    pub lock: Option<LockEvent>,
    /// The freshly spawned piece did not fit
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    field: Field,
    active: ActivePiece,
    rng: SimpleRng,
    phase: Phase,
    tick_counter: u32,
    ticks_per_drop: u32,
    pieces_locked: u32,
    lines_cleared: u32,
    score: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game and spawn its first piece
    pub fn new(config: GameConfig, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let first = rng.next_piece();
        let mut state = Self {
            config,
            field: Field::new(config.field_width, config.field_height),
            active: ActivePiece::spawn(first, config.spawn_x()),
            rng,
            phase: Phase::Falling,
            tick_counter: 0,
            ticks_per_drop: INITIAL_TICKS_PER_DROP,
            pieces_locked: 0,
            lines_cleared: 0,
            score: 0,
            last_event: None,
        };
        if !state.active.fits(&state.field) {
            state.phase = Phase::GameOver;
        }
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Mutable field access for tests and tooling. Bypasses every game rule.
    #[doc(hidden)]
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    /// Replace the active piece without a fit check (tests and tooling)
    #[doc(hidden)]
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = piece;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    pub fn ticks_per_drop(&self) -> u32 {
        self.ticks_per_drop
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Total number of rows cleared this game
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Advance one frame with at most one input event.
    ///
    /// Gravity wins over input: on a frame where the piece is due to drop, any
    /// left/right/rotate/down input is discarded and only the forced move down
    /// is attempted. Otherwise the input candidate is committed whole or not at
    /// all. Does nothing once the game is over.
    pub fn step(&mut self, input: Option<InputEvent>) -> StepReport {
        let mut report = StepReport::default();
        if self.is_game_over() {
            report.game_over = true;
            return report;
        }

        // Timing.
        self.tick_counter += 1;
        let drop_now = self.tick_counter % self.ticks_per_drop == 0;
        if tick_window_elapsed(self.tick_counter, self.config.tick_ms) {
            self.tick_counter = 0;
        }

        // Gravity.
        if drop_now {
            report.gravity = true;
            let down = ActivePiece {
                y: self.active.y + 1,
                ..self.active
            };
            if down.fits(&self.field) {
                self.active = down;
                report.moved = true;
            } else {
                let event = self.lock_active();
                report.lock = Some(event);
                report.game_over = !self.spawn_piece();
            }
            return report;
        }

        // Input.
        if let Some(input) = input {
            let candidate = self.active.moved_by(input);
            if candidate != self.active && candidate.fits(&self.field) {
                trace!(input = input.as_str(), "input committed");
                self.active = candidate;
                report.moved = true;
            }
        }
        report
    }

    /// Lock the active piece into the field and resolve completed rows.
    ///
    /// Leaves the phase at `LineClear`; `step` follows up with
    /// [`GameState::spawn_piece`].
    fn lock_active(&mut self) -> LockEvent {
        self.phase = Phase::Locking;
        let active = self.active;
        self.field
            .lock_piece(active.id, active.rotation, active.x, active.y);

        let mut gained = lock_score();
        self.pieces_locked += 1;
        let before = self.ticks_per_drop;
        self.ticks_per_drop = next_ticks_per_drop(self.ticks_per_drop, self.pieces_locked);
        if self.ticks_per_drop != before {
            info!(
                pieces = self.pieces_locked,
                ticks_per_drop = self.ticks_per_drop,
                "gravity speed-up"
            );
        }

        // Rows spanned by the mask, scanned top to bottom.
        self.phase = Phase::LineClear;
        let mut rows: ArrayVec<u16, MASK_SIZE> = ArrayVec::new();
        for ly in 0..MASK_SIZE as i32 {
            let y = active.y + ly;
            if self.field.is_row_complete(y) {
                self.field.mark_row(y as u16);
                rows.push(y as u16);
            }
        }

        for &y in &rows {
            self.field.collapse_row(y);
        }
        gained = gained.saturating_add(line_clear_score(rows.len()));
        self.lines_cleared += rows.len() as u32;
        self.score = self.score.saturating_add(gained);

        let mut padded = [0u16; MASK_SIZE];
        padded[..rows.len()].copy_from_slice(&rows);
        let event = LockEvent {
            lines_cleared: rows.len() as u32,
            rows: padded,
            score_gained: gained,
            ticks_per_drop: self.ticks_per_drop,
        };
        debug!(
            piece = active.id.index(),
            x = active.x,
            y = active.y,
            lines = event.lines_cleared,
            score = self.score,
            "piece locked"
        );
        self.last_event = Some(event);
        event
    }

    /// Put a random piece at the spawn pose.
    ///
    /// Returns false (and ends the game) when it does not fit.
    pub fn spawn_piece(&mut self) -> bool {
        self.phase = Phase::Spawning;
        self.active = ActivePiece::spawn(self.rng.next_piece(), self.config.spawn_x());
        if !self.active.fits(&self.field) {
            self.phase = Phase::GameOver;
            info!(
                score = self.score,
                pieces = self.pieces_locked,
                lines = self.lines_cleared,
                "game over"
            );
            return false;
        }
        self.phase = Phase::Falling;
        true
    }

    /// Draw field, active piece and score into `out`.
    ///
    /// The grid is resized to `width x (height + 1)`; the last row carries the
    /// score.
    pub fn render_into(&self, out: &mut Screen) {
        let w = self.field.width();
        let h = self.field.height();
        out.resize(w, h + 1);
        out.fill(' ');

        for y in 0..h {
            for (x, cell) in self.field.row(y).iter().enumerate() {
                out.put_char(x as i32, y as i32, cell.as_char());
            }
        }

        // Field rows only; the score line is never overdrawn by the piece.
        for (x, y) in self.active.cells() {
            if y < h as i32 {
                out.put_char(x, y, ACTIVE_PIECE_CHAR);
            }
        }

        out.put_str(0, h as i32, &format!("score = {}", self.score));
    }

    /// Convenience helper that allocates a new screen.
    pub fn render(&self) -> Screen {
        let mut screen = Screen::new(self.field.width(), self.field.height() + 1);
        self.render_into(&mut screen);
        screen
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(id: usize, x: i32, y: i32) -> GameState {
        let mut state = GameState::default();
        state.set_active(ActivePiece {
            id: PieceId::new(id),
            rotation: 0,
            x,
            y,
        });
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::default();
        assert_eq!(state.phase(), Phase::Falling);
        assert_eq!(state.score(), 0);
        assert_eq!(state.tick_counter(), 0);
        assert_eq!(state.ticks_per_drop(), INITIAL_TICKS_PER_DROP);
        assert_eq!(state.active().x, 6);
        assert_eq!(state.active().y, 0);
        assert_eq!(state.active().rotation, 0);
    }

    #[test]
    fn test_gravity_fires_every_n_ticks() {
        let mut state = state_with(2, 4, 0);
        for _ in 0..9 {
            let r = state.step(None);
            assert!(!r.gravity);
        }
        assert_eq!(state.active().y, 0);
        let r = state.step(None);
        assert!(r.gravity);
        assert_eq!(state.active().y, 1);
    }

    #[test]
    fn test_tick_counter_resets_after_one_second() {
        let mut state = state_with(2, 4, 0);
        for _ in 0..19 {
            state.step(None);
        }
        assert_eq!(state.tick_counter(), 19);
        state.step(None);
        assert_eq!(state.tick_counter(), 0);
    }

    #[test]
    fn test_gravity_overrides_input() {
        let mut state = state_with(2, 4, 0);
        for _ in 0..9 {
            state.step(None);
        }
        let r = state.step(Some(InputEvent::MoveRight));
        assert!(r.gravity);
        assert_eq!(state.active().x, 4);
        assert_eq!(state.active().y, 1);
    }

    #[test]
    fn test_rejected_input_keeps_pose() {
        // Square piece occupies local columns 1..=2; x = 0 puts it against the wall.
        let mut state = state_with(2, 0, 0);
        let before = state.active();
        let r = state.step(Some(InputEvent::MoveLeft));
        assert!(!r.moved);
        assert_eq!(state.active(), before);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut state = state_with(0, 4, 2);
        for expected in [1, 2, 3, 0] {
            state.step(Some(InputEvent::Rotate));
            assert_eq!(state.active().rotation, expected);
        }
    }

    #[test]
    fn test_quit_does_not_move() {
        let mut state = state_with(0, 4, 2);
        let before = state.active();
        let r = state.step(Some(InputEvent::Quit));
        assert!(!r.moved);
        assert_eq!(state.active(), before);
    }

    #[test]
    fn test_lock_awards_base_score() {
        // Square resting on the floor (rows 15..=16 hold its cells).
        let mut state = state_with(2, 4, 14);
        let ev = state.lock_active();
        assert_eq!(ev.lines_cleared, 0);
        assert_eq!(ev.score_gained, LOCK_SCORE);
        assert_eq!(state.score(), LOCK_SCORE);
        assert_eq!(state.field().get(5, 15), Some(FieldCell::Block));
        assert_eq!(state.field().get(6, 16), Some(FieldCell::Block));
        assert_eq!(state.take_last_event(), Some(ev));
        assert_eq!(state.take_last_event(), None);
    }

    #[test]
    fn test_phase_settles_after_lock_through_step() {
        let mut state = state_with(2, 4, 14);
        let mut lock = None;
        for _ in 0..INITIAL_TICKS_PER_DROP {
            lock = lock.or(state.step(None).lock);
        }
        assert!(lock.is_some());
        assert_eq!(state.phase(), Phase::Falling);
        assert_eq!(state.active().y, 0);
    }

    #[test]
    fn test_speedup_after_ten_locks() {
        let mut state = state_with(2, 4, 14);
        for _ in 0..10 {
            state.set_active(ActivePiece::spawn(PieceId::new(2), 4));
            state.lock_active();
            state.field_mut().clear_interior();
        }
        assert_eq!(state.pieces_locked(), 10);
        assert_eq!(state.ticks_per_drop(), INITIAL_TICKS_PER_DROP - 1);
    }

    #[test]
    fn test_game_over_is_sticky() {
        let mut state = GameState::default();
        for y in 0..4 {
            for x in 1..11 {
                state.field_mut().set(x, y, FieldCell::Block);
            }
        }
        assert!(!state.spawn_piece());
        assert!(state.is_game_over());
        let before = state.active();
        let r = state.step(Some(InputEvent::MoveDown));
        assert!(r.game_over);
        assert_eq!(state.active(), before);
        assert_eq!(state.tick_counter(), 0);
    }

    #[test]
    fn test_render_overlays_piece_and_score() {
        let mut state = state_with(2, 4, 0);
        state.score = 42;
        let screen = state.render();
        let lines = screen.to_lines();
        assert_eq!(lines.len(), 19);
        assert_eq!(lines[0], "#          #");
        assert_eq!(lines[1], "#    XX    #");
        assert_eq!(lines[2], "#    XX    #");
        assert_eq!(lines[17], "############");
        assert_eq!(lines[18], "score = 42  ");
    }
}
