//! Scoring module - lock bonus, line clear bonus and gravity speed-up

use crate::types::{
    LINE_CLEAR_BASE, LOCK_SCORE, MIN_TICKS_PER_DROP, PIECES_PER_SPEEDUP, TICK_RESET_MS,
};

/// Points for locking a single piece
pub fn lock_score() -> u32 {
    LOCK_SCORE
}

/// Bonus for clearing `lines` rows with a single lock: `2^lines * 10`
///
/// Zero lines earn nothing.
pub fn line_clear_score(lines: usize) -> u32 {
    if lines == 0 {
        return 0;
    }
    1u32.checked_shl(lines as u32)
        .unwrap_or(u32::MAX)
        .saturating_mul(LINE_CLEAR_BASE)
}

/// Gravity interval after the `pieces_locked`-th lock.
///
/// Every `PIECES_PER_SPEEDUP` locks the interval shrinks by one tick, never
/// going below `MIN_TICKS_PER_DROP`.
pub fn next_ticks_per_drop(current: u32, pieces_locked: u32) -> u32 {
    if pieces_locked > 0 && pieces_locked % PIECES_PER_SPEEDUP == 0 {
        current.saturating_sub(1).max(MIN_TICKS_PER_DROP)
    } else {
        current
    }
}

/// Whether the tick counter should wrap after reaching `counter` ticks
pub fn tick_window_elapsed(counter: u32, tick_ms: u32) -> bool {
    counter.saturating_mul(tick_ms) >= TICK_RESET_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_score_table() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 20);
        assert_eq!(line_clear_score(2), 40);
        assert_eq!(line_clear_score(3), 80);
        assert_eq!(line_clear_score(4), 160);
    }

    #[test]
    fn test_speedup_every_ten_locks() {
        assert_eq!(next_ticks_per_drop(10, 9), 10);
        assert_eq!(next_ticks_per_drop(10, 10), 9);
        assert_eq!(next_ticks_per_drop(9, 11), 9);
        assert_eq!(next_ticks_per_drop(9, 20), 8);
    }

    #[test]
    fn test_speedup_floor() {
        assert_eq!(next_ticks_per_drop(1, 10), 1);
        assert_eq!(next_ticks_per_drop(0, 10), 1);
    }

    #[test]
    fn test_tick_window() {
        assert!(!tick_window_elapsed(19, 50));
        assert!(tick_window_elapsed(20, 50));
        assert!(tick_window_elapsed(21, 50));
        assert!(tick_window_elapsed(1, 1000));
    }
}
