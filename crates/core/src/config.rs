//! Game configuration: field geometry and tick rate.

use thiserror::Error;

use crate::types::{
    DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, INITIAL_TICKS_PER_DROP, MASK_SIZE, TICK_MS,
    TICK_RESET_MS,
};

/// Smallest width that keeps every column of the spawn mask
/// (`width / 2 ..= width / 2 + 3`) inside the field
pub const MIN_FIELD_WIDTH: u16 = 2 * (MASK_SIZE as u16 - 1) + 1;

/// Smallest height that still leaves one playable row above the floor
pub const MIN_FIELD_HEIGHT: u16 = 2;

/// Longest tick for which the tick counter still reaches the first drop
/// interval before its one-second reset
pub const MAX_TICK_MS: u32 = TICK_RESET_MS / INITIAL_TICKS_PER_DROP;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("field width {0} is too small (minimum {min})", min = MIN_FIELD_WIDTH)]
    WidthTooSmall(u16),
    #[error("field height {0} is too small (minimum {min})", min = MIN_FIELD_HEIGHT)]
    HeightTooSmall(u16),
    #[error("tick length must be at least 1ms")]
    ZeroTick,
    #[error("tick of {0}ms is too slow for gravity (maximum {max}ms)", max = MAX_TICK_MS)]
    TickTooSlow(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub field_width: u16,
    pub field_height: u16,
    pub tick_ms: u32,
}

impl GameConfig {
    pub fn new(field_width: u16, field_height: u16, tick_ms: u32) -> Result<Self, ConfigError> {
        let config = Self {
            field_width,
            field_height,
            tick_ms,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width < MIN_FIELD_WIDTH {
            return Err(ConfigError::WidthTooSmall(self.field_width));
        }
        if self.field_height < MIN_FIELD_HEIGHT {
            return Err(ConfigError::HeightTooSmall(self.field_height));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.tick_ms > MAX_TICK_MS {
            return Err(ConfigError::TickTooSlow(self.tick_ms));
        }
        Ok(())
    }

    /// Spawn column for new pieces (top-left corner of the mask)
    pub fn spawn_x(&self) -> i32 {
        self.field_width as i32 / 2
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            tick_ms: TICK_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.spawn_x(), 6);
    }

    #[test]
    fn rejects_degenerate_fields() {
        assert_eq!(GameConfig::new(2, 18, 50), Err(ConfigError::WidthTooSmall(2)));
        assert_eq!(GameConfig::new(12, 1, 50), Err(ConfigError::HeightTooSmall(1)));
        assert_eq!(GameConfig::new(12, 18, 0), Err(ConfigError::ZeroTick));
    }

    #[test]
    fn width_must_hold_the_spawn_mask() {
        assert_eq!(MIN_FIELD_WIDTH, 7);
        for width in 3..=40u16 {
            let spawn_x = width as i32 / 2;
            let in_bounds = spawn_x + MASK_SIZE as i32 - 1 <= width as i32 - 1;
            match GameConfig::new(width, 18, 50) {
                Ok(config) => {
                    assert!(in_bounds, "width {} accepted", width);
                    assert_eq!(config.spawn_x(), spawn_x);
                }
                Err(e) => {
                    assert!(!in_bounds, "width {} rejected", width);
                    assert_eq!(e, ConfigError::WidthTooSmall(width));
                }
            }
        }
    }

    #[test]
    fn tick_must_leave_room_for_a_drop() {
        assert_eq!(MAX_TICK_MS, 100);
        assert!(GameConfig::new(12, 18, MAX_TICK_MS).is_ok());
        assert_eq!(
            GameConfig::new(12, 18, MAX_TICK_MS + 1),
            Err(ConfigError::TickTooSlow(MAX_TICK_MS + 1))
        );
        assert_eq!(
            GameConfig::new(12, 18, 200),
            Err(ConfigError::TickTooSlow(200))
        );
    }

    #[test]
    fn error_messages_name_the_limit() {
        let msg = ConfigError::WidthTooSmall(1).to_string();
        assert_eq!(msg, "field width 1 is too small (minimum 7)");
        let msg = ConfigError::TickTooSlow(200).to_string();
        assert_eq!(msg, "tick of 200ms is too slow for gravity (maximum 100ms)");
    }
}
