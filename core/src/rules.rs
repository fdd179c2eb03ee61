use serde::{Deserialize, Serialize};

use crate::*;

/// Tunable constants of a game, every field has a default so partial rule files work.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub size: Coord2,
    /// Shallowest row the ring may be buried at.
    pub ring_min_row: Coord,
    pub starting_money: Money,
    pub max_health: Health,
    pub mine_entry_fee: Money,
    /// Money needed, together with the ring, to win.
    pub victory_money: Money,
    /// Going below this balance loses the game.
    pub debt_floor: Money,
    pub cave_in_chance: f64,
    pub viewport_rows: Coord,
    pub camera_margin: Coord,
}

impl GameRules {
    pub const DEFAULT_SIZE: Coord2 = (39, 114);

    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if width == 0 || height == 0 {
            return Err(GameError::InvalidRules("field must be at least one cell wide and tall"));
        }
        if self.ring_min_row >= height {
            return Err(GameError::InvalidRules("ring row must lie inside the field"));
        }
        if self.ring_min_row == 0 {
            return Err(GameError::InvalidRules("ring cannot be buried in the surface row"));
        }
        if !(0.0..=1.0).contains(&self.cave_in_chance) {
            return Err(GameError::InvalidRules("cave-in chance must be within 0 and 1"));
        }
        if self.max_health <= 0 {
            return Err(GameError::InvalidRules("max health must be positive"));
        }
        if self.viewport_rows == 0 {
            return Err(GameError::InvalidRules("viewport must show at least one row"));
        }
        Ok(())
    }

    /// Where a fresh player stands: the middle of the surface row.
    pub const fn start_position(&self) -> Coord2 {
        (self.size.0 / 2, 0)
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            ring_min_row: 50,
            starting_money: 1500,
            max_health: 100,
            mine_entry_fee: 30,
            victory_money: 20_000,
            debt_floor: -100,
            cave_in_chance: 0.05,
            // (600 px window - 50 px town bar) / 16 px tiles
            viewport_rows: 34,
            camera_margin: 3,
        }
    }
}
