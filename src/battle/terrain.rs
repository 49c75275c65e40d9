//! Battle terrain types and their effects on movement

use serde::{Deserialize, Serialize};

/// Primary terrain type for a battle hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BattleTerrain {
    #[default]
    Open,
    Rough,
    Forest,
    ShallowWater,
    DeepWater,
    Wall,
    Road,
}

impl BattleTerrain {
    /// Movement cost multiplier (1.0 = normal)
    pub fn movement_cost(&self) -> f32 {
        match self {
            BattleTerrain::Open => 1.0,
            BattleTerrain::Rough => 1.5,
            BattleTerrain::Forest => 2.5,
            BattleTerrain::ShallowWater => 2.0,
            BattleTerrain::DeepWater => f32::INFINITY,
            BattleTerrain::Wall => f32::INFINITY,
            BattleTerrain::Road => 0.7,
        }
    }

    /// Can a character stand on or pass through this terrain?
    pub fn is_passable(&self) -> bool {
        self.movement_cost().is_finite()
    }

    /// Single-character map symbol for text output
    pub fn glyph(&self) -> char {
        match self {
            BattleTerrain::Open => '.',
            BattleTerrain::Rough => ',',
            BattleTerrain::Forest => 'T',
            BattleTerrain::ShallowWater => '~',
            BattleTerrain::DeepWater => 'W',
            BattleTerrain::Wall => '#',
            BattleTerrain::Road => '=',
        }
    }
}
