//! Battle map with hex grid and terrain

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::battle::hex::HexCoord;
use crate::battle::pathfinding;
use crate::battle::terrain::BattleTerrain;
use crate::battle::topology::HexTopology;
use crate::core::error::Result;

/// A single hex on the battle map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleHex {
    pub coord: HexCoord,
    pub terrain: BattleTerrain,
}

impl BattleHex {
    pub fn new(coord: HexCoord, terrain: BattleTerrain) -> Self {
        Self { coord, terrain }
    }

    pub fn movement_cost(&self) -> f32 {
        self.terrain.movement_cost()
    }
}

/// The full battle map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleMap {
    pub hexes: HashMap<HexCoord, BattleHex>,
    pub width: u32,
    pub height: u32,
}

impl BattleMap {
    /// Create a new battle map with open terrain
    pub fn new(width: u32, height: u32) -> Self {
        let mut hexes = HashMap::new();

        for q in 0..width as i32 {
            for r in 0..height as i32 {
                let coord = HexCoord::new(q, r);
                hexes.insert(coord, BattleHex::new(coord, BattleTerrain::Open));
            }
        }

        Self {
            hexes,
            width,
            height,
        }
    }

    pub fn get_hex(&self, coord: HexCoord) -> Option<&BattleHex> {
        self.hexes.get(&coord)
    }

    /// Check if coordinate is within map bounds
    pub fn contains(&self, coord: HexCoord) -> bool {
        coord.q >= 0 && coord.r >= 0 && coord.q < self.width as i32 && coord.r < self.height as i32
    }

    /// Set terrain at a coordinate
    pub fn set_terrain(&mut self, coord: HexCoord, terrain: BattleTerrain) {
        if let Some(hex) = self.hexes.get_mut(&coord) {
            hex.terrain = terrain;
        }
    }

    pub fn terrain_at(&self, coord: HexCoord) -> Option<BattleTerrain> {
        self.get_hex(coord).map(|h| h.terrain)
    }

    /// Text rows for the map, one per `r`, sheared so axial neighbors line up
    ///
    /// `overlay` wins over the terrain glyph wherever it returns a symbol.
    pub fn render_rows(&self, overlay: impl Fn(HexCoord) -> Option<char>) -> Vec<String> {
        (0..self.height as i32)
            .map(|r| {
                let cells: Vec<String> = (0..self.width as i32)
                    .map(|q| {
                        let coord = HexCoord::new(q, r);
                        overlay(coord)
                            .or_else(|| self.terrain_at(coord).map(|t| t.glyph()))
                            .unwrap_or(' ')
                            .to_string()
                    })
                    .collect();
                format!("{}{}", " ".repeat(r as usize), cells.join(" "))
            })
            .collect()
    }
}

impl HexTopology for BattleMap {
    fn in_bounds(&self, hex: HexCoord) -> bool {
        self.contains(hex)
    }

    fn is_passable(&self, hex: HexCoord) -> bool {
        self.get_hex(hex).is_some_and(|h| h.terrain.is_passable())
    }

    fn find_path(
        &self,
        start: HexCoord,
        goal: HexCoord,
        obstacles: &HashSet<HexCoord>,
    ) -> Result<Vec<HexCoord>> {
        Ok(pathfinding::find_path(self, start, goal, obstacles).unwrap_or_default())
    }

    fn path_cost(&self, path: &[HexCoord]) -> f32 {
        pathfinding::path_cost(self, path)
    }
}
