//! Hex topology seam
//!
//! Everything the battle needs to know about the board: distances, neighbors,
//! bounds, passability and paths. `BattleMap` is the stock implementation;
//! hosts with their own grid plug in here.

use std::collections::HashSet;

use crate::battle::hex::HexCoord;
use crate::core::error::Result;

pub trait HexTopology {
    /// Hex steps between two coordinates
    fn distance(&self, a: HexCoord, b: HexCoord) -> u32 {
        a.distance(&b)
    }

    /// The six surrounding coordinates, whether or not they are on the map
    fn neighbors(&self, hex: HexCoord) -> [HexCoord; 6] {
        hex.neighbors()
    }

    fn in_bounds(&self, hex: HexCoord) -> bool;

    fn is_passable(&self, hex: HexCoord) -> bool;

    /// Shortest path from `start` to `goal` avoiding `obstacles`
    ///
    /// The returned path begins with `start` and ends with `goal`. An empty
    /// vector means no path exists. `Err` means the topology itself failed.
    fn find_path(
        &self,
        start: HexCoord,
        goal: HexCoord,
        obstacles: &HashSet<HexCoord>,
    ) -> Result<Vec<HexCoord>>;

    /// Movement cost of walking `path`, excluding its first hex
    ///
    /// Uniform boards count steps; weighted boards should sum what
    /// `find_path` minimizes.
    fn path_cost(&self, path: &[HexCoord]) -> f32 {
        path.len().saturating_sub(1) as f32
    }
}
