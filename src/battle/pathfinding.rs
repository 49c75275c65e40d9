//! A* pathfinding for battle maps
//!
//! Respects terrain costs and treats occupied hexes as walls.

use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::battle::battle_map::BattleMap;
use crate::battle::hex::HexCoord;

/// Node in the A* open set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PathNode {
    coord: HexCoord,
    f_cost: OrderedFloat<f32>,
}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap; coord keeps pops deterministic
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find path using A* algorithm
///
/// Returns None if no path exists. Hexes in `obstacles` are never entered,
/// including the goal itself; the start hex is exempt.
pub fn find_path(
    map: &BattleMap,
    start: HexCoord,
    goal: HexCoord,
    obstacles: &HashSet<HexCoord>,
) -> Option<Vec<HexCoord>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<HexCoord, HexCoord> = HashMap::new();
    let mut g_scores: HashMap<HexCoord, OrderedFloat<f32>> = HashMap::new();

    g_scores.insert(start, OrderedFloat(0.0));
    open_set.push(PathNode {
        coord: start,
        f_cost: OrderedFloat(start.distance(&goal) as f32),
    });

    while let Some(current) = open_set.pop() {
        if current.coord == goal {
            return Some(reconstruct_path(&came_from, current.coord));
        }

        let current_g = g_scores
            .get(&current.coord)
            .copied()
            .unwrap_or(OrderedFloat(f32::INFINITY));

        for neighbor in current.coord.neighbors() {
            if obstacles.contains(&neighbor) {
                continue;
            }

            let Some(hex) = map.get_hex(neighbor) else {
                continue;
            };

            let move_cost = hex.movement_cost();
            if move_cost.is_infinite() {
                continue;
            }

            let tentative_g = current_g + move_cost;
            let neighbor_g = g_scores
                .get(&neighbor)
                .copied()
                .unwrap_or(OrderedFloat(f32::INFINITY));

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.coord);
                g_scores.insert(neighbor, tentative_g);

                open_set.push(PathNode {
                    coord: neighbor,
                    f_cost: tentative_g + neighbor.distance(&goal) as f32,
                });
            }
        }
    }

    None
}

/// Reconstruct path from came_from map
fn reconstruct_path(came_from: &HashMap<HexCoord, HexCoord>, mut current: HexCoord) -> Vec<HexCoord> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Sum of terrain costs for every hex after the first
pub fn path_cost(map: &BattleMap, path: &[HexCoord]) -> f32 {
    path.iter()
        .skip(1)
        .filter_map(|coord| map.get_hex(*coord))
        .map(|hex| hex.movement_cost())
        .sum()
}
