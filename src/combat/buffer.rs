//! Per-attacker damage buffer
//!
//! Each defender keeps a separate composure pool for every attacker that has
//! hit it. A new attacker's pool starts full; damage drains that pool first and
//! only the overflow reaches health. Pools never refill during combat.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::types::CharacterId;

/// How a single hit was split between buffer and health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BufferRouting {
    /// Damage soaked by the attacker's pool
    pub absorbed: i32,
    /// Damage that reaches health
    pub to_health: i32,
    /// Pool left for this attacker after the hit
    pub remaining: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DamageBuffer {
    pools: HashMap<CharacterId, i32>,
}

impl DamageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool remaining against `attacker`, if it has ever hit
    pub fn remaining(&self, attacker: CharacterId) -> Option<i32> {
        self.pools.get(&attacker).copied()
    }

    /// Number of distinct attackers with a pool
    pub fn attacker_count(&self) -> usize {
        self.pools.len()
    }

    /// Split `damage` from `attacker` between its pool and health
    ///
    /// `bypass` routes everything to health without touching (or opening) a pool.
    pub fn route(
        &mut self,
        attacker: CharacterId,
        damage: i32,
        max: i32,
        bypass: bool,
    ) -> BufferRouting {
        let damage = damage.max(0);

        if bypass {
            return BufferRouting {
                absorbed: 0,
                to_health: damage,
                remaining: self.remaining(attacker).unwrap_or(max.max(0)),
            };
        }

        let pool = self.pools.entry(attacker).or_insert(max.max(0));
        let absorbed = damage.min(*pool);
        *pool -= absorbed;

        BufferRouting {
            absorbed,
            to_health: damage - absorbed,
            remaining: *pool,
        }
    }
}
