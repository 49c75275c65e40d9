//! Execution order for a turn
//!
//! All moves run before any attack. Within each queue the lowest speed score
//! acts first, higher initiative breaks ties, and roster order settles
//! whatever is left.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::battle::character::Roster;
use crate::battle::intent::ActionIntent;
use crate::core::config::CombatConfig;
use crate::core::types::CharacterId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: CharacterId,
    pub speed: i32,
    pub initiative: i32,
    pub roster_index: usize,
}

/// Sort a queue in execution order; stable, so re-sorting is a no-op
pub fn sort_queue(queue: &mut [QueueEntry]) {
    queue.sort_by(|a, b| {
        a.speed
            .cmp(&b.speed)
            .then_with(|| b.initiative.cmp(&a.initiative))
            .then_with(|| a.roster_index.cmp(&b.roster_index))
    });
}

/// Movers and attackers for this turn, each sorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionQueues {
    pub movers: Vec<QueueEntry>,
    pub attackers: Vec<QueueEntry>,
}

impl ExecutionQueues {
    /// Split `combatants` by intent kind; waiters and unknown ids are dropped
    pub fn build(
        roster: &Roster,
        combatants: &[CharacterId],
        intents: &HashMap<CharacterId, ActionIntent>,
        config: &CombatConfig,
    ) -> Self {
        let mut queues = Self::default();

        for id in combatants {
            let (Some(character), Some(index), Some(intent)) =
                (roster.get(*id), roster.index_of(*id), intents.get(id))
            else {
                continue;
            };

            let entry = |speed| QueueEntry {
                id: *id,
                speed,
                initiative: character.initiative(),
                roster_index: index,
            };

            match intent {
                ActionIntent::Move { .. } => queues.movers.push(entry(character.move_speed())),
                ActionIntent::Attack { attack_type, .. } => queues
                    .attackers
                    .push(entry(character.attack_speed(*attack_type, config))),
                ActionIntent::Wait => {}
            }
        }

        sort_queue(&mut queues.movers);
        sort_queue(&mut queues.attackers);
        queues
    }

    pub fn is_empty(&self) -> bool {
        self.movers.is_empty() && self.attackers.is_empty()
    }
}
