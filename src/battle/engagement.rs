//! Engagement bookkeeping between characters
//!
//! `engaged_by[B]` containing `A` means A is engaging B. Established when A
//! strikes B from an adjacent hex; released when the pair separates or either
//! side is defeated. Persists across turns otherwise.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::battle::character::{Character, Roster};
use crate::battle::hex::HexCoord;
use crate::combat::resolution::FlankingCheck;
use crate::core::types::CharacterId;

/// A released engagement pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disengagement {
    pub attacker: CharacterId,
    pub defender: CharacterId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementTracker {
    engaged_by: HashMap<CharacterId, BTreeSet<CharacterId>>,
}

impl EngagementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `attacker` is engaging `defender`; true if newly added
    pub fn engage(&mut self, attacker: CharacterId, defender: CharacterId) -> bool {
        if attacker == defender {
            return false;
        }
        self.engaged_by.entry(defender).or_default().insert(attacker)
    }

    pub fn is_engaging(&self, attacker: CharacterId, defender: CharacterId) -> bool {
        self.engaged_by
            .get(&defender)
            .is_some_and(|set| set.contains(&attacker))
    }

    /// Everyone currently engaging `defender`
    pub fn engaged_by(&self, defender: CharacterId) -> impl Iterator<Item = CharacterId> + '_ {
        self.engaged_by
            .get(&defender)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn engaged_count(&self, defender: CharacterId) -> usize {
        self.engaged_by.get(&defender).map_or(0, |set| set.len())
    }

    pub fn is_over_engaged(&self, defender: &Character) -> bool {
        self.engaged_count(defender.id) >= defender.engaged_max
    }

    /// Drop every pair involving `id`, in either role
    pub fn release_all(&mut self, id: CharacterId) -> Vec<Disengagement> {
        let mut released = Vec::new();

        if let Some(attackers) = self.engaged_by.remove(&id) {
            released.extend(attackers.into_iter().map(|attacker| Disengagement {
                attacker,
                defender: id,
            }));
        }

        for (defender, attackers) in self.engaged_by.iter_mut() {
            if attackers.remove(&id) {
                released.push(Disengagement {
                    attacker: id,
                    defender: *defender,
                });
            }
        }

        self.engaged_by.retain(|_, set| !set.is_empty());
        released.sort_by_key(|d| (d.defender, d.attacker));
        released
    }

    /// Drop pairs involving `moved` that are no longer adjacent
    pub fn release_separated(&mut self, roster: &Roster, moved: CharacterId) -> Vec<Disengagement> {
        let Some(mover) = roster.get(moved) else {
            return self.release_all(moved);
        };
        let adjacent = |other: CharacterId| {
            roster
                .get(other)
                .is_some_and(|c| c.position.distance(&mover.position) <= 1)
        };

        let mut released = Vec::new();
        for (defender, attackers) in self.engaged_by.iter_mut() {
            if *defender == moved {
                attackers.retain(|attacker| {
                    let keep = adjacent(*attacker);
                    if !keep {
                        released.push(Disengagement {
                            attacker: *attacker,
                            defender: moved,
                        });
                    }
                    keep
                });
            } else if attackers.contains(&moved) && !adjacent(*defender) {
                attackers.remove(&moved);
                released.push(Disengagement {
                    attacker: moved,
                    defender: *defender,
                });
            }
        }

        self.engaged_by.retain(|_, set| !set.is_empty());
        released.sort_by_key(|d| (d.defender, d.attacker));
        released
    }

    /// Inputs for the flanking rule when `attacker` strikes `defender`
    pub fn flanking_check(&self, attacker: &Character, defender: &Character) -> FlankingCheck {
        FlankingCheck {
            attacker_behind: is_behind(defender, attacker.position),
            defender_engaged: self.engaged_count(defender.id),
            defender_capacity: defender.engaged_max,
            attacker_engaging: self.is_engaging(attacker.id, defender.id),
        }
    }

    /// Number of defenders with at least one engager
    pub fn len(&self) -> usize {
        self.engaged_by.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engaged_by.is_empty()
    }
}

/// The hex directly behind `defender`, opposite its facing
pub fn rear_hex(defender: &Character) -> HexCoord {
    defender.position.neighbor(defender.facing.opposite())
}

/// Is `from` geometrically behind the defender?
pub fn is_behind(defender: &Character, from: HexCoord) -> bool {
    rear_hex(defender) == from
}
