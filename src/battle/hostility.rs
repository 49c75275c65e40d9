//! Who considers whom an enemy
//!
//! Kept as a central index keyed by character id. Hostility is shared across a
//! faction: an ally's enemies are treated as one's own when picking targets.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::battle::character::Roster;
use crate::core::types::CharacterId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostilityTable {
    enemies: HashMap<CharacterId, BTreeSet<CharacterId>>,
}

impl HostilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// `holder` now counts `enemy` as hostile; true if newly added
    pub fn add_enemy(&mut self, holder: CharacterId, enemy: CharacterId) -> bool {
        if holder == enemy {
            return false;
        }
        self.enemies.entry(holder).or_default().insert(enemy)
    }

    /// Mark two characters hostile to each other
    pub fn declare_mutual(&mut self, a: CharacterId, b: CharacterId) {
        self.add_enemy(a, b);
        self.add_enemy(b, a);
    }

    pub fn is_enemy(&self, holder: CharacterId, other: CharacterId) -> bool {
        self.enemies
            .get(&holder)
            .is_some_and(|set| set.contains(&other))
    }

    pub fn enemies_of(&self, holder: CharacterId) -> impl Iterator<Item = CharacterId> + '_ {
        self.enemies
            .get(&holder)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Living hostiles of `id`: its own enemies plus those of living allies
    ///
    /// Returned in roster order, never including `id` itself.
    pub fn effective_hostiles(&self, roster: &Roster, id: CharacterId) -> Vec<CharacterId> {
        let mut pool: HashSet<CharacterId> = self.enemies_of(id).collect();
        for ally in roster.living_allies_of(id) {
            pool.extend(self.enemies_of(ally.id));
        }

        roster
            .living()
            .filter(|c| c.id != id && pool.contains(&c.id))
            .map(|c| c.id)
            .collect()
    }

    /// Does any living character still hold a living enemy?
    pub fn any_active(&self, roster: &Roster) -> bool {
        self.enemies.iter().any(|(holder, set)| {
            roster.is_alive(*holder) && set.iter().any(|enemy| roster.is_alive(*enemy))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::character::Character;
    use crate::battle::hex::HexCoord;
    use crate::core::types::FactionTag;

    fn add(roster: &mut Roster, faction: &str, q: i32) -> CharacterId {
        roster
            .add(Character::new("c", FactionTag::new(faction), HexCoord::new(q, 0)))
            .unwrap()
    }

    #[test]
    fn test_add_enemy_once() {
        let mut table = HostilityTable::new();
        let a = CharacterId::new();
        let b = CharacterId::new();
        assert!(table.add_enemy(a, b));
        assert!(!table.add_enemy(a, b));
        assert!(table.is_enemy(a, b));
        assert!(!table.is_enemy(b, a));
        assert!(!table.add_enemy(a, a));
    }

    #[test]
    fn test_hostility_shared_across_faction() {
        let mut roster = Roster::new();
        let guard = add(&mut roster, "town", 0);
        let captain = add(&mut roster, "town", 1);
        let bandit = add(&mut roster, "bandits", 5);

        let mut table = HostilityTable::new();
        table.add_enemy(captain, bandit);

        assert_eq!(table.effective_hostiles(&roster, guard), vec![bandit]);
        assert!(table.effective_hostiles(&roster, bandit).is_empty());
    }

    #[test]
    fn test_defeated_hostiles_filtered() {
        let mut roster = Roster::new();
        let a = add(&mut roster, "a", 0);
        let b = add(&mut roster, "b", 3);

        let mut table = HostilityTable::new();
        table.declare_mutual(a, b);
        assert!(table.any_active(&roster));

        let victim = roster.get_mut(b).unwrap();
        victim.buffer_max = 0;
        victim.take_damage(a, 1000, true);

        assert!(table.effective_hostiles(&roster, a).is_empty());
        assert!(!table.any_active(&roster));
    }

    #[test]
    fn test_defeated_ally_does_not_share_enemies() {
        let mut roster = Roster::new();
        let a = add(&mut roster, "a", 0);
        let ally = add(&mut roster, "a", 1);
        let foe = add(&mut roster, "b", 4);

        let mut table = HostilityTable::new();
        table.add_enemy(ally, foe);
        roster.get_mut(ally).unwrap().take_damage(foe, 1000, true);

        assert!(table.effective_hostiles(&roster, a).is_empty());
    }
}
