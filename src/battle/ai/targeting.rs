//! Stock AI: strike an adjacent hostile, close on the nearest one, or regroup

use std::collections::HashSet;
use tracing::debug;

use crate::battle::ai::{BattleAI, DecisionContext};
use crate::battle::character::{Character, Disposition};
use crate::battle::hex::HexCoord;
use crate::battle::intent::ActionIntent;
use crate::combat::weapons::AttackType;
use crate::core::error::Result;
use crate::core::types::CharacterId;

/// Heavy swings against heavy armor, light otherwise
pub fn choose_attack_type(defender: &Character) -> AttackType {
    if defender.loadout.armor.is_heavy() {
        AttackType::Heavy
    } else {
        AttackType::Light
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TargetingAi;

impl TargetingAi {
    pub fn new() -> Self {
        Self
    }
}

impl BattleAI for TargetingAi {
    fn decide(&mut self, context: &DecisionContext<'_>, actor: CharacterId) -> Result<ActionIntent> {
        let me = context.character(actor)?;
        if me.is_defeated() {
            return Ok(ActionIntent::Wait);
        }

        let hostiles = hostiles_of(context, me);
        let intent = if hostiles.is_empty() {
            regroup(context, me)?
        } else if let Some(target) = adjacent_target(context, me, &hostiles) {
            ActionIntent::attack(target.position, choose_attack_type(target))
        } else if let Some(closest) = closest_hostile(me, &hostiles) {
            step_toward(context, me, closest.position)?
                .map(ActionIntent::move_to)
                .unwrap_or(ActionIntent::Wait)
        } else {
            ActionIntent::Wait
        };

        debug!(
            turn = context.turn,
            actor = %me.id,
            hostiles = hostiles.len(),
            "{} chooses {:?}",
            me.name,
            intent
        );
        Ok(intent)
    }
}

/// Living hostiles in roster order; neutral characters never seek a fight
fn hostiles_of<'a>(context: &DecisionContext<'a>, me: &Character) -> Vec<&'a Character> {
    if me.disposition != Disposition::Aggressive {
        return Vec::new();
    }
    context
        .hostility
        .effective_hostiles(context.roster, me.id)
        .into_iter()
        .filter_map(|id| context.roster.get(id))
        .collect()
}

/// A hostile within reach; whoever last struck us wins, else roster order
fn adjacent_target<'a>(
    context: &DecisionContext<'_>,
    me: &Character,
    hostiles: &[&'a Character],
) -> Option<&'a Character> {
    let reach = context.config.attack_range;
    let in_reach: Vec<&'a Character> = hostiles
        .iter()
        .copied()
        .filter(|h| {
            let d = context.topology.distance(me.position, h.position);
            d >= 1 && d <= reach
        })
        .collect();

    in_reach
        .iter()
        .copied()
        .find(|h| Some(h.id) == me.last_attacked_by)
        .or_else(|| in_reach.first().copied())
}

/// Nearest hostile; ties go to whoever last struck us, then roster order
fn closest_hostile<'a>(me: &Character, hostiles: &[&'a Character]) -> Option<&'a Character> {
    let key = |c: &Character| {
        (
            me.position.distance(&c.position),
            Some(c.id) != me.last_attacked_by,
        )
    };
    let mut best: Option<&'a Character> = None;
    for candidate in hostiles.iter().copied() {
        if best.map_or(true, |b| key(candidate) < key(b)) {
            best = Some(candidate);
        }
    }
    best
}

/// Head for the nearest living ally unless already beside one
fn regroup(context: &DecisionContext<'_>, me: &Character) -> Result<ActionIntent> {
    let Some(ally) = context
        .roster
        .living_allies_of(me.id)
        .into_iter()
        .min_by_key(|a| me.position.distance(&a.position))
    else {
        return Ok(ActionIntent::Wait);
    };

    if me.position.distance(&ally.position) <= 1 {
        return Ok(ActionIntent::Wait);
    }

    Ok(step_toward(context, me, ally.position)?
        .map(ActionIntent::move_to)
        .unwrap_or(ActionIntent::Wait))
}

/// First step of the cheapest path to any free hex beside `center`
///
/// Paths are ranked by terrain cost, then hex count. Every occupied hex,
/// defeated or not, is an obstacle.
fn step_toward(
    context: &DecisionContext<'_>,
    me: &Character,
    center: HexCoord,
) -> Result<Option<HexCoord>> {
    let obstacles: HashSet<HexCoord> = context
        .roster
        .iter()
        .filter(|c| c.id != me.id)
        .map(|c| c.position)
        .collect();

    let mut best: Option<(f32, Vec<HexCoord>)> = None;
    for goal in context.topology.neighbors(center) {
        if goal == me.position
            || obstacles.contains(&goal)
            || !context.topology.in_bounds(goal)
            || !context.topology.is_passable(goal)
        {
            continue;
        }

        let path = context.topology.find_path(me.position, goal, &obstacles)?;
        if path.len() < 2 {
            continue;
        }
        let cost = context.topology.path_cost(&path);
        let better = best.as_ref().map_or(true, |(best_cost, best_path)| {
            cost < *best_cost || (cost == *best_cost && path.len() < best_path.len())
        });
        if better {
            best = Some((cost, path));
        }
    }

    Ok(best.map(|(_, path)| path[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::battle::battle_map::BattleMap;
    use crate::battle::character::Roster;
    use crate::battle::engagement::EngagementTracker;
    use crate::battle::hostility::HostilityTable;
    use crate::battle::terrain::BattleTerrain;
    use crate::combat::armor::ArmorProperties;
    use crate::combat::equipment::Loadout;
    use crate::combat::weapons::WeaponProperties;
    use crate::core::config::CombatConfig;
    use crate::core::types::FactionTag;

    struct Fixture {
        map: BattleMap,
        roster: Roster,
        hostility: HostilityTable,
        engagements: EngagementTracker,
        intents: HashMap<CharacterId, ActionIntent>,
        config: CombatConfig,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                map: BattleMap::new(10, 10),
                roster: Roster::new(),
                hostility: HostilityTable::new(),
                engagements: EngagementTracker::new(),
                intents: HashMap::new(),
                config: CombatConfig::default(),
            }
        }

        fn add(&mut self, faction: &str, q: i32, r: i32, disposition: Disposition) -> CharacterId {
            self.roster
                .add(
                    Character::new(faction, FactionTag::new(faction), HexCoord::new(q, r))
                        .with_disposition(disposition),
                )
                .unwrap()
        }

        fn decide(&self, actor: CharacterId) -> ActionIntent {
            let context = DecisionContext {
                roster: &self.roster,
                intents: &self.intents,
                hostility: &self.hostility,
                engagements: &self.engagements,
                topology: &self.map,
                config: &self.config,
                turn: 1,
            };
            TargetingAi::new().decide(&context, actor).unwrap()
        }
    }

    #[test]
    fn test_attacks_adjacent_hostile() {
        let mut f = Fixture::new();
        let me = f.add("wolves", 2, 2, Disposition::Aggressive);
        let prey = f.add("sheep", 3, 2, Disposition::Neutral);
        f.hostility.add_enemy(me, prey);

        assert_eq!(
            f.decide(me),
            ActionIntent::attack(HexCoord::new(3, 2), AttackType::Light)
        );
    }

    #[test]
    fn test_heavy_attack_against_heavy_armor() {
        let mut f = Fixture::new();
        let me = f.add("a", 2, 2, Disposition::Aggressive);
        let knight = f.roster
            .add(
                Character::new("knight", FactionTag::new("b"), HexCoord::new(3, 2)).with_loadout(
                    Loadout::new(WeaponProperties::longsword(), None, ArmorProperties::plate()),
                ),
            )
            .unwrap();
        f.hostility.add_enemy(me, knight);

        assert_eq!(
            f.decide(me),
            ActionIntent::attack(HexCoord::new(3, 2), AttackType::Heavy)
        );
    }

    #[test]
    fn test_prefers_last_attacker_among_adjacent() {
        let mut f = Fixture::new();
        let me = f.add("a", 2, 2, Disposition::Aggressive);
        let first = f.add("b", 3, 2, Disposition::Aggressive);
        let second = f.add("b", 1, 2, Disposition::Aggressive);
        f.hostility.add_enemy(me, first);
        f.hostility.add_enemy(me, second);
        f.roster.get_mut(me).unwrap().last_attacked_by = Some(second);

        assert_eq!(f.decide(me).target(), Some(HexCoord::new(1, 2)));
    }

    #[test]
    fn test_moves_toward_distant_hostile() {
        let mut f = Fixture::new();
        let me = f.add("a", 0, 0, Disposition::Aggressive);
        let foe = f.add("b", 4, 0, Disposition::Neutral);
        f.hostility.add_enemy(me, foe);

        match f.decide(me) {
            ActionIntent::Move { target } => {
                assert_eq!(HexCoord::new(0, 0).distance(&target), 1);
                assert!(target.distance(&HexCoord::new(4, 0)) < 4);
            }
            other => panic!("expected move, got {other:?}"),
        }
    }

    /// The three-hex approach ends in forest; the four-hex one is all open
    #[test]
    fn test_approach_prefers_cheaper_terrain_over_fewer_hexes() {
        let mut f = Fixture::new();
        let me = f.add("a", 0, 1, Disposition::Aggressive);
        let foe = f.add("b", 4, 1, Disposition::Neutral);
        f.hostility.add_enemy(me, foe);
        for q in 0..10 {
            f.map.set_terrain(HexCoord::new(q, 2), BattleTerrain::Wall);
        }
        f.map.set_terrain(HexCoord::new(1, 1), BattleTerrain::Rough);
        f.map.set_terrain(HexCoord::new(3, 1), BattleTerrain::Forest);

        assert_eq!(f.decide(me), ActionIntent::move_to(HexCoord::new(1, 0)));
    }

    #[test]
    fn test_neutral_ignores_faction_hostility() {
        let mut f = Fixture::new();
        let me = f.add("guards", 0, 0, Disposition::Neutral);
        let captain = f.add("guards", 0, 1, Disposition::Aggressive);
        let thief = f.add("thieves", 1, 0, Disposition::Neutral);
        f.hostility.add_enemy(captain, thief);

        // Beside the captain already, so regrouping leaves nothing to do
        assert_eq!(f.decide(me), ActionIntent::Wait);
        assert!(f
            .hostility
            .effective_hostiles(&f.roster, me)
            .contains(&thief));
    }

    #[test]
    fn test_hostility_shared_with_faction() {
        let mut f = Fixture::new();
        let me = f.add("guards", 0, 0, Disposition::Aggressive);
        let captain = f.add("guards", 0, 1, Disposition::Aggressive);
        let thief = f.add("thieves", 1, 0, Disposition::Neutral);
        f.hostility.add_enemy(captain, thief);

        assert_eq!(f.decide(me).kind(), crate::battle::intent::IntentKind::Attack);
    }

    #[test]
    fn test_waits_when_no_path() {
        let mut f = Fixture::new();
        let me = f.add("a", 0, 0, Disposition::Aggressive);
        let foe = f.add("b", 6, 6, Disposition::Neutral);
        f.hostility.add_enemy(me, foe);
        for n in HexCoord::new(0, 0).neighbors() {
            f.map.set_terrain(n, BattleTerrain::Wall);
        }

        assert_eq!(f.decide(me), ActionIntent::Wait);
    }

    #[test]
    fn test_neutral_regroups_with_ally() {
        let mut f = Fixture::new();
        let me = f.add("village", 0, 0, Disposition::Neutral);
        f.add("village", 5, 0, Disposition::Neutral);

        match f.decide(me) {
            ActionIntent::Move { target } => {
                assert!(target.distance(&HexCoord::new(5, 0)) < 5);
            }
            other => panic!("expected move, got {other:?}"),
        }
    }

    #[test]
    fn test_neutral_waits_beside_ally() {
        let mut f = Fixture::new();
        let me = f.add("village", 0, 0, Disposition::Neutral);
        f.add("village", 1, 0, Disposition::Neutral);
        assert_eq!(f.decide(me), ActionIntent::Wait);
    }

    #[test]
    fn test_lone_character_waits() {
        let mut f = Fixture::new();
        let me = f.add("hermit", 3, 3, Disposition::Neutral);
        assert_eq!(f.decide(me), ActionIntent::Wait);
    }

    #[test]
    fn test_defeated_hostile_ignored() {
        let mut f = Fixture::new();
        let me = f.add("a", 2, 2, Disposition::Aggressive);
        let foe = f.add("b", 3, 2, Disposition::Aggressive);
        f.hostility.add_enemy(me, foe);
        f.roster.get_mut(foe).unwrap().take_damage(me, 1000, true);

        assert_eq!(f.decide(me), ActionIntent::Wait);
    }
}
