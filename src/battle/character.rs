//! Combatants and the battle roster
//!
//! A `Character` owns its vitals, loadout and lifecycle flags. Who hates whom
//! and who is engaging whom live in central tables (`HostilityTable`,
//! `EngagementTracker`), never inside the record.

use serde::{Deserialize, Serialize};

use crate::battle::hex::{HexCoord, HexDirection};
use crate::combat::buffer::{BufferRouting, DamageBuffer};
use crate::combat::equipment::Loadout;
use crate::combat::resolution::{AttackerProfile, CombatRatings, DefenderProfile};
use crate::combat::weapons::AttackType;
use crate::core::config::CombatConfig;
use crate::core::error::{BattleError, Result};
use crate::core::types::{CharacterId, FactionTag};

/// Whether a character picks fights on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    #[default]
    Neutral,
    Aggressive,
}

/// Who supplies a character's intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Controller {
    Player,
    #[default]
    Ai,
}

/// Raw stats the core reads for ordering, damage and engagement capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: i32,
    pub dexterity: i32,
    pub will: i32,
    pub instinct: i32,
    /// Cerebral presence; bounds how many opponents can engage at once
    pub presence: i32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            will: 10,
            instinct: 10,
            presence: 8,
        }
    }
}

impl Attributes {
    /// Tie-breaker for speed ordering (higher acts first)
    pub fn initiative(&self) -> i32 {
        self.will.saturating_add(self.instinct)
    }

    /// Opponents this character can face before being over-engaged
    pub fn engagement_capacity(&self) -> usize {
        (self.presence / 4).max(1) as usize
    }
}

/// Result of applying damage to a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DamageReport {
    pub routing: BufferRouting,
    pub health_before: i32,
    pub health_after: i32,
    /// True only on the hit that drops health to zero
    pub defeated_now: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub faction: FactionTag,
    pub disposition: Disposition,
    pub controller: Controller,

    pub position: HexCoord,
    pub facing: HexDirection,

    health: i32,
    max_health: i32,
    buffer: DamageBuffer,
    pub buffer_max: i32,

    pub attributes: Attributes,
    pub ratings: CombatRatings,
    pub loadout: Loadout,
    pub engaged_max: usize,

    defeated: bool,
    pub last_attacked_by: Option<CharacterId>,
}

impl Character {
    pub fn new(name: impl Into<String>, faction: FactionTag, position: HexCoord) -> Self {
        let attributes = Attributes::default();
        Self {
            id: CharacterId::new(),
            name: name.into(),
            faction,
            disposition: Disposition::default(),
            controller: Controller::default(),
            position,
            facing: HexDirection::default(),
            health: 20,
            max_health: 20,
            buffer: DamageBuffer::new(),
            buffer_max: 8,
            attributes,
            ratings: CombatRatings::default(),
            loadout: Loadout::default(),
            engaged_max: attributes.engagement_capacity(),
            defeated: false,
            last_attacked_by: None,
        }
    }

    pub fn with_disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = disposition;
        self
    }

    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_facing(mut self, facing: HexDirection) -> Self {
        self.facing = facing;
        self
    }

    /// Sets max health and refills to it
    pub fn with_max_health(mut self, max_health: i32) -> Self {
        self.max_health = max_health.max(1);
        self.health = self.max_health;
        self
    }

    pub fn with_buffer_max(mut self, buffer_max: i32) -> Self {
        self.buffer_max = buffer_max.max(0);
        self
    }

    /// Replaces attributes and re-derives engagement capacity
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self.engaged_max = attributes.engagement_capacity();
        self
    }

    pub fn with_ratings(mut self, ratings: CombatRatings) -> Self {
        self.ratings = ratings;
        self
    }

    pub fn with_loadout(mut self, loadout: Loadout) -> Self {
        self.loadout = loadout;
        self
    }

    pub fn with_engaged_max(mut self, engaged_max: usize) -> Self {
        self.engaged_max = engaged_max;
        self
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    pub fn is_player(&self) -> bool {
        self.controller == Controller::Player
    }

    pub fn buffer(&self) -> &DamageBuffer {
        &self.buffer
    }

    /// Buffer left against `attacker`; a fresh attacker faces the full pool
    pub fn buffer_against(&self, attacker: CharacterId) -> i32 {
        self.buffer.remaining(attacker).unwrap_or(self.buffer_max)
    }

    /// Speed score when moving (lower acts first)
    pub fn move_speed(&self) -> i32 {
        self.loadout.armor.mobility.saturating_sub(self.attributes.strength)
    }

    /// Speed score when attacking (lower acts first)
    pub fn attack_speed(&self, attack_type: AttackType, config: &CombatConfig) -> i32 {
        self.loadout
            .attack_speed(attack_type, config)
            .saturating_sub(self.attributes.dexterity)
    }

    pub fn initiative(&self) -> i32 {
        self.attributes.initiative()
    }

    pub fn attacker_profile(&self) -> AttackerProfile<'_> {
        AttackerProfile {
            ratings: self.ratings,
            strength: self.attributes.strength,
            loadout: &self.loadout,
        }
    }

    pub fn defender_profile(&self) -> DefenderProfile<'_> {
        DefenderProfile {
            ratings: self.ratings,
            loadout: &self.loadout,
        }
    }

    /// Route a hit from `attacker` through its buffer pool, then health
    pub fn take_damage(&mut self, attacker: CharacterId, damage: i32, bypass: bool) -> DamageReport {
        let health_before = self.health;
        if self.defeated {
            return DamageReport {
                routing: BufferRouting::default(),
                health_before,
                health_after: health_before,
                defeated_now: false,
            };
        }

        let routing = self.buffer.route(attacker, damage, self.buffer_max, bypass);
        self.health = (self.health - routing.to_health).clamp(0, self.max_health);

        let defeated_now = self.health == 0;
        if defeated_now {
            self.defeated = true;
        }

        DamageReport {
            routing,
            health_before,
            health_after: self.health,
            defeated_now,
        }
    }

    /// Verify the vitals invariants
    pub fn check_invariants(&self) -> Result<()> {
        if self.health < 0 || self.health > self.max_health {
            return Err(BattleError::Invariant(format!(
                "{} health {} outside [0, {}]",
                self.name, self.health, self.max_health
            )));
        }
        if self.defeated != (self.health == 0) {
            return Err(BattleError::Invariant(format!(
                "{} defeated flag {} disagrees with health {}",
                self.name, self.defeated, self.health
            )));
        }
        Ok(())
    }
}

/// Every character on the field, in stable insertion order
///
/// Defeated characters stay in the roster and keep blocking their hex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a character; two characters can never share a hex
    pub fn add(&mut self, character: Character) -> Result<CharacterId> {
        if self.occupant_at(character.position).is_some() {
            return Err(BattleError::HexOccupied(character.position));
        }
        let id = character.id;
        self.characters.push(character);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    pub fn require(&self, id: CharacterId) -> Result<&Character> {
        self.get(id).ok_or(BattleError::CharacterNotFound(id))
    }

    pub fn require_mut(&mut self, id: CharacterId) -> Result<&mut Character> {
        self.get_mut(id).ok_or(BattleError::CharacterNotFound(id))
    }

    /// Position in roster order, used as the final ordering tie-break
    pub fn index_of(&self, id: CharacterId) -> Option<usize> {
        self.characters.iter().position(|c| c.id == id)
    }

    /// Whoever stands on `hex`, defeated or not
    pub fn occupant_at(&self, hex: HexCoord) -> Option<&Character> {
        self.characters.iter().find(|c| c.position == hex)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn living(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter().filter(|c| !c.is_defeated())
    }

    /// Living characters sharing `id`'s faction, excluding `id`
    pub fn living_allies_of(&self, id: CharacterId) -> Vec<&Character> {
        let Some(me) = self.get(id) else {
            return Vec::new();
        };
        self.living()
            .filter(|c| c.id != id && c.faction == me.faction)
            .collect()
    }

    pub fn is_alive(&self, id: CharacterId) -> bool {
        self.get(id).is_some_and(|c| !c.is_defeated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter(q: i32, r: i32) -> Character {
        Character::new("Fighter", FactionTag::new("red"), HexCoord::new(q, r))
    }

    #[test]
    fn test_new_character_defaults() {
        let c = fighter(0, 0);
        assert_eq!(c.health(), c.max_health());
        assert!(!c.is_defeated());
        assert_eq!(c.disposition, Disposition::Neutral);
        assert_eq!(c.controller, Controller::Ai);
        assert_eq!(c.engaged_max, 2);
    }

    #[test]
    fn test_engagement_capacity_from_presence() {
        let attrs = Attributes {
            presence: 12,
            ..Attributes::default()
        };
        assert_eq!(attrs.engagement_capacity(), 3);

        let weak = Attributes {
            presence: 1,
            ..Attributes::default()
        };
        assert_eq!(weak.engagement_capacity(), 1);
    }

    #[test]
    fn test_damage_absorbed_by_buffer() {
        let mut c = fighter(0, 0).with_buffer_max(8);
        let attacker = CharacterId::new();
        let report = c.take_damage(attacker, 6, false);
        assert_eq!(report.routing.absorbed, 6);
        assert_eq!(c.health(), 20);
        assert_eq!(c.buffer_against(attacker), 2);
    }

    #[test]
    fn test_health_clamped_and_defeat_sticks() {
        let mut c = fighter(0, 0).with_max_health(5).with_buffer_max(0);
        let attacker = CharacterId::new();

        let report = c.take_damage(attacker, 50, false);
        assert_eq!(c.health(), 0);
        assert!(report.defeated_now);
        assert!(c.is_defeated());

        let again = c.take_damage(attacker, 3, false);
        assert!(!again.defeated_now);
        assert_eq!(c.health(), 0);
        assert!(c.is_defeated());
        assert!(c.check_invariants().is_ok());
    }

    #[test]
    fn test_speed_scores() {
        let config = CombatConfig::default();
        let c = fighter(0, 0).with_loadout(Loadout::new(
            crate::combat::weapons::WeaponProperties::longsword(),
            None,
            crate::combat::armor::ArmorProperties::plate(),
        ));
        assert_eq!(c.move_speed(), 7 - 10);
        assert_eq!(c.attack_speed(AttackType::Heavy, &config), 4 + 2 - 10);
    }

    #[test]
    fn test_roster_rejects_shared_hex() {
        let mut roster = Roster::new();
        roster.add(fighter(1, 1)).unwrap();
        let err = roster.add(fighter(1, 1)).unwrap_err();
        assert!(matches!(err, BattleError::HexOccupied(_)));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_defeated_still_occupies_hex() {
        let mut roster = Roster::new();
        let id = roster.add(fighter(2, 2).with_buffer_max(0)).unwrap();
        roster
            .get_mut(id)
            .unwrap()
            .take_damage(CharacterId::new(), 999, false);

        let occupant = roster.occupant_at(HexCoord::new(2, 2)).unwrap();
        assert_eq!(occupant.id, id);
        assert!(occupant.is_defeated());
        assert_eq!(roster.living().count(), 0);
    }

    #[test]
    fn test_living_allies_same_faction_only() {
        let mut roster = Roster::new();
        let a = roster.add(fighter(0, 0)).unwrap();
        let b = roster.add(fighter(1, 0)).unwrap();
        roster
            .add(Character::new("Other", FactionTag::new("blue"), HexCoord::new(2, 0)))
            .unwrap();

        let allies: Vec<CharacterId> = roster.living_allies_of(a).iter().map(|c| c.id).collect();
        assert_eq!(allies, vec![b]);
    }
}
