//! Strike resolution
//!
//! Pure pipeline from attacker/defender snapshots to a strike outcome:
//! to-hit -> base damage -> critical -> flanking armor -> mitigation ->
//! resistance/vulnerability. Routing the result through the defender's
//! buffer and health is the caller's job.
//!
//! All arithmetic is integer. Percent scaling rounds up; armor reduction
//! under flanking rounds down.

use serde::{Deserialize, Serialize};

use crate::combat::armor::DamageAffinity;
use crate::combat::equipment::Loadout;
use crate::combat::rolls::RollSource;
use crate::combat::weapons::AttackType;
use crate::core::config::CombatConfig;

/// Derived ratings supplied by the stat layer; read-only here
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatRatings {
    pub attack: i32,
    pub defense: i32,
    pub crit_attack: i32,
    pub crit_defense: i32,
}

impl CombatRatings {
    pub fn new(attack: i32, defense: i32, crit_attack: i32, crit_defense: i32) -> Self {
        Self {
            attack,
            defense,
            crit_attack,
            crit_defense,
        }
    }
}

/// The attacking side of a strike
#[derive(Debug, Clone, Copy)]
pub struct AttackerProfile<'a> {
    pub ratings: CombatRatings,
    pub strength: i32,
    pub loadout: &'a Loadout,
}

/// The defending side of a strike
#[derive(Debug, Clone, Copy)]
pub struct DefenderProfile<'a> {
    pub ratings: CombatRatings,
    pub loadout: &'a Loadout,
}

/// Inputs to the flanking decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlankingCheck {
    /// Attacker stands directly behind the defender's facing
    pub attacker_behind: bool,
    /// How many opponents currently engage the defender
    pub defender_engaged: usize,
    /// Defender's engagement capacity
    pub defender_capacity: usize,
    /// Attacker is already one of the defender's engaging opponents
    pub attacker_engaging: bool,
}

impl FlankingCheck {
    pub fn over_engaged(&self) -> bool {
        self.defender_engaged >= self.defender_capacity
    }

    pub fn is_flanking(&self) -> bool {
        self.attacker_behind || (self.over_engaged() && !self.attacker_engaging)
    }
}

/// Outcome of the pipeline, before buffer routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StrikeResult {
    pub hit_chance: u32,
    pub hit_roll: u32,
    pub hit: bool,
    pub crit_chance: u32,
    /// Only rolled on a hit
    pub crit_roll: Option<u32>,
    pub critical: bool,
    pub flanking: bool,
    /// Damage after force, attack type and critical, before armor
    pub raw_damage: i32,
    /// Armor defense actually subtracted
    pub armor_reduction: i32,
    pub affinity: DamageAffinity,
    /// Final post-mitigation damage (never negative)
    pub damage: i32,
    /// Final damage skips the buffer
    pub bypasses_buffer: bool,
}

/// Scale by a percent, rounding up; non-positive values yield 0
pub fn scale_percent_ceil(value: i32, percent: i32) -> i32 {
    if value <= 0 || percent <= 0 {
        return 0;
    }
    let scaled = (value as i64 * percent as i64 + 99) / 100;
    scaled.min(i32::MAX as i64) as i32
}

/// To-hit percent: `clamp(attack - defense + (base - evasion), 0, 100)`
pub fn hit_chance(attack: i32, defense: i32, evasion: i32, config: &CombatConfig) -> u32 {
    let chance = attack as i64 - defense as i64 + (config.base_hit_chance as i64 - evasion as i64);
    chance.clamp(0, 100) as u32
}

/// Critical percent: `clamp(crit_attack - crit_defense + base, 0, 100)`
pub fn crit_chance(crit_attack: i32, crit_defense: i32, config: &CombatConfig) -> u32 {
    let chance = crit_attack as i64 - crit_defense as i64 + config.base_crit_chance as i64;
    chance.clamp(0, 100) as u32
}

/// Percent applied to weapon force for a given strength
pub fn strength_percent(strength: i32, config: &CombatConfig) -> i32 {
    let delta = strength as i64 - config.strength_baseline as i64;
    let percent = 100 + delta * config.strength_force_percent as i64;
    percent
        .max(config.min_strength_percent as i64)
        .clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// `weapon base + ceil(force * strength%) + attack-type bonus`, floored at 0
pub fn base_damage(attacker: &AttackerProfile, attack_type: AttackType, config: &CombatConfig) -> i32 {
    let weapon = &attacker.loadout.main_hand;
    let force = scale_percent_ceil(weapon.force, strength_percent(attacker.strength, config));
    weapon
        .base_damage
        .saturating_add(force)
        .saturating_add(attack_type.damage_bonus(config))
        .max(0)
}

/// Critical damage: base multiplier, then every equipment percent in turn
pub fn critical_damage(damage: i32, loadout: &Loadout, config: &CombatConfig) -> i32 {
    if damage <= 0 {
        return 0;
    }
    let mut numerator = damage as i64 * config.crit_damage_percent.max(0) as i64;
    let mut denominator: i64 = 100;
    for percent in loadout.crit_percents() {
        numerator = numerator.saturating_mul(percent.max(0) as i64);
        denominator = denominator.saturating_mul(100);
    }
    let scaled = numerator.saturating_add(denominator - 1) / denominator;
    scaled.min(i32::MAX as i64) as i32
}

/// Run one strike through the pipeline
///
/// Rolls are drawn in order: hit, then crit (only on a hit).
pub fn resolve_strike(
    attacker: &AttackerProfile,
    defender: &DefenderProfile,
    attack_type: AttackType,
    flanking: FlankingCheck,
    rolls: &mut dyn RollSource,
    config: &CombatConfig,
) -> StrikeResult {
    let weapon = &attacker.loadout.main_hand;
    let armor = &defender.loadout.armor;

    let hit_chance = hit_chance(
        attacker.ratings.attack,
        defender.ratings.defense,
        defender.loadout.evasion_bonus(),
        config,
    );
    let crit_chance = crit_chance(
        attacker.ratings.crit_attack,
        defender.ratings.crit_defense,
        config,
    );
    let hit_roll = rolls.roll_percent();
    let flanking = flanking.is_flanking();

    let mut result = StrikeResult {
        hit_chance,
        hit_roll,
        hit: hit_roll <= hit_chance,
        crit_chance,
        flanking,
        bypasses_buffer: weapon.damage_type.bypasses_buffer(),
        ..Default::default()
    };

    if !result.hit {
        return result;
    }

    let mut damage = base_damage(attacker, attack_type, config);

    let crit_roll = rolls.roll_percent();
    result.crit_roll = Some(crit_roll);
    if crit_roll <= crit_chance {
        result.critical = true;
        damage = critical_damage(damage, attacker.loadout, config);
    }
    result.raw_damage = damage;

    result.armor_reduction = armor.effective_defense(flanking).max(0);
    damage = (damage - result.armor_reduction).max(0);

    if damage > 0 {
        result.affinity = armor.affinity(weapon.damage_type);
        damage = match result.affinity {
            DamageAffinity::Resisted => scale_percent_ceil(damage, config.resistance_percent),
            DamageAffinity::Vulnerable => {
                scale_percent_ceil(damage, weapon.vulnerability_percent(attack_type, config))
            }
            DamageAffinity::Neutral => damage,
        };
    }

    result.damage = damage.max(0);
    result
}
