//! Weapon and off-hand properties
//!
//! Weapons carry a damage type, base damage, force (scaled by strength)
//! and a speed score. Lower speed acts earlier in the attack queue.

use serde::{Deserialize, Serialize};

use crate::core::config::CombatConfig;

/// What kind of damage a weapon deals - matched against armor resist/vulnerable lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    /// Blades and axes
    Slashing,
    /// Spears, daggers, arrows
    Piercing,
    /// Maces, hammers, fists
    Crushing,
    /// Burning weapons
    Fire,
    /// Toxins - ignore composure entirely
    Poison,
}

impl DamageType {
    /// Does this damage type skip the per-attacker buffer and go straight to health?
    pub fn bypasses_buffer(&self) -> bool {
        matches!(self, DamageType::Poison)
    }
}

/// Light or heavy swing, chosen per attack intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackType {
    #[default]
    Light,
    Heavy,
}

impl AttackType {
    /// Flat damage added by this attack type
    pub fn damage_bonus(&self, config: &CombatConfig) -> i32 {
        match self {
            AttackType::Light => config.light_damage_bonus,
            AttackType::Heavy => config.heavy_damage_bonus,
        }
    }

    /// Speed score added by this attack type (heavier swings act later)
    pub fn speed_modifier(&self, config: &CombatConfig) -> i32 {
        match self {
            AttackType::Light => config.light_speed_modifier,
            AttackType::Heavy => config.heavy_speed_modifier,
        }
    }
}

fn hundred() -> i32 {
    100
}

/// Complete weapon properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponProperties {
    #[serde(default)]
    pub name: String,
    pub damage_type: DamageType,
    /// Damage dealt before force and attack type
    pub base_damage: i32,
    /// Damage scaled by the wielder's strength
    pub force: i32,
    /// Speed score contribution (lower = faster)
    pub speed: i32,
    /// Critical damage percent stacked on top of the base crit multiplier
    #[serde(default = "hundred")]
    pub crit_percent: i32,
    /// Replaces the standard vulnerability percent on heavy attacks
    #[serde(default)]
    pub heavy_vulnerability_percent: Option<i32>,
}

impl WeaponProperties {
    /// Vulnerability percent this weapon applies for the given attack type
    pub fn vulnerability_percent(&self, attack_type: AttackType, config: &CombatConfig) -> i32 {
        match (attack_type, self.heavy_vulnerability_percent) {
            (AttackType::Heavy, Some(enhanced)) => enhanced.max(config.vulnerability_percent),
            _ => config.vulnerability_percent,
        }
    }

    /// Common weapon: Fists (unarmed)
    pub fn fists() -> Self {
        Self {
            name: "fists".into(),
            damage_type: DamageType::Crushing,
            base_damage: 1,
            force: 2,
            speed: 2,
            crit_percent: 100,
            heavy_vulnerability_percent: None,
        }
    }

    /// Common weapon: Dagger (quick, nasty crits)
    pub fn dagger() -> Self {
        Self {
            name: "dagger".into(),
            damage_type: DamageType::Piercing,
            base_damage: 3,
            force: 2,
            speed: 1,
            crit_percent: 150,
            heavy_vulnerability_percent: None,
        }
    }

    /// Common weapon: Longsword
    pub fn longsword() -> Self {
        Self {
            name: "longsword".into(),
            damage_type: DamageType::Slashing,
            base_damage: 6,
            force: 6,
            speed: 4,
            crit_percent: 100,
            heavy_vulnerability_percent: None,
        }
    }

    /// Common weapon: Spear
    pub fn spear() -> Self {
        Self {
            name: "spear".into(),
            damage_type: DamageType::Piercing,
            base_damage: 5,
            force: 7,
            speed: 5,
            crit_percent: 100,
            heavy_vulnerability_percent: None,
        }
    }

    /// Common weapon: Warhammer (slow; heavy swings crack vulnerable armor)
    pub fn warhammer() -> Self {
        Self {
            name: "warhammer".into(),
            damage_type: DamageType::Crushing,
            base_damage: 7,
            force: 10,
            speed: 7,
            crit_percent: 100,
            heavy_vulnerability_percent: Some(200),
        }
    }

    /// Envenomed blade - poison bypasses composure
    pub fn venom_knife() -> Self {
        Self {
            name: "venom knife".into(),
            damage_type: DamageType::Poison,
            base_damage: 2,
            force: 2,
            speed: 1,
            crit_percent: 100,
            heavy_vulnerability_percent: None,
        }
    }
}

impl Default for WeaponProperties {
    fn default() -> Self {
        Self::fists()
    }
}

/// Off-hand shield
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldProperties {
    #[serde(default)]
    pub name: String,
    /// Speed score contribution when attacking
    pub speed: i32,
    /// Subtracted from an attacker's to-hit chance
    pub evasion_bonus: i32,
    /// Critical damage percent (spiked shields)
    #[serde(default = "hundred")]
    pub crit_percent: i32,
}

impl ShieldProperties {
    pub fn buckler() -> Self {
        Self {
            name: "buckler".into(),
            speed: 1,
            evasion_bonus: 5,
            crit_percent: 100,
        }
    }

    pub fn kite_shield() -> Self {
        Self {
            name: "kite shield".into(),
            speed: 3,
            evasion_bonus: 10,
            crit_percent: 100,
        }
    }

    pub fn tower_shield() -> Self {
        Self {
            name: "tower shield".into(),
            speed: 5,
            evasion_bonus: 15,
            crit_percent: 100,
        }
    }
}
