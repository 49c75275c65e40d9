//! Armor properties
//!
//! Armor subtracts a flat defense from incoming damage, slows its wearer,
//! and lists the damage types it resists or is vulnerable to.

use serde::{Deserialize, Serialize};

use crate::combat::weapons::DamageType;

/// Armor weight class - drives the AI's light/heavy attack choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorWeight {
    #[default]
    Unarmored,
    Light,
    Medium,
    Heavy,
}

/// How damage type interacts with armor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DamageAffinity {
    #[default]
    Neutral,
    Resisted,
    Vulnerable,
}

fn full_flanking_protection() -> i32 {
    100
}

/// Complete armor properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorProperties {
    #[serde(default)]
    pub name: String,
    pub weight: ArmorWeight,
    /// Flat damage reduction
    pub defense: i32,
    /// Speed score contribution when moving (lower = faster)
    pub mobility: i32,
    /// Percent of defense kept when flanked (0 = bypassed, 100 = no penalty)
    #[serde(default = "full_flanking_protection")]
    pub flanking_percent: i32,
    #[serde(default)]
    pub resistant: Vec<DamageType>,
    #[serde(default)]
    pub vulnerable: Vec<DamageType>,
}

impl ArmorProperties {
    /// Defense after flanking is taken into account (rounded down)
    pub fn effective_defense(&self, flanking: bool) -> i32 {
        if flanking {
            (self.defense as i64 * self.flanking_percent.clamp(0, 100) as i64 / 100) as i32
        } else {
            self.defense
        }
    }

    /// Resistance wins if a type somehow appears in both lists
    pub fn affinity(&self, damage_type: DamageType) -> DamageAffinity {
        if self.resistant.contains(&damage_type) {
            DamageAffinity::Resisted
        } else if self.vulnerable.contains(&damage_type) {
            DamageAffinity::Vulnerable
        } else {
            DamageAffinity::Neutral
        }
    }

    pub fn is_heavy(&self) -> bool {
        self.weight == ArmorWeight::Heavy
    }

    /// No armor at all
    pub fn none() -> Self {
        Self {
            name: "unarmored".into(),
            weight: ArmorWeight::Unarmored,
            defense: 0,
            mobility: 0,
            flanking_percent: 100,
            resistant: vec![],
            vulnerable: vec![],
        }
    }

    /// Light armor (leather)
    pub fn leather() -> Self {
        Self {
            name: "leather".into(),
            weight: ArmorWeight::Light,
            defense: 2,
            mobility: 2,
            flanking_percent: 50,
            resistant: vec![],
            vulnerable: vec![DamageType::Fire],
        }
    }

    /// Medium armor (mail)
    pub fn mail() -> Self {
        Self {
            name: "mail".into(),
            weight: ArmorWeight::Medium,
            defense: 4,
            mobility: 4,
            flanking_percent: 50,
            resistant: vec![DamageType::Slashing],
            vulnerable: vec![DamageType::Crushing],
        }
    }

    /// Heavy armor (plate)
    pub fn plate() -> Self {
        Self {
            name: "plate".into(),
            weight: ArmorWeight::Heavy,
            defense: 7,
            mobility: 7,
            flanking_percent: 75,
            resistant: vec![DamageType::Slashing, DamageType::Piercing],
            vulnerable: vec![DamageType::Crushing],
        }
    }
}

impl Default for ArmorProperties {
    fn default() -> Self {
        Self::none()
    }
}
