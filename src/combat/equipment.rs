//! Equipment loadouts and the static equipment tables
//!
//! A loadout is a main-hand weapon, an optional shield and a suit of armor.
//! The catalog maps names to table entries and can be loaded from TOML.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::combat::armor::ArmorProperties;
use crate::combat::weapons::{AttackType, ShieldProperties, WeaponProperties};
use crate::core::config::CombatConfig;
use crate::core::error::ConfigError;

/// What a character is carrying
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Loadout {
    pub main_hand: WeaponProperties,
    pub off_hand: Option<ShieldProperties>,
    pub armor: ArmorProperties,
}

impl Loadout {
    pub fn new(
        main_hand: WeaponProperties,
        off_hand: Option<ShieldProperties>,
        armor: ArmorProperties,
    ) -> Self {
        Self {
            main_hand,
            off_hand,
            armor,
        }
    }

    /// Evasion subtracted from attackers' to-hit chance
    pub fn evasion_bonus(&self) -> i32 {
        self.off_hand.as_ref().map_or(0, |s| s.evasion_bonus)
    }

    /// Equipment critical percents, one entry per source
    pub fn crit_percents(&self) -> Vec<i32> {
        let mut percents = vec![self.main_hand.crit_percent];
        if let Some(shield) = &self.off_hand {
            percents.push(shield.crit_percent);
        }
        percents
    }

    /// Weapon speed + shield speed + attack-type modifier
    pub fn attack_speed(&self, attack_type: AttackType, config: &CombatConfig) -> i32 {
        let shield = self.off_hand.as_ref().map_or(0, |s| s.speed);
        self.main_hand
            .speed
            .saturating_add(shield)
            .saturating_add(attack_type.speed_modifier(config))
    }
}

/// Named weapon, shield and armor tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentCatalog {
    #[serde(default)]
    pub weapons: HashMap<String, WeaponProperties>,
    #[serde(default)]
    pub shields: HashMap<String, ShieldProperties>,
    #[serde(default)]
    pub armor: HashMap<String, ArmorProperties>,
}

impl EquipmentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog populated with the built-in presets
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        for weapon in [
            WeaponProperties::fists(),
            WeaponProperties::dagger(),
            WeaponProperties::longsword(),
            WeaponProperties::spear(),
            WeaponProperties::warhammer(),
            WeaponProperties::venom_knife(),
        ] {
            catalog.weapons.insert(weapon.name.clone(), weapon);
        }

        for shield in [
            ShieldProperties::buckler(),
            ShieldProperties::kite_shield(),
            ShieldProperties::tower_shield(),
        ] {
            catalog.shields.insert(shield.name.clone(), shield);
        }

        for armor in [
            ArmorProperties::none(),
            ArmorProperties::leather(),
            ArmorProperties::mail(),
            ArmorProperties::plate(),
        ] {
            catalog.armor.insert(armor.name.clone(), armor);
        }

        catalog
    }

    /// Load tables from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse tables from TOML text
    ///
    /// Table keys become the entry names, overriding any `name` field.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let mut catalog: EquipmentCatalog = toml::from_str(content)?;

        for (key, weapon) in catalog.weapons.iter_mut() {
            weapon.name = key.clone();
        }
        for (key, shield) in catalog.shields.iter_mut() {
            shield.name = key.clone();
        }
        for (key, armor) in catalog.armor.iter_mut() {
            armor.name = key.clone();
        }

        catalog.validate()?;
        Ok(catalog)
    }

    /// Reject entries the strike pipeline cannot use
    ///
    /// Percent fields and flat damage or defense must be non-negative, and
    /// armor can keep at most all of its defense when flanked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |kind: &str, name: &str, field: &str, value: i32| {
            Err(ConfigError::Invalid(format!(
                "{kind} '{name}' has invalid {field} {value}"
            )))
        };

        for (name, weapon) in &self.weapons {
            if weapon.base_damage < 0 {
                return invalid("weapon", name, "base_damage", weapon.base_damage);
            }
            if weapon.crit_percent < 0 {
                return invalid("weapon", name, "crit_percent", weapon.crit_percent);
            }
            if let Some(percent) = weapon.heavy_vulnerability_percent.filter(|p| *p < 0) {
                return invalid("weapon", name, "heavy_vulnerability_percent", percent);
            }
        }
        for (name, shield) in &self.shields {
            if shield.crit_percent < 0 {
                return invalid("shield", name, "crit_percent", shield.crit_percent);
            }
        }
        for (name, armor) in &self.armor {
            if armor.defense < 0 {
                return invalid("armor", name, "defense", armor.defense);
            }
            if !(0..=100).contains(&armor.flanking_percent) {
                return invalid("armor", name, "flanking_percent", armor.flanking_percent);
            }
        }
        Ok(())
    }

    /// Merge another catalog's entries over this one
    pub fn extend(&mut self, other: EquipmentCatalog) {
        self.weapons.extend(other.weapons);
        self.shields.extend(other.shields);
        self.armor.extend(other.armor);
    }

    /// Build a loadout by name
    pub fn loadout(
        &self,
        weapon: &str,
        shield: Option<&str>,
        armor: &str,
    ) -> Result<Loadout, ConfigError> {
        let main_hand = self
            .weapons
            .get(weapon)
            .cloned()
            .ok_or_else(|| ConfigError::Invalid(format!("unknown weapon '{}'", weapon)))?;

        let off_hand = match shield {
            Some(name) => Some(
                self.shields
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ConfigError::Invalid(format!("unknown shield '{}'", name)))?,
            ),
            None => None,
        };

        let armor = self
            .armor
            .get(armor)
            .cloned()
            .ok_or_else(|| ConfigError::Invalid(format!("unknown armor '{}'", armor)))?;

        Ok(Loadout::new(main_hand, off_hand, armor))
    }
}
