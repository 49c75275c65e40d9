//! Combat configuration with documented constants
//!
//! All tunable numbers used by the damage pipeline, the speed ordering and
//! the turn pacing live here. Values load from TOML; anything omitted falls
//! back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::core::error::ConfigError;

/// Configuration for combat resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === TO-HIT / CRITICAL ===
    /// Offset added to `attack - defense` before evasion is subtracted
    ///
    /// Two evenly matched characters with no shield hit half the time.
    pub base_hit_chance: i32,

    /// Offset added to `crit_attack - crit_defense`
    pub base_crit_chance: i32,

    /// Damage percent applied on a critical strike, before equipment multipliers
    ///
    /// All multipliers are integer percents (200 = x2.0) so damage math stays
    /// exact. Fractional results round up.
    pub crit_damage_percent: i32,

    // === DAMAGE TYPES ===
    /// Percent applied when the armor resists the weapon's damage type
    pub resistance_percent: i32,

    /// Percent applied when the armor is vulnerable to the weapon's damage type
    ///
    /// Weapons may carry their own, larger percent for heavy attacks.
    pub vulnerability_percent: i32,

    // === ATTACK TYPES ===
    /// Flat damage added by a light attack
    pub light_damage_bonus: i32,

    /// Flat damage added by a heavy attack
    pub heavy_damage_bonus: i32,

    /// Speed score added by a light attack (lower acts first)
    pub light_speed_modifier: i32,

    /// Speed score added by a heavy attack
    pub heavy_speed_modifier: i32,

    // === STRENGTH ===
    /// Strength at which weapon force is applied unscaled
    pub strength_baseline: i32,

    /// Force percent change per point of strength above/below baseline
    ///
    /// At 5, strength 16 swings a force-10 weapon for ceil(10 * 130%) = 13.
    pub strength_force_percent: i32,

    /// Lower bound on the strength percent so feeble characters still deal force
    pub min_strength_percent: i32,

    // === REACH ===
    /// Maximum hex distance for an attack intent
    pub attack_range: u32,

    /// Maximum hex distance for a single move intent
    pub move_range: u32,

    // === PACING ===
    /// Delay before an attack resolves (presentation windup)
    pub attack_windup_ms: u64,

    /// Delay after an attack resolves before the next attacker begins
    pub attack_settle_ms: u64,

    /// How long the driver waits for a movement completion before failing the turn
    pub move_watchdog_ms: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            base_hit_chance: 50,
            base_crit_chance: 50,
            crit_damage_percent: 200,

            resistance_percent: 50,
            vulnerability_percent: 150,

            light_damage_bonus: 0,
            heavy_damage_bonus: 3,
            light_speed_modifier: 0,
            heavy_speed_modifier: 2,

            strength_baseline: 10,
            strength_force_percent: 5,
            min_strength_percent: 25,

            attack_range: 1,
            move_range: 1,

            attack_windup_ms: 250,
            attack_settle_ms: 400,
            move_watchdog_ms: 5000,
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with zero pacing delays, for headless simulation
    pub fn headless() -> Self {
        Self {
            attack_windup_ms: 0,
            attack_settle_ms: 0,
            ..Self::default()
        }
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CombatConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crit_damage_percent < 100 {
            return Err(ConfigError::Invalid(format!(
                "crit_damage_percent ({}) must be >= 100",
                self.crit_damage_percent
            )));
        }

        if !(0..=100).contains(&self.resistance_percent) {
            return Err(ConfigError::Invalid(format!(
                "resistance_percent ({}) must be within [0, 100]",
                self.resistance_percent
            )));
        }

        if self.vulnerability_percent < 100 {
            return Err(ConfigError::Invalid(format!(
                "vulnerability_percent ({}) must be >= 100",
                self.vulnerability_percent
            )));
        }

        if self.min_strength_percent < 0 {
            return Err(ConfigError::Invalid("min_strength_percent must not be negative".into()));
        }

        if self.attack_range == 0 || self.move_range == 0 {
            return Err(ConfigError::Invalid(
                "attack_range and move_range must be positive".into(),
            ));
        }

        if self.move_watchdog_ms == 0 {
            return Err(ConfigError::Invalid("move_watchdog_ms must be positive".into()));
        }

        Ok(())
    }

    pub fn windup(&self) -> Duration {
        Duration::from_millis(self.attack_windup_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.attack_settle_ms)
    }

    pub fn move_watchdog(&self) -> Duration {
        Duration::from_millis(self.move_watchdog_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CombatConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_offsets() {
        let config = CombatConfig::default();
        assert_eq!(config.base_hit_chance, 50);
        assert_eq!(config.base_crit_chance, 50);
        assert_eq!(config.resistance_percent, 50);
        assert_eq!(config.vulnerability_percent, 150);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = CombatConfig::from_toml_str("attack_settle_ms = 10\n").unwrap();
        assert_eq!(config.attack_settle_ms, 10);
        assert_eq!(config.base_hit_chance, 50);
    }

    #[test]
    fn test_invalid_resistance_rejected() {
        let result = CombatConfig::from_toml_str("resistance_percent = 200\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = CombatConfig::from_toml_str("base_hit_chance = \"lots\"\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_headless_has_no_pacing() {
        let config = CombatConfig::headless();
        assert_eq!(config.windup(), Duration::ZERO);
        assert_eq!(config.settle(), Duration::ZERO);
    }
}
