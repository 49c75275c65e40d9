pub mod armor;
pub mod buffer;
pub mod equipment;
pub mod resolution;
pub mod rolls;
pub mod weapons;

pub use armor::{ArmorProperties, ArmorWeight, DamageAffinity};
pub use buffer::{BufferRouting, DamageBuffer};
pub use equipment::{EquipmentCatalog, Loadout};
pub use resolution::{
    base_damage, crit_chance, critical_damage, hit_chance, resolve_strike, scale_percent_ceil,
    strength_percent, AttackerProfile, CombatRatings, DefenderProfile, FlankingCheck,
    StrikeResult,
};
pub use rolls::{RollSource, ScriptedRolls, SeededRolls};
pub use weapons::{AttackType, DamageType, ShieldProperties, WeaponProperties};
