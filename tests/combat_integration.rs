//! Combat pipeline integration tests
//!
//! Drives the strike pipeline and per-attacker buffers together through the
//! public API, using forced rolls so every number is exact.

use std::path::Path;

use hex_tactics::battle::{Character, EngagementTracker, HexCoord, HexDirection};
use hex_tactics::combat::{
    resolve_strike, ArmorProperties, ArmorWeight, AttackType, CombatRatings, DamageType,
    EquipmentCatalog, FlankingCheck, Loadout, RollSource, ScriptedRolls, SeededRolls,
    StrikeResult, WeaponProperties,
};
use hex_tactics::core::config::CombatConfig;
use hex_tactics::core::types::FactionTag;

fn blade(base: i32) -> WeaponProperties {
    WeaponProperties {
        name: "test blade".into(),
        damage_type: DamageType::Slashing,
        base_damage: base,
        force: 0,
        speed: 3,
        crit_percent: 100,
        heavy_vulnerability_percent: None,
    }
}

fn padding(defense: i32) -> ArmorProperties {
    ArmorProperties {
        name: "padding".into(),
        weight: ArmorWeight::Light,
        defense,
        flanking_percent: 50,
        ..ArmorProperties::none()
    }
}

fn fighter(name: &str, q: i32, r: i32) -> Character {
    Character::new(name, FactionTag::new(name), HexCoord::new(q, r))
}

fn strike_between(
    attacker: &Character,
    defender: &Character,
    flanking: FlankingCheck,
    rolls: &mut dyn RollSource,
) -> StrikeResult {
    resolve_strike(
        &attacker.attacker_profile(),
        &defender.defender_profile(),
        AttackType::Light,
        flanking,
        rolls,
        &CombatConfig::default(),
    )
}

/// THC 70, roll 50: base 10 against DR 4 lands 6, all of it soaked by an 8-point buffer
#[test]
fn test_hit_absorbed_by_fresh_buffer() {
    let attacker = fighter("Attacker", 0, 0)
        .with_ratings(CombatRatings::new(20, 0, 0, 0))
        .with_loadout(Loadout::new(blade(10), None, ArmorProperties::none()));
    let mut defender = fighter("Defender", 1, 0)
        .with_buffer_max(8)
        .with_loadout(Loadout::new(WeaponProperties::fists(), None, padding(4)));

    let mut rolls = ScriptedRolls::new([50, 100]);
    let flanking = EngagementTracker::new().flanking_check(&attacker, &defender);
    let result = strike_between(&attacker, &defender, flanking, &mut rolls);

    assert_eq!(result.hit_chance, 70);
    assert!(result.hit);
    assert!(!result.critical);
    assert!(!result.flanking);
    assert_eq!(result.raw_damage, 10);
    assert_eq!(result.damage, 6);

    let health = defender.health();
    let report = defender.take_damage(attacker.id, result.damage, result.bypasses_buffer);
    assert_eq!(report.routing.absorbed, 6);
    assert_eq!(defender.buffer_against(attacker.id), 2);
    assert_eq!(defender.health(), health);
}

/// Each attacker drains its own pool; the second attacker starts from full
#[test]
fn test_buffers_are_per_attacker() {
    let first = fighter("First", 0, 0);
    let second = fighter("Second", 2, 0);
    let mut defender = fighter("Defender", 1, 0).with_buffer_max(5);
    let start = defender.health();

    let report = defender.take_damage(first.id, 7, false);
    assert_eq!(report.routing.absorbed, 5);
    assert_eq!(report.routing.to_health, 2);
    assert_eq!(defender.health(), start - 2);

    let report = defender.take_damage(second.id, 3, false);
    assert_eq!(report.routing.absorbed, 3);
    assert_eq!(report.routing.to_health, 0);
    assert_eq!(defender.health(), start - 2);

    assert_eq!(defender.buffer_against(first.id), 0);
    assert_eq!(defender.buffer_against(second.id), 2);
    assert_eq!(defender.buffer().attacker_count(), 2);
}

#[test]
fn test_poison_skips_buffer() {
    let poisoner = fighter("Poisoner", 0, 0)
        .with_ratings(CombatRatings::new(50, 0, 0, 0))
        .with_loadout(Loadout::new(
            WeaponProperties::venom_knife(),
            None,
            ArmorProperties::none(),
        ));
    let mut victim = fighter("Victim", 1, 0).with_buffer_max(20);
    let start = victim.health();

    let mut rolls = ScriptedRolls::new([1, 100]);
    let flanking = EngagementTracker::new().flanking_check(&poisoner, &victim);
    let result = strike_between(&poisoner, &victim, flanking, &mut rolls);
    assert!(result.hit);
    assert!(result.bypasses_buffer);
    assert!(result.damage > 0);

    victim.take_damage(poisoner.id, result.damage, result.bypasses_buffer);
    assert_eq!(victim.health(), start - result.damage);
    assert_eq!(victim.buffer().attacker_count(), 0);
    assert_eq!(victim.buffer_against(poisoner.id), 20);
}

/// A defender at capacity is flanked by anyone not already engaging it
#[test]
fn test_over_engaged_defender_loses_armor() {
    let defender = fighter("Defender", 2, 2)
        .with_facing(HexDirection::East)
        .with_engaged_max(1)
        .with_loadout(Loadout::new(WeaponProperties::fists(), None, padding(4)));

    let pinning = fighter("Pinning", 3, 2)
        .with_ratings(CombatRatings::new(50, 0, 0, 0))
        .with_loadout(Loadout::new(blade(10), None, ArmorProperties::none()));
    let newcomer = fighter("Newcomer", 2, 1)
        .with_ratings(CombatRatings::new(50, 0, 0, 0))
        .with_loadout(Loadout::new(blade(10), None, ArmorProperties::none()));

    let mut engagements = EngagementTracker::new();
    engagements.engage(pinning.id, defender.id);
    assert!(engagements.is_over_engaged(&defender));

    let pinned = engagements.flanking_check(&pinning, &defender);
    assert!(!pinned.is_flanking());
    let result = strike_between(&pinning, &defender, pinned, &mut ScriptedRolls::new([1, 100]));
    assert_eq!(result.armor_reduction, 4);
    assert_eq!(result.damage, 6);

    let flank = engagements.flanking_check(&newcomer, &defender);
    assert!(flank.is_flanking());
    let result = strike_between(&newcomer, &defender, flank, &mut ScriptedRolls::new([1, 100]));
    assert!(result.flanking);
    assert_eq!(result.armor_reduction, 2);
    assert_eq!(result.damage, 8);
}

#[test]
fn test_attack_from_rear_hex_flanks() {
    let defender = fighter("Defender", 2, 2).with_facing(HexDirection::East);
    let behind = fighter("Behind", 1, 2);
    let check = EngagementTracker::new().flanking_check(&behind, &defender);
    assert!(check.attacker_behind);
    assert!(check.is_flanking());
}

#[test]
fn test_same_seed_same_strikes() {
    let attacker = fighter("Attacker", 0, 0)
        .with_loadout(Loadout::new(WeaponProperties::longsword(), None, ArmorProperties::none()));
    let defender = fighter("Defender", 1, 0);
    let flanking = FlankingCheck {
        defender_capacity: 2,
        ..Default::default()
    };

    let run = |seed| {
        let mut rolls = SeededRolls::new(seed);
        (0..20)
            .map(|_| strike_between(&attacker, &defender, flanking, &mut rolls))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(7), run(7));
}

#[test]
fn test_shipped_combat_config_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/combat.toml");
    let config = CombatConfig::load(&path).unwrap();
    assert_eq!(config, CombatConfig::default());
}

#[test]
fn test_shipped_equipment_extends_presets() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/equipment.toml");
    let mut catalog = EquipmentCatalog::with_defaults();
    catalog.extend(EquipmentCatalog::load_from_toml(&path).unwrap());

    let loadout = catalog
        .loadout("maul", Some("round_shield"), "brigandine")
        .unwrap();
    assert_eq!(loadout.main_hand.name, "maul");
    assert_eq!(loadout.main_hand.damage_type, DamageType::Crushing);
    assert_eq!(loadout.evasion_bonus(), 8);
    assert_eq!(loadout.armor.defense, 5);

    // Presets survive the merge
    assert!(catalog.loadout("longsword", Some("kite shield"), "plate").is_ok());
}
