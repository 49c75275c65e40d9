//! Headless skirmish runner
//!
//! Sets up a small party-versus-bandits fight, lets the stock AI pick
//! intents for both sides, and drives turns until one side stands alone.
//!
//! Usage:
//!   cargo run --bin skirmish_runner -- --seed 42 --format text

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hex_tactics::battle::{
    run_execution, Attributes, BattleAI, BattleMap, BattleState, BattleTerrain, Character,
    Controller, DecisionContext, Disposition, DriveStop, HexCoord, HexDirection, InstantMovement,
    Roster, TargetingAi,
};
use hex_tactics::combat::equipment::EquipmentCatalog;
use hex_tactics::core::config::CombatConfig;
use hex_tactics::core::types::{CharacterId, FactionTag};

#[derive(Parser, Debug)]
#[command(name = "skirmish_runner")]
#[command(about = "Run a headless hex skirmish and report the result")]
struct Args {
    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many turns even if both sides still stand
    #[arg(short, long, default_value = "50")]
    max_turns: u32,

    /// Combat tuning TOML (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra equipment TOML merged over the built-in presets
    #[arg(short, long)]
    equipment: Option<PathBuf>,

    /// Output format: json or text
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Print the battle log to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize, Debug)]
struct Survivor {
    name: String,
    faction: String,
    health: i32,
    max_health: i32,
    position: HexCoord,
}

#[derive(Serialize, Debug)]
struct SkirmishResult {
    winner: Option<String>,
    turns: u32,
    attacks: usize,
    hits: usize,
    moves: usize,
    survivors: Vec<Survivor>,
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hex_tactics=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);

    let config = match &args.config {
        Some(path) => CombatConfig::load(path)?,
        None => CombatConfig::headless(),
    };

    let mut catalog = EquipmentCatalog::with_defaults();
    if let Some(path) = &args.equipment {
        catalog.extend(EquipmentCatalog::load_from_toml(path)?);
    }

    let roster = build_roster(&catalog)?;
    let mut state = BattleState::seeded(build_map(), roster, config, seed);
    declare_sides(&mut state);

    state.start_combat()?;
    let mut ai = TargetingAi::new();
    let mut attacks = 0;
    let mut hits = 0;
    let mut moves = 0;

    while state.hostilities_remain() && state.turn() <= args.max_turns {
        let events_before = state.battle_log.len();

        match run_execution(&mut state, &mut InstantMovement).await {
            Ok(DriveStop::AwaitingInput(pending)) => {
                submit_player_intents(&mut state, &mut ai, &pending)?;
                continue;
            }
            Ok(DriveStop::TurnComplete(summary)) => {
                attacks += summary.attacks.len();
                hits += summary.attacks.iter().filter(|a| a.is_hit()).count();
                moves += summary.moves_completed;
            }
            Ok(DriveStop::Idle) => break,
            Err(e) => {
                warn!(turn = state.turn(), "skirmish stopped: {e}");
                return Err(e.into());
            }
        }

        if args.verbose {
            for event in state.battle_log.iter().skip(events_before) {
                eprintln!("  [{}] {}", event.turn, event.description);
            }
        }
    }

    let turns = state.turn().saturating_sub(1);
    state.end_combat();

    let field = state.topology.render_rows(|hex| {
        state
            .roster
            .occupant_at(hex)
            .map(|c| marker(c.name.as_str(), c.is_defeated()))
    });

    let survivors: Vec<Survivor> = state
        .roster
        .living()
        .map(|c| Survivor {
            name: c.name.clone(),
            faction: c.faction.0.clone(),
            health: c.health(),
            max_health: c.max_health(),
            position: c.position,
        })
        .collect();

    let winner = {
        let mut factions: Vec<&str> = survivors.iter().map(|s| s.faction.as_str()).collect();
        factions.sort_unstable();
        factions.dedup();
        match factions.as_slice() {
            [only] => Some(only.to_string()),
            _ => None,
        }
    };

    info!(?winner, turns, "skirmish finished");

    let result = SkirmishResult {
        winner,
        turns,
        attacks,
        hits,
        moves,
        survivors,
        seed,
    };

    match args.format.as_str() {
        "text" => print_text(&result, &field),
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

/// A 9x7 field with a wall stub and some rough ground in the middle
fn build_map() -> BattleMap {
    let mut map = BattleMap::new(9, 7);
    for r in 1..3 {
        map.set_terrain(HexCoord::new(4, r), BattleTerrain::Wall);
    }
    map.set_terrain(HexCoord::new(3, 4), BattleTerrain::Rough);
    map.set_terrain(HexCoord::new(5, 4), BattleTerrain::Forest);
    map
}

fn build_roster(catalog: &EquipmentCatalog) -> Result<Roster, Box<dyn std::error::Error>> {
    let party = FactionTag::new("party");
    let bandits = FactionTag::new("bandits");
    let mut roster = Roster::new();

    roster.add(
        Character::new("Aldric", party.clone(), HexCoord::new(1, 2))
            .with_controller(Controller::Player)
            .with_disposition(Disposition::Aggressive)
            .with_facing(HexDirection::East)
            .with_attributes(Attributes {
                strength: 14,
                dexterity: 10,
                will: 12,
                instinct: 10,
                presence: 12,
            })
            .with_loadout(catalog.loadout("longsword", Some("kite shield"), "mail")?),
    )?;
    roster.add(
        Character::new("Wren", party.clone(), HexCoord::new(1, 4))
            .with_controller(Controller::Player)
            .with_disposition(Disposition::Aggressive)
            .with_facing(HexDirection::East)
            .with_attributes(Attributes {
                strength: 9,
                dexterity: 15,
                will: 10,
                instinct: 13,
                presence: 8,
            })
            .with_loadout(catalog.loadout("dagger", Some("buckler"), "leather")?),
    )?;

    roster.add(
        Character::new("Brute", bandits.clone(), HexCoord::new(7, 2))
            .with_disposition(Disposition::Aggressive)
            .with_facing(HexDirection::West)
            .with_max_health(26)
            .with_attributes(Attributes {
                strength: 16,
                dexterity: 7,
                will: 9,
                instinct: 8,
                presence: 8,
            })
            .with_loadout(catalog.loadout("warhammer", None, "leather")?),
    )?;
    roster.add(
        Character::new("Cutpurse", bandits.clone(), HexCoord::new(7, 4))
            .with_disposition(Disposition::Aggressive)
            .with_facing(HexDirection::West)
            .with_loadout(catalog.loadout("venom knife", None, "unarmored")?),
    )?;
    roster.add(
        Character::new("Lookout", bandits, HexCoord::new(8, 5))
            .with_facing(HexDirection::West)
            .with_loadout(catalog.loadout("spear", None, "leather")?),
    )?;

    Ok(roster)
}

/// Every party member and bandit are mutual enemies
fn declare_sides(state: &mut BattleState) {
    let party: Vec<CharacterId> = state
        .roster
        .iter()
        .filter(|c| c.faction.0 == "party")
        .map(|c| c.id)
        .collect();
    let bandits: Vec<CharacterId> = state
        .roster
        .iter()
        .filter(|c| c.faction.0 == "bandits" && c.disposition == Disposition::Aggressive)
        .map(|c| c.id)
        .collect();

    for &p in &party {
        for &b in &bandits {
            state.hostility.declare_mutual(p, b);
        }
    }
}

/// Player characters take whatever the stock AI would do in their place
fn submit_player_intents(
    state: &mut BattleState,
    ai: &mut TargetingAi,
    pending: &[CharacterId],
) -> Result<(), Box<dyn std::error::Error>> {
    for &id in pending {
        let intent = {
            let context = DecisionContext {
                roster: &state.roster,
                intents: state.intents(),
                hostility: &state.hostility,
                engagements: &state.engagements,
                topology: &state.topology,
                config: &state.config,
                turn: state.turn(),
            };
            ai.decide(&context, id)?
        };
        state.submit_intent(id, intent)?;
    }
    Ok(())
}

/// First letter of the name; lowercase once defeated
fn marker(name: &str, defeated: bool) -> char {
    let initial = name.chars().next().unwrap_or('?');
    if defeated {
        initial.to_ascii_lowercase()
    } else {
        initial.to_ascii_uppercase()
    }
}

fn print_text(result: &SkirmishResult, field: &[String]) {
    println!("Skirmish Result");
    println!("===============");
    println!(
        "Winner: {}",
        result.winner.as_deref().unwrap_or("undecided")
    );
    println!("Turns: {}", result.turns);
    println!("Moves: {}", result.moves);
    println!("Attacks: {} ({} hits)", result.attacks, result.hits);
    println!();
    println!("Survivors:");
    for s in &result.survivors {
        println!(
            "  {} [{}] {}/{} at ({},{})",
            s.name, s.faction, s.health, s.max_health, s.position.q, s.position.r
        );
    }
    println!();
    println!("Field:");
    for row in field {
        println!("  {row}");
    }
    println!();
    println!("Seed: {}", result.seed);
}
