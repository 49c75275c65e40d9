//! Battle system - turn-based skirmishes on a hex grid
//!
//! Each turn every combatant commits one intent, then all moves resolve in
//! speed order before any attack does. Attacks target hexes, not characters,
//! so whoever stands there when the swing lands takes it.

pub mod ai;
pub mod battle_map;
pub mod character;
pub mod driver;
pub mod engagement;
pub mod events;
pub mod execution;
pub mod hex;
pub mod hostility;
pub mod intent;
pub mod ordering;
pub mod pathfinding;
pub mod terrain;
pub mod topology;

// Re-exports for convenient access
pub use ai::{choose_attack_type, BattleAI, DecisionContext, TargetingAi};
pub use battle_map::{BattleHex, BattleMap};
pub use character::{Attributes, Character, Controller, DamageReport, Disposition, Roster};
pub use driver::{run_execution, DriveStop, InstantMovement, MovementCollaborator, TurnSummary};
pub use engagement::{is_behind, rear_hex, Disengagement, EngagementTracker};
pub use events::{
    AttackOutcome, AttackReport, BattleEvent, BattleEventType, BattleObserver, MoveCancelReason,
    TracingObserver,
};
pub use execution::{BattlePhase, BattleState, ExecutionStage, MoveRequest, Step};
pub use hex::{HexCoord, HexDirection};
pub use hostility::HostilityTable;
pub use intent::{validate_intent, ActionIntent, IntentKind, IntentRequest};
pub use ordering::{sort_queue, ExecutionQueues, QueueEntry};
pub use pathfinding::{find_path, path_cost};
pub use terrain::BattleTerrain;
pub use topology::HexTopology;
