//! Battle events and observers
//!
//! Every state change the orchestrator makes is described by a `BattleEvent`.
//! Events land in `BattleState::battle_log` and are handed to each registered
//! `BattleObserver` in order.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::battle::character::DamageReport;
use crate::battle::execution::BattlePhase;
use crate::battle::hex::HexCoord;
use crate::battle::intent::ActionIntent;
use crate::combat::resolution::StrikeResult;
use crate::combat::weapons::AttackType;
use crate::core::types::{CharacterId, TurnNumber};

/// How an attack on a hex played out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackOutcome {
    /// Nobody on the target hex
    Whiff,
    /// The occupant was already defeated
    NoEffect,
    Miss,
    Hit,
    Critical,
}

/// Full detail of one resolved attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    pub turn: TurnNumber,
    pub attacker: CharacterId,
    pub target: HexCoord,
    pub attack_type: AttackType,
    pub defender: Option<CharacterId>,
    pub outcome: AttackOutcome,
    pub strike: Option<StrikeResult>,
    pub damage: Option<DamageReport>,
    pub friendly_fire: bool,
    pub defender_defeated: bool,
}

impl AttackReport {
    pub fn is_hit(&self) -> bool {
        matches!(self.outcome, AttackOutcome::Hit | AttackOutcome::Critical)
    }

    /// Final damage after mitigation, before buffer routing
    pub fn final_damage(&self) -> i32 {
        self.strike.filter(|s| s.hit).map_or(0, |s| s.damage)
    }

    pub fn health_damage(&self) -> i32 {
        self.damage.map_or(0, |d| d.health_before - d.health_after)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveCancelReason {
    /// Destination occupied when the move came up
    Blocked,
    /// The movement collaborator reported failure
    Refused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEventType {
    CombatStarted,
    CombatEnded,
    PhaseChanged {
        from: BattlePhase,
        to: BattlePhase,
    },
    IntentRecorded {
        character: CharacterId,
        intent: ActionIntent,
    },
    MoveStarted {
        character: CharacterId,
        from: HexCoord,
        to: HexCoord,
        ticket: u64,
    },
    MoveCompleted {
        character: CharacterId,
        from: HexCoord,
        to: HexCoord,
    },
    MoveCancelled {
        character: CharacterId,
        target: HexCoord,
        reason: MoveCancelReason,
    },
    ActorSkipped {
        character: CharacterId,
    },
    AttackResolved(AttackReport),
    HostilityTriggered {
        holder: CharacterId,
        enemy: CharacterId,
        became_aggressive: bool,
    },
    EngagementStarted {
        attacker: CharacterId,
        defender: CharacterId,
    },
    EngagementReleased {
        attacker: CharacterId,
        defender: CharacterId,
    },
    CharacterDefeated {
        character: CharacterId,
        by: Option<CharacterId>,
    },
    TurnCompleted {
        turn: TurnNumber,
    },
}

/// Log entry for battle events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleEvent {
    pub turn: TurnNumber,
    pub event_type: BattleEventType,
    pub description: String,
}

/// Presentation hooks
///
/// `on_event` sees everything; the specific hooks fire after it for phase
/// transitions, resolved attacks and defeats.
pub trait BattleObserver: Send {
    fn on_event(&mut self, _event: &BattleEvent) {}

    fn on_phase_change(&mut self, _from: BattlePhase, _to: BattlePhase, _turn: TurnNumber) {}

    fn on_attack(&mut self, _report: &AttackReport) {}

    fn on_defeat(&mut self, _character: CharacterId, _by: Option<CharacterId>) {}
}

/// Deliver `event` to every observer
pub fn dispatch(observers: &mut [Box<dyn BattleObserver>], event: &BattleEvent) {
    for observer in observers.iter_mut() {
        observer.on_event(event);
        match &event.event_type {
            BattleEventType::PhaseChanged { from, to } => {
                observer.on_phase_change(*from, *to, event.turn)
            }
            BattleEventType::AttackResolved(report) => observer.on_attack(report),
            BattleEventType::CharacterDefeated { character, by } => {
                observer.on_defeat(*character, *by)
            }
            _ => {}
        }
    }
}

/// Mirrors battle events onto `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BattleObserver for TracingObserver {
    fn on_event(&mut self, event: &BattleEvent) {
        let turn = event.turn;
        match &event.event_type {
            BattleEventType::CombatStarted
            | BattleEventType::CombatEnded
            | BattleEventType::PhaseChanged { .. }
            | BattleEventType::TurnCompleted { .. }
            | BattleEventType::CharacterDefeated { .. } => {
                info!(turn, "{}", event.description)
            }
            BattleEventType::MoveCancelled { .. } => warn!(turn, "{}", event.description),
            BattleEventType::AttackResolved(report) if report.friendly_fire => {
                warn!(turn, attacker = %report.attacker, "friendly fire: {}", event.description)
            }
            _ => debug!(turn, "{}", event.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::execution::ExecutionStage;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Counts {
        events: usize,
        phases: usize,
        attacks: usize,
        defeats: usize,
    }

    struct Counter(Arc<Mutex<Counts>>);

    impl BattleObserver for Counter {
        fn on_event(&mut self, _event: &BattleEvent) {
            self.0.lock().unwrap().events += 1;
        }
        fn on_phase_change(&mut self, _from: BattlePhase, _to: BattlePhase, _turn: TurnNumber) {
            self.0.lock().unwrap().phases += 1;
        }
        fn on_attack(&mut self, _report: &AttackReport) {
            self.0.lock().unwrap().attacks += 1;
        }
        fn on_defeat(&mut self, _character: CharacterId, _by: Option<CharacterId>) {
            self.0.lock().unwrap().defeats += 1;
        }
    }

    fn event(event_type: BattleEventType) -> BattleEvent {
        BattleEvent {
            turn: 1,
            event_type,
            description: String::new(),
        }
    }

    fn whiff() -> AttackReport {
        AttackReport {
            turn: 1,
            attacker: CharacterId::new(),
            target: HexCoord::new(0, 0),
            attack_type: AttackType::Light,
            defender: None,
            outcome: AttackOutcome::Whiff,
            strike: None,
            damage: None,
            friendly_fire: false,
            defender_defeated: false,
        }
    }

    #[test]
    fn test_dispatch_routes_specific_hooks() {
        let counts = Arc::new(Mutex::new(Counts::default()));
        let mut observers: Vec<Box<dyn BattleObserver>> =
            vec![Box::new(Counter(counts.clone())), Box::new(TracingObserver)];

        dispatch(
            &mut observers,
            &event(BattleEventType::PhaseChanged {
                from: BattlePhase::Input,
                to: BattlePhase::Execution(ExecutionStage::Move),
            }),
        );
        dispatch(&mut observers, &event(BattleEventType::AttackResolved(whiff())));
        dispatch(
            &mut observers,
            &event(BattleEventType::CharacterDefeated {
                character: CharacterId::new(),
                by: None,
            }),
        );
        dispatch(&mut observers, &event(BattleEventType::CombatStarted));

        let counts = counts.lock().unwrap();
        assert_eq!(counts.events, 4);
        assert_eq!(counts.phases, 1);
        assert_eq!(counts.attacks, 1);
        assert_eq!(counts.defeats, 1);
    }

    #[test]
    fn test_whiff_report_deals_nothing() {
        let report = whiff();
        assert!(!report.is_hit());
        assert_eq!(report.final_damage(), 0);
        assert_eq!(report.health_damage(), 0);
    }
}
