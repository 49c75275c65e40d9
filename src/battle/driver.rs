//! Async turn driver
//!
//! Pulls steps from a `BattleState` and performs the waiting they ask for:
//! the movement collaborator's completion signal, and the windup/settle
//! pacing around attacks. Exactly one continuation is outstanding at a time.

use serde::Serialize;
use tokio::sync::oneshot;
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, error};

use crate::battle::events::AttackReport;
use crate::battle::execution::{BattleState, MoveRequest, Step};
use crate::battle::topology::HexTopology;
use crate::core::error::{BattleError, Result};
use crate::core::types::{CharacterId, TurnNumber};

/// Carries out moves and reports back exactly once per request
pub trait MovementCollaborator: Send {
    /// Start the move; the receiver yields `true` once it is committed
    fn request_move(&mut self, request: MoveRequest) -> oneshot::Receiver<bool>;
}

/// Confirms every move immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantMovement;

impl MovementCollaborator for InstantMovement {
    fn request_move(&mut self, _request: MoveRequest) -> oneshot::Receiver<bool> {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(true);
        rx
    }
}

/// What happened during one driven execution phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TurnSummary {
    pub turn: TurnNumber,
    pub moves_requested: usize,
    pub moves_completed: usize,
    pub attacks: Vec<AttackReport>,
}

/// Where the driver stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveStop {
    TurnComplete(TurnSummary),
    AwaitingInput(Vec<CharacterId>),
    Idle,
}

/// Drive the battle until the turn completes or input is needed
///
/// A move that never signals (watchdog) or whose sender is dropped is fatal:
/// the turn is aborted and the error returned.
pub async fn run_execution<T: HexTopology>(
    state: &mut BattleState<T>,
    movement: &mut dyn MovementCollaborator,
) -> Result<DriveStop> {
    let mut summary = TurnSummary {
        turn: state.turn(),
        ..TurnSummary::default()
    };

    loop {
        let step = match state.advance() {
            Ok(step) => step,
            Err(e) => return Err(abort_on_fatal(state, e)),
        };

        match step {
            Step::Idle => return Ok(DriveStop::Idle),
            Step::AwaitingInput { pending } => return Ok(DriveStop::AwaitingInput(pending)),
            Step::RequestMove(request) => {
                summary.moves_requested += 1;
                let success = match await_move(state, movement, request).await {
                    Ok(success) => success,
                    Err(e) => return Err(abort_on_fatal(state, e)),
                };
                if success {
                    summary.moves_completed += 1;
                }
            }
            Step::AttackWindup { delay, .. } => pace(delay).await,
            Step::AttackResolved { report, settle } => {
                summary.attacks.push(report);
                pace(settle).await;
            }
            Step::TurnComplete { completed } => {
                summary.turn = completed;
                debug!(
                    turn = completed,
                    moves = summary.moves_completed,
                    attacks = summary.attacks.len(),
                    "turn driven to completion"
                );
                return Ok(DriveStop::TurnComplete(summary));
            }
        }
    }
}

async fn await_move<T: HexTopology>(
    state: &mut BattleState<T>,
    movement: &mut dyn MovementCollaborator,
    request: MoveRequest,
) -> Result<bool> {
    let receiver = movement.request_move(request);
    let watchdog = state.config.move_watchdog();

    let success = match timeout(watchdog, receiver).await {
        Ok(Ok(success)) => success,
        Ok(Err(_)) => {
            return Err(BattleError::Movement(format!(
                "completion for ticket {} was dropped",
                request.ticket
            )))
        }
        Err(_) => {
            return Err(BattleError::Movement(format!(
                "ticket {} did not complete within {:?}",
                request.ticket, watchdog
            )))
        }
    };

    state.complete_move(request.ticket, success)?;
    Ok(success)
}

async fn pace(delay: Duration) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
}

fn abort_on_fatal<T: HexTopology>(state: &mut BattleState<T>, e: BattleError) -> BattleError {
    if e.is_fatal() {
        error!(turn = state.turn(), "turn aborted: {e}");
        state.abort_turn();
    }
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::battle_map::BattleMap;
    use crate::battle::character::{Character, Controller, Roster};
    use crate::battle::execution::BattlePhase;
    use crate::battle::hex::HexCoord;
    use crate::battle::intent::ActionIntent;
    use crate::combat::rolls::ScriptedRolls;
    use crate::combat::weapons::AttackType;
    use crate::core::config::CombatConfig;
    use crate::core::error::ErrorKind;
    use crate::core::types::FactionTag;
    use tokio::time::Instant;

    /// Confirms after a delay on a spawned task
    struct SlowMovement(Duration);

    impl MovementCollaborator for SlowMovement {
        fn request_move(&mut self, _request: MoveRequest) -> oneshot::Receiver<bool> {
            let (tx, rx) = oneshot::channel();
            let delay = self.0;
            tokio::spawn(async move {
                sleep(delay).await;
                let _ = tx.send(true);
            });
            rx
        }
    }

    /// Holds senders forever
    #[derive(Default)]
    struct StuckMovement(Vec<oneshot::Sender<bool>>);

    impl MovementCollaborator for StuckMovement {
        fn request_move(&mut self, _request: MoveRequest) -> oneshot::Receiver<bool> {
            let (tx, rx) = oneshot::channel();
            self.0.push(tx);
            rx
        }
    }

    /// Drops the sender without answering
    struct DroppingMovement;

    impl MovementCollaborator for DroppingMovement {
        fn request_move(&mut self, _request: MoveRequest) -> oneshot::Receiver<bool> {
            let (_tx, rx) = oneshot::channel();
            rx
        }
    }

    fn solo(config: CombatConfig) -> (BattleState, CharacterId) {
        let hero = Character::new("Hero", FactionTag::new("party"), HexCoord::new(0, 0))
            .with_controller(Controller::Player);
        let id = hero.id;
        let mut roster = Roster::new();
        roster.add(hero).unwrap();
        let state = BattleState::new(BattleMap::new(6, 6), roster, config, ScriptedRolls::default());
        (state, id)
    }

    #[tokio::test(start_paused = true)]
    async fn test_instant_movement_completes_turn() {
        let (mut state, id) = solo(CombatConfig::headless());
        state.start_combat().unwrap();
        state
            .submit_intent(id, ActionIntent::move_to(HexCoord::new(1, 0)))
            .unwrap();

        let stop = run_execution(&mut state, &mut InstantMovement).await.unwrap();
        let DriveStop::TurnComplete(summary) = stop else {
            panic!("expected turn completion, got {stop:?}");
        };
        assert_eq!(summary.turn, 1);
        assert_eq!(summary.moves_completed, 1);
        assert_eq!(state.roster.get(id).unwrap().position, HexCoord::new(1, 0));
        assert_eq!(state.turn(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_slow_movement() {
        let (mut state, id) = solo(CombatConfig::headless());
        state.start_combat().unwrap();
        state
            .submit_intent(id, ActionIntent::move_to(HexCoord::new(1, 0)))
            .unwrap();

        let start = Instant::now();
        let mut movement = SlowMovement(Duration::from_millis(750));
        run_execution(&mut state, &mut movement).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(750));
        assert_eq!(state.roster.get(id).unwrap().position, HexCoord::new(1, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_attack_pacing_delays_observed() {
        let (mut state, id) = solo(CombatConfig::default());
        state.start_combat().unwrap();
        state
            .submit_intent(id, ActionIntent::attack(HexCoord::new(1, 0), AttackType::Light))
            .unwrap();

        let start = Instant::now();
        let stop = run_execution(&mut state, &mut InstantMovement).await.unwrap();
        let expected = state.config.windup() + state.config.settle();

        assert!(start.elapsed() >= expected);
        let DriveStop::TurnComplete(summary) = stop else {
            panic!("expected turn completion");
        };
        assert_eq!(summary.attacks.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watchdog_aborts_turn() {
        let (mut state, id) = solo(CombatConfig::headless());
        state.start_combat().unwrap();
        state
            .submit_intent(id, ActionIntent::move_to(HexCoord::new(1, 0)))
            .unwrap();

        let mut movement = StuckMovement::default();
        let err = run_execution(&mut state, &mut movement).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CollaboratorFailure);
        assert_eq!(state.phase(), BattlePhase::Input);
        assert_eq!(state.turn(), 1);
        assert!(state.pending_move().is_none());
        assert_eq!(state.roster.get(id).unwrap().position, HexCoord::new(0, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_completion_is_fatal() {
        let (mut state, id) = solo(CombatConfig::headless());
        state.start_combat().unwrap();
        state
            .submit_intent(id, ActionIntent::move_to(HexCoord::new(1, 0)))
            .unwrap();

        let err = run_execution(&mut state, &mut DroppingMovement)
            .await
            .unwrap_err();
        assert!(matches!(err, BattleError::Movement(_)));
        assert!(err.is_fatal());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_input_needed() {
        let (mut state, id) = solo(CombatConfig::headless());
        state.start_combat().unwrap();

        let stop = run_execution(&mut state, &mut InstantMovement).await.unwrap();
        assert_eq!(stop, DriveStop::AwaitingInput(vec![id]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_outside_combat() {
        let (mut state, _) = solo(CombatConfig::headless());
        let stop = run_execution(&mut state, &mut InstantMovement).await.unwrap();
        assert_eq!(stop, DriveStop::Idle);
    }
}
