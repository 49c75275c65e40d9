//! Turn orchestrator
//!
//! `BattleState` is a synchronous interpreter over the combat phase machine:
//! exploration -> input -> execution(move -> action) -> input ...
//!
//! Callers pull `Step`s from `advance()`. A `Step::RequestMove` hands out a
//! ticket; nothing else happens until that ticket comes back through
//! `complete_move()`. Attack steps carry the pacing delays the caller should
//! observe before advancing again.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::battle::ai::{BattleAI, DecisionContext, TargetingAi};
use crate::battle::battle_map::BattleMap;
use crate::battle::character::{Character, Disposition, Roster};
use crate::battle::engagement::{Disengagement, EngagementTracker};
use crate::battle::events::{
    dispatch, AttackOutcome, AttackReport, BattleEvent, BattleEventType, BattleObserver,
    MoveCancelReason, TracingObserver,
};
use crate::battle::hex::HexCoord;
use crate::battle::hostility::HostilityTable;
use crate::battle::intent::{validate_intent, ActionIntent};
use crate::battle::ordering::ExecutionQueues;
use crate::battle::topology::HexTopology;
use crate::combat::resolution::resolve_strike;
use crate::combat::rolls::{RollSource, SeededRolls};
use crate::core::config::CombatConfig;
use crate::core::error::{BattleError, IntentError, Result};
use crate::core::types::{CharacterId, TurnNumber};

/// Sub-phases of execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStage {
    Move,
    Action,
}

/// Battle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    #[default]
    Exploration,
    Input,
    Execution(ExecutionStage),
}

impl BattlePhase {
    pub fn is_combat(&self) -> bool {
        !matches!(self, BattlePhase::Exploration)
    }
}

impl fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattlePhase::Exploration => write!(f, "exploration"),
            BattlePhase::Input => write!(f, "input"),
            BattlePhase::Execution(ExecutionStage::Move) => write!(f, "execution/move"),
            BattlePhase::Execution(ExecutionStage::Action) => write!(f, "execution/action"),
        }
    }
}

/// A move the movement collaborator must carry out and confirm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub ticket: u64,
    pub character: CharacterId,
    pub from: HexCoord,
    pub to: HexCoord,
}

/// What the caller should do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Not in combat
    Idle,
    /// These player-controlled combatants still owe an intent
    AwaitingInput { pending: Vec<CharacterId> },
    /// Carry out the move, then call `complete_move` with its ticket
    RequestMove(MoveRequest),
    /// Wait `delay`, then advance to resolve the attack
    AttackWindup {
        attacker: CharacterId,
        target: HexCoord,
        delay: Duration,
    },
    /// Wait `settle` before advancing to the next attacker
    AttackResolved {
        report: AttackReport,
        settle: Duration,
    },
    /// Every queued action ran; the next input phase is open
    TurnComplete { completed: TurnNumber },
}

/// Complete battle state
pub struct BattleState<T: HexTopology = BattleMap> {
    pub topology: T,
    pub roster: Roster,
    pub engagements: EngagementTracker,
    pub hostility: HostilityTable,
    pub config: CombatConfig,

    phase: BattlePhase,
    turn: TurnNumber,

    // Turn-scoped
    combatants: Vec<CharacterId>,
    intents: HashMap<CharacterId, ActionIntent>,
    queues: ExecutionQueues,
    cursor: usize,
    pending_move: Option<MoveRequest>,
    pending_attack: Option<CharacterId>,
    active: Option<CharacterId>,
    next_ticket: u64,

    rolls: Box<dyn RollSource + Send>,
    ai: Box<dyn BattleAI>,
    observers: Vec<Box<dyn BattleObserver>>,

    // Log
    pub battle_log: Vec<BattleEvent>,
}

impl<T: HexTopology> BattleState<T> {
    pub fn new(
        topology: T,
        roster: Roster,
        config: CombatConfig,
        rolls: impl RollSource + Send + 'static,
    ) -> Self {
        Self {
            topology,
            roster,
            engagements: EngagementTracker::new(),
            hostility: HostilityTable::new(),
            config,
            phase: BattlePhase::Exploration,
            turn: 0,
            combatants: Vec::new(),
            intents: HashMap::new(),
            queues: ExecutionQueues::default(),
            cursor: 0,
            pending_move: None,
            pending_attack: None,
            active: None,
            next_ticket: 1,
            rolls: Box::new(rolls),
            ai: Box::new(TargetingAi::new()),
            observers: vec![Box::new(TracingObserver)],
            battle_log: Vec::new(),
        }
    }

    /// Convenience constructor with a seeded roll stream
    pub fn seeded(topology: T, roster: Roster, config: CombatConfig, seed: u64) -> Self {
        Self::new(topology, roster, config, SeededRolls::new(seed))
    }

    pub fn with_ai(mut self, ai: impl BattleAI + 'static) -> Self {
        self.ai = Box::new(ai);
        self
    }

    pub fn subscribe(&mut self, observer: impl BattleObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn set_rolls(&mut self, rolls: impl RollSource + Send + 'static) {
        self.rolls = Box::new(rolls);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Turn counter; 1 on the first combat turn
    pub fn turn(&self) -> TurnNumber {
        self.turn
    }

    pub fn is_in_combat(&self) -> bool {
        self.phase.is_combat()
    }

    /// Whoever is moving or attacking right now
    pub fn active_executor(&self) -> Option<CharacterId> {
        self.active
    }

    /// Living characters snapshotted when this input phase opened
    pub fn combatants(&self) -> &[CharacterId] {
        &self.combatants
    }

    pub fn intent_of(&self, id: CharacterId) -> Option<&ActionIntent> {
        self.intents.get(&id)
    }

    /// Intents recorded so far in the current input phase
    pub fn intents(&self) -> &HashMap<CharacterId, ActionIntent> {
        &self.intents
    }

    pub fn pending_move(&self) -> Option<&MoveRequest> {
        self.pending_move.as_ref()
    }

    /// Occupancy as of the latest committed position
    pub fn character_at(&self, hex: HexCoord) -> Option<&Character> {
        self.roster.occupant_at(hex)
    }

    /// Player-controlled combatants that have not submitted yet
    pub fn pending_players(&self) -> Vec<CharacterId> {
        if self.phase != BattlePhase::Input {
            return Vec::new();
        }
        self.combatants
            .iter()
            .copied()
            .filter(|id| !self.intents.contains_key(id))
            .filter(|id| self.roster.get(*id).is_some_and(|c| c.is_player()))
            .collect()
    }

    /// Does any living character still hold a living enemy?
    pub fn hostilities_remain(&self) -> bool {
        self.hostility.any_active(&self.roster)
    }

    // ------------------------------------------------------------------
    // Phase transitions
    // ------------------------------------------------------------------

    /// Exploration -> input, turn 1
    pub fn start_combat(&mut self) -> Result<()> {
        self.require_phase(BattlePhase::Exploration)?;
        self.turn = 1;
        self.emit(BattleEventType::CombatStarted, "Combat begins".into());
        self.enter_input();
        Ok(())
    }

    /// Any phase -> exploration
    ///
    /// Drops queues, intents and any outstanding move ticket; a late
    /// completion for that ticket is rejected as stale. Engagement and
    /// hostility persist.
    pub fn end_combat(&mut self) {
        if !self.phase.is_combat() {
            return;
        }
        self.clear_turn_state();
        self.set_phase(BattlePhase::Exploration);
        self.emit(
            BattleEventType::CombatEnded,
            format!("Combat ends after turn {}", self.turn),
        );
    }

    /// Throw away the current turn after a fatal error and reopen input
    ///
    /// Positions and damage already committed stay; the turn counter does not
    /// advance.
    pub fn abort_turn(&mut self) {
        if !self.phase.is_combat() {
            return;
        }
        warn!(turn = self.turn, phase = %self.phase, "aborting turn");
        self.enter_input();
    }

    /// Record a player-controlled combatant's intent
    ///
    /// Rejections change nothing. Once every player has submitted, the next
    /// `advance()` runs the AI and starts execution.
    pub fn submit_intent(&mut self, id: CharacterId, intent: ActionIntent) -> Result<()> {
        self.require_phase(BattlePhase::Input)?;

        if !self.combatants.contains(&id) {
            return Err(IntentError::NotACombatant(id).into());
        }
        let actor = self.roster.require(id)?;
        if !actor.is_player() {
            return Err(IntentError::NotPlayerControlled(id).into());
        }
        if self.intents.contains_key(&id) {
            return Err(IntentError::AlreadySubmitted(id).into());
        }
        validate_intent(actor, &intent, &self.topology, &self.config)?;

        self.record_intent(id, intent);
        Ok(())
    }

    /// Run until the caller has something to do
    pub fn advance(&mut self) -> Result<Step> {
        loop {
            match self.phase {
                BattlePhase::Exploration => return Ok(Step::Idle),

                BattlePhase::Input => {
                    let pending = self.pending_players();
                    if !pending.is_empty() {
                        return Ok(Step::AwaitingInput { pending });
                    }
                    self.commit_input()?;
                }

                BattlePhase::Execution(ExecutionStage::Move) => {
                    if let Some(request) = &self.pending_move {
                        return Err(BattleError::ContinuationPending(request.ticket));
                    }
                    if let Some(request) = self.next_move()? {
                        return Ok(Step::RequestMove(request));
                    }
                    self.cursor = 0;
                    self.set_phase(BattlePhase::Execution(ExecutionStage::Action));
                }

                BattlePhase::Execution(ExecutionStage::Action) => {
                    if let Some(attacker) = self.pending_attack.take() {
                        let report = self.resolve_attack(attacker)?;
                        self.active = None;
                        return Ok(Step::AttackResolved {
                            report,
                            settle: self.config.settle(),
                        });
                    }

                    if let Some((attacker, target)) = self.next_attacker()? {
                        self.pending_attack = Some(attacker);
                        self.active = Some(attacker);
                        return Ok(Step::AttackWindup {
                            attacker,
                            target,
                            delay: self.config.windup(),
                        });
                    }

                    let completed = self.finish_turn()?;
                    return Ok(Step::TurnComplete { completed });
                }
            }
        }
    }

    /// Continuation for a `Step::RequestMove`
    ///
    /// `success = false` leaves the character where it was.
    pub fn complete_move(&mut self, ticket: u64, success: bool) -> Result<()> {
        let request = match self.pending_move {
            Some(request) if request.ticket == ticket => request,
            _ => return Err(BattleError::StaleCompletion(ticket)),
        };
        self.pending_move = None;
        self.active = None;

        let name = self.name_of(request.character);
        if !success {
            self.emit(
                BattleEventType::MoveCancelled {
                    character: request.character,
                    target: request.to,
                    reason: MoveCancelReason::Refused,
                },
                format!("{name} could not reach {:?}", request.to),
            );
            return Ok(());
        }

        if let Some(occupant) = self.roster.occupant_at(request.to) {
            if occupant.id != request.character {
                return Err(BattleError::Invariant(format!(
                    "{name} completed a move onto {:?}, occupied by {}",
                    request.to, occupant.name
                )));
            }
        }

        let mover = self.roster.require_mut(request.character)?;
        if let Some(direction) = request.from.direction_to(&request.to) {
            mover.facing = direction;
        }
        mover.position = request.to;

        self.emit(
            BattleEventType::MoveCompleted {
                character: request.character,
                from: request.from,
                to: request.to,
            },
            format!("{name} moves {:?} -> {:?}", request.from, request.to),
        );

        let released = self
            .engagements
            .release_separated(&self.roster, request.character);
        self.emit_releases(released);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn require_phase(&self, expected: BattlePhase) -> Result<()> {
        if self.phase != expected {
            return Err(BattleError::WrongPhase {
                expected: match expected {
                    BattlePhase::Exploration => "exploration",
                    BattlePhase::Input => "input",
                    BattlePhase::Execution(_) => "execution",
                },
                actual: self.phase.to_string(),
            });
        }
        Ok(())
    }

    fn emit(&mut self, event_type: BattleEventType, description: String) {
        let event = BattleEvent {
            turn: self.turn,
            event_type,
            description,
        };
        dispatch(&mut self.observers, &event);
        self.battle_log.push(event);
    }

    fn set_phase(&mut self, to: BattlePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        self.emit(
            BattleEventType::PhaseChanged { from, to },
            format!("Turn {}: {from} -> {to}", self.turn),
        );
    }

    fn name_of(&self, id: CharacterId) -> String {
        self.roster
            .get(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn clear_turn_state(&mut self) {
        self.combatants.clear();
        self.intents.clear();
        self.queues = ExecutionQueues::default();
        self.cursor = 0;
        self.pending_move = None;
        self.pending_attack = None;
        self.active = None;
    }

    fn enter_input(&mut self) {
        self.clear_turn_state();
        self.combatants = self.roster.living().map(|c| c.id).collect();
        self.set_phase(BattlePhase::Input);
        debug!(
            turn = self.turn,
            combatants = self.combatants.len(),
            "input phase open"
        );
    }

    fn record_intent(&mut self, id: CharacterId, intent: ActionIntent) {
        self.intents.insert(id, intent);
        let name = self.name_of(id);
        self.emit(
            BattleEventType::IntentRecorded {
                character: id,
                intent,
            },
            format!("{name} intends {intent:?}"),
        );
    }

    /// AI fills in the remaining intents, then execution begins
    fn commit_input(&mut self) -> Result<()> {
        let undecided: Vec<CharacterId> = self
            .combatants
            .iter()
            .copied()
            .filter(|id| !self.intents.contains_key(id))
            .collect();

        for id in undecided {
            let intent = {
                let context = DecisionContext {
                    roster: &self.roster,
                    intents: &self.intents,
                    hostility: &self.hostility,
                    engagements: &self.engagements,
                    topology: &self.topology,
                    config: &self.config,
                    turn: self.turn,
                };
                let intent = self.ai.decide(&context, id)?;
                let actor = self.roster.require(id)?;
                validate_intent(actor, &intent, &self.topology, &self.config).map_err(|e| {
                    BattleError::Invariant(format!("AI chose an invalid intent for {}: {e}", actor.name))
                })?;
                intent
            };
            self.record_intent(id, intent);
        }

        self.queues =
            ExecutionQueues::build(&self.roster, &self.combatants, &self.intents, &self.config);
        self.cursor = 0;
        debug!(
            turn = self.turn,
            movers = self.queues.movers.len(),
            attackers = self.queues.attackers.len(),
            "execution queues built"
        );
        self.set_phase(BattlePhase::Execution(ExecutionStage::Move));
        Ok(())
    }

    /// Next mover whose destination is free; skips the defeated and the blocked
    fn next_move(&mut self) -> Result<Option<MoveRequest>> {
        while let Some(entry) = self.queues.movers.get(self.cursor).copied() {
            self.cursor += 1;
            let id = entry.id;

            let (defeated, from, name) = {
                let mover = self.roster.get(id).ok_or_else(|| {
                    BattleError::Invariant(format!("queued mover {id} left the roster"))
                })?;
                (mover.is_defeated(), mover.position, mover.name.clone())
            };

            if defeated {
                self.emit(
                    BattleEventType::ActorSkipped { character: id },
                    format!("{name} is down and cannot move"),
                );
                continue;
            }

            let Some(ActionIntent::Move { target }) = self.intents.get(&id).copied() else {
                return Err(BattleError::Invariant(format!(
                    "{name} is queued to move without a move intent"
                )));
            };

            if let Some(blocker) = self.roster.occupant_at(target) {
                let blocker = blocker.name.clone();
                self.emit(
                    BattleEventType::MoveCancelled {
                        character: id,
                        target,
                        reason: MoveCancelReason::Blocked,
                    },
                    format!("{name} is blocked by {blocker} at {target:?}"),
                );
                continue;
            }

            let request = MoveRequest {
                ticket: self.next_ticket,
                character: id,
                from,
                to: target,
            };
            self.next_ticket += 1;
            self.pending_move = Some(request);
            self.active = Some(id);
            self.emit(
                BattleEventType::MoveStarted {
                    character: id,
                    from,
                    to: target,
                    ticket: request.ticket,
                },
                format!("{name} sets off {from:?} -> {target:?}"),
            );
            return Ok(Some(request));
        }
        Ok(None)
    }

    fn next_attacker(&mut self) -> Result<Option<(CharacterId, HexCoord)>> {
        while let Some(entry) = self.queues.attackers.get(self.cursor).copied() {
            self.cursor += 1;
            let id = entry.id;

            let (defeated, name) = {
                let attacker = self.roster.get(id).ok_or_else(|| {
                    BattleError::Invariant(format!("queued attacker {id} left the roster"))
                })?;
                (attacker.is_defeated(), attacker.name.clone())
            };

            if defeated {
                self.emit(
                    BattleEventType::ActorSkipped { character: id },
                    format!("{name} is down and cannot attack"),
                );
                continue;
            }

            let Some(ActionIntent::Attack { target, .. }) = self.intents.get(&id).copied() else {
                return Err(BattleError::Invariant(format!(
                    "{name} is queued to attack without an attack intent"
                )));
            };
            return Ok(Some((id, target)));
        }
        Ok(None)
    }

    /// Resolve against whoever stands on the target hex right now
    fn resolve_attack(&mut self, attacker_id: CharacterId) -> Result<AttackReport> {
        let Some(ActionIntent::Attack {
            target,
            attack_type,
        }) = self.intents.get(&attacker_id).copied()
        else {
            return Err(BattleError::Invariant(format!(
                "{attacker_id} resolved an attack without an attack intent"
            )));
        };

        let attacker = self.roster.require_mut(attacker_id)?;
        if let Some(direction) = attacker.position.direction_to(&target) {
            attacker.facing = direction;
        }
        let attacker_name = attacker.name.clone();

        let mut report = AttackReport {
            turn: self.turn,
            attacker: attacker_id,
            target,
            attack_type,
            defender: None,
            outcome: AttackOutcome::Whiff,
            strike: None,
            damage: None,
            friendly_fire: false,
            defender_defeated: false,
        };

        let occupant = self
            .roster
            .occupant_at(target)
            .map(|c| (c.id, c.is_defeated(), c.name.clone()));

        let mut follow_ups = Vec::new();
        let description = match occupant {
            None => format!("{attacker_name} swings at empty ground {target:?}"),
            Some((defender_id, true, defender_name)) => {
                report.defender = Some(defender_id);
                report.outcome = AttackOutcome::NoEffect;
                format!("{attacker_name} strikes the fallen {defender_name}; no effect")
            }
            Some((defender_id, false, defender_name)) => {
                follow_ups = self.strike(&mut report, defender_id)?;
                let damage = report.final_damage();
                match report.outcome {
                    AttackOutcome::Miss => format!("{attacker_name} misses {defender_name}"),
                    AttackOutcome::Critical => format!(
                        "{attacker_name} critically hits {defender_name} for {damage}"
                    ),
                    _ => format!("{attacker_name} hits {defender_name} for {damage}"),
                }
            }
        };

        self.emit(BattleEventType::AttackResolved(report.clone()), description);
        for (event_type, description) in follow_ups {
            self.emit(event_type, description);
        }
        Ok(report)
    }

    /// Damage pipeline plus its side effects on a living defender
    fn strike(
        &mut self,
        report: &mut AttackReport,
        defender_id: CharacterId,
    ) -> Result<Vec<(BattleEventType, String)>> {
        let attacker_id = report.attacker;
        let attacker = self.roster.require(attacker_id)?;
        let defender = self.roster.require(defender_id)?;

        let flanking = self.engagements.flanking_check(attacker, defender);
        let strike = resolve_strike(
            &attacker.attacker_profile(),
            &defender.defender_profile(),
            report.attack_type,
            flanking,
            self.rolls.as_mut(),
            &self.config,
        );
        debug!(
            turn = self.turn,
            hit_chance = strike.hit_chance,
            hit_roll = strike.hit_roll,
            crit_chance = strike.crit_chance,
            crit_roll = ?strike.crit_roll,
            flanking = strike.flanking,
            raw = strike.raw_damage,
            armor = strike.armor_reduction,
            damage = strike.damage,
            "{} -> {}",
            attacker.name,
            defender.name
        );

        let attacker_name = attacker.name.clone();
        let defender_name = defender.name.clone();
        let adjacent = attacker.position.distance(&defender.position) <= 1;
        report.friendly_fire = attacker.faction == defender.faction;
        report.defender = Some(defender_id);
        report.strike = Some(strike);
        report.outcome = match (strike.hit, strike.critical) {
            (false, _) => AttackOutcome::Miss,
            (true, true) => AttackOutcome::Critical,
            (true, false) => AttackOutcome::Hit,
        };

        let mut follow_ups = Vec::new();

        // Being attacked provokes, hit or miss
        let newly_hostile = self.hostility.add_enemy(defender_id, attacker_id);
        let defender = self.roster.require_mut(defender_id)?;
        defender.last_attacked_by = Some(attacker_id);
        let became_aggressive = defender.disposition == Disposition::Neutral;
        defender.disposition = Disposition::Aggressive;
        if newly_hostile || became_aggressive {
            follow_ups.push((
                BattleEventType::HostilityTriggered {
                    holder: defender_id,
                    enemy: attacker_id,
                    became_aggressive,
                },
                format!("{defender_name} turns on {attacker_name}"),
            ));
        }

        if strike.hit {
            let damage = defender.take_damage(attacker_id, strike.damage, strike.bypasses_buffer);
            report.damage = Some(damage);
            if damage.defeated_now {
                report.defender_defeated = true;
                follow_ups.push((
                    BattleEventType::CharacterDefeated {
                        character: defender_id,
                        by: Some(attacker_id),
                    },
                    format!("{defender_name} falls to {attacker_name}"),
                ));
            }
        }

        if report.defender_defeated {
            for release in self.engagements.release_all(defender_id) {
                follow_ups.push(self.release_event(release));
            }
        } else if adjacent && self.engagements.engage(attacker_id, defender_id) {
            follow_ups.push((
                BattleEventType::EngagementStarted {
                    attacker: attacker_id,
                    defender: defender_id,
                },
                format!("{attacker_name} engages {defender_name}"),
            ));
        }

        Ok(follow_ups)
    }

    fn release_event(&self, release: Disengagement) -> (BattleEventType, String) {
        (
            BattleEventType::EngagementReleased {
                attacker: release.attacker,
                defender: release.defender,
            },
            format!(
                "{} disengages from {}",
                self.name_of(release.attacker),
                self.name_of(release.defender)
            ),
        )
    }

    fn emit_releases(&mut self, released: Vec<Disengagement>) {
        for release in released {
            let (event_type, description) = self.release_event(release);
            self.emit(event_type, description);
        }
    }

    fn finish_turn(&mut self) -> Result<TurnNumber> {
        self.verify_invariants()?;
        let completed = self.turn;
        self.emit(
            BattleEventType::TurnCompleted { turn: completed },
            format!("Turn {completed} complete"),
        );
        self.turn += 1;
        self.enter_input();
        Ok(completed)
    }

    /// Vitals in range and every engagement pair alive and adjacent
    pub fn verify_invariants(&self) -> Result<()> {
        for character in self.roster.iter() {
            character.check_invariants()?;
        }

        for defender in self.roster.iter() {
            for attacker_id in self.engagements.engaged_by(defender.id) {
                let attacker = self.roster.require(attacker_id)?;
                if attacker.is_defeated() || defender.is_defeated() {
                    return Err(BattleError::Invariant(format!(
                        "{} still engages {} after a defeat",
                        attacker.name, defender.name
                    )));
                }
                if attacker.position.distance(&defender.position) > 1 {
                    return Err(BattleError::Invariant(format!(
                        "{} engages {} from {} hexes away",
                        attacker.name,
                        defender.name,
                        attacker.position.distance(&defender.position)
                    )));
                }
            }
        }
        Ok(())
    }
}
