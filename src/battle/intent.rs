//! Action intents: what each combatant means to do this turn
//!
//! One intent per combatant per turn, recorded during input and immutable
//! until the turn resolves. Attacks name a hex, not a character.

use serde::{Deserialize, Serialize};

use crate::battle::character::Character;
use crate::battle::hex::HexCoord;
use crate::battle::topology::HexTopology;
use crate::combat::weapons::AttackType;
use crate::core::config::CombatConfig;
use crate::core::error::IntentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Move,
    Attack,
    Wait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionIntent {
    Move {
        target: HexCoord,
    },
    Attack {
        target: HexCoord,
        #[serde(default)]
        attack_type: AttackType,
    },
    Wait,
}

impl ActionIntent {
    pub fn move_to(target: HexCoord) -> Self {
        ActionIntent::Move { target }
    }

    pub fn attack(target: HexCoord, attack_type: AttackType) -> Self {
        ActionIntent::Attack {
            target,
            attack_type,
        }
    }

    pub fn kind(&self) -> IntentKind {
        match self {
            ActionIntent::Move { .. } => IntentKind::Move,
            ActionIntent::Attack { .. } => IntentKind::Attack,
            ActionIntent::Wait => IntentKind::Wait,
        }
    }

    pub fn target(&self) -> Option<HexCoord> {
        match self {
            ActionIntent::Move { target } | ActionIntent::Attack { target, .. } => Some(*target),
            ActionIntent::Wait => None,
        }
    }
}

/// Loose intent as a UI or script would hand it over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRequest {
    pub kind: IntentKind,
    #[serde(default)]
    pub target: Option<HexCoord>,
    #[serde(default)]
    pub attack_type: Option<AttackType>,
}

impl TryFrom<IntentRequest> for ActionIntent {
    type Error = IntentError;

    fn try_from(request: IntentRequest) -> Result<Self, Self::Error> {
        match request.kind {
            IntentKind::Wait => Ok(ActionIntent::Wait),
            IntentKind::Move => request
                .target
                .map(ActionIntent::move_to)
                .ok_or(IntentError::MissingTarget),
            IntentKind::Attack => request
                .target
                .map(|t| ActionIntent::attack(t, request.attack_type.unwrap_or_default()))
                .ok_or(IntentError::MissingTarget),
        }
    }
}

/// Check an intent against the actor and the board as they stand now
///
/// Occupancy is not checked here; moves are re-checked at execution time and
/// attacks resolve against whoever is on the hex then.
pub fn validate_intent(
    actor: &Character,
    intent: &ActionIntent,
    topology: &dyn HexTopology,
    config: &CombatConfig,
) -> Result<(), IntentError> {
    if actor.is_defeated() {
        return Err(IntentError::Defeated(actor.id));
    }

    let (target, max, must_be_passable) = match *intent {
        ActionIntent::Wait => return Ok(()),
        ActionIntent::Move { target } => (target, config.move_range, true),
        ActionIntent::Attack { target, .. } => (target, config.attack_range, false),
    };

    if target == actor.position {
        return Err(IntentError::SelfTarget(actor.id));
    }
    if !topology.in_bounds(target) {
        return Err(IntentError::TargetOutOfBounds(target));
    }

    let distance = topology.distance(actor.position, target);
    if distance > max {
        return Err(IntentError::TargetNotAdjacent {
            target,
            distance,
            max,
        });
    }

    if must_be_passable && !topology.is_passable(target) {
        return Err(IntentError::TargetImpassable(target));
    }

    Ok(())
}
