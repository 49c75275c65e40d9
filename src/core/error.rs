use thiserror::Error;

use crate::battle::hex::HexCoord;
use crate::core::types::CharacterId;

/// Which class of failure an error belongs to.
///
/// Callers use this to decide between "resubmit", "log and abort the turn"
/// and "fix the caller".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected synchronously; nothing changed, resubmit
    InvalidIntent,
    /// Orchestrator bug; abort the turn loudly
    StructuralInvariant,
    /// Movement or path-finding collaborator failed; fatal for the turn
    CollaboratorFailure,
    /// API called in the wrong phase or with a stale continuation
    Usage,
}

/// Reasons an intent is rejected at submission time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntentError {
    #[error("{0} is not a combatant this turn")]
    NotACombatant(CharacterId),

    #[error("{0} is not player controlled")]
    NotPlayerControlled(CharacterId),

    #[error("{0} already has an intent recorded this turn")]
    AlreadySubmitted(CharacterId),

    #[error("{0} is defeated")]
    Defeated(CharacterId),

    #[error("intent requires a target hex")]
    MissingTarget,

    #[error("{0} cannot target its own hex")]
    SelfTarget(CharacterId),

    #[error("target {target:?} is {distance} hexes away (max {max})")]
    TargetNotAdjacent {
        target: HexCoord,
        distance: u32,
        max: u32,
    },

    #[error("target {0:?} is off the map")]
    TargetOutOfBounds(HexCoord),

    #[error("target {0:?} is impassable")]
    TargetImpassable(HexCoord),
}

#[derive(Error, Debug)]
pub enum BattleError {
    #[error("Invalid intent: {0}")]
    InvalidIntent(#[from] IntentError),

    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Hex {0:?} is already occupied")]
    HexOccupied(HexCoord),

    #[error("Operation requires {expected} phase, battle is in {actual}")]
    WrongPhase {
        expected: &'static str,
        actual: String,
    },

    #[error("A move continuation (ticket {0}) is still outstanding")]
    ContinuationPending(u64),

    #[error("Stale move completion: ticket {0} is not outstanding")]
    StaleCompletion(u64),

    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("Movement collaborator failed: {0}")]
    Movement(String),

    #[error("Path-finding failed: {0}")]
    Pathfinding(String),
}

impl BattleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BattleError::InvalidIntent(_) => ErrorKind::InvalidIntent,
            BattleError::Invariant(_) => ErrorKind::StructuralInvariant,
            BattleError::Movement(_) | BattleError::Pathfinding(_) => {
                ErrorKind::CollaboratorFailure
            }
            BattleError::CharacterNotFound(_)
            | BattleError::HexOccupied(_)
            | BattleError::WrongPhase { .. }
            | BattleError::ContinuationPending(_)
            | BattleError::StaleCompletion(_) => ErrorKind::Usage,
        }
    }

    /// True when the turn cannot continue and should be aborted
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::StructuralInvariant | ErrorKind::CollaboratorFailure
        )
    }
}

/// Errors loading configuration or equipment tables
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, BattleError>;
