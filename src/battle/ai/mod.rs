//! AI intent selection for non-player combatants
//!
//! Architecture: trait + context
//! - `BattleAI` is the swappable decision interface
//! - `DecisionContext` is the read-only view of the battlefield it decides from
//! - `TargetingAi` is the stock implementation

mod targeting;

pub use targeting::{choose_attack_type, TargetingAi};

use std::collections::HashMap;

use crate::battle::character::{Character, Roster};
use crate::battle::engagement::EngagementTracker;
use crate::battle::hostility::HostilityTable;
use crate::battle::intent::ActionIntent;
use crate::battle::topology::HexTopology;
use crate::core::config::CombatConfig;
use crate::core::error::Result;
use crate::core::types::{CharacterId, TurnNumber};

/// Read-only view handed to the AI during the input phase
///
/// Player intents are already recorded in `intents` when this is built, but
/// nothing has moved yet: positions are as of input-phase entry.
pub struct DecisionContext<'a> {
    pub roster: &'a Roster,
    /// Intents recorded so far this turn
    pub intents: &'a HashMap<CharacterId, ActionIntent>,
    pub hostility: &'a HostilityTable,
    pub engagements: &'a EngagementTracker,
    pub topology: &'a dyn HexTopology,
    pub config: &'a CombatConfig,
    pub turn: TurnNumber,
}

impl<'a> DecisionContext<'a> {
    pub fn character(&self, id: CharacterId) -> Result<&'a Character> {
        self.roster.require(id)
    }

    /// What `id` has already committed to this turn, if anything
    pub fn intent_of(&self, id: CharacterId) -> Option<&'a ActionIntent> {
        self.intents.get(&id)
    }
}

/// Trait for battle AI implementations
pub trait BattleAI: Send {
    /// Pick this turn's intent for `actor`
    ///
    /// Errors only when a collaborator fails; "nothing to do" is `Wait`.
    fn decide(&mut self, context: &DecisionContext<'_>, actor: CharacterId) -> Result<ActionIntent>;
}
