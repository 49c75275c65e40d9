pub mod config;
pub mod error;
pub mod types;

pub use config::CombatConfig;
pub use error::{BattleError, ConfigError, ErrorKind, IntentError};
pub use types::{CharacterId, FactionTag, TurnNumber};
