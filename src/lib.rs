//! Hex Tactics - turn-based tactical combat on a hex grid

pub mod battle;
pub mod combat;
pub mod core;
