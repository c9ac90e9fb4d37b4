//! Game rules.
//!
//! - `settlement`: one card against the reference point
//! - `winner`: the round-end win check
//! - `engine`: the phase state machine that drives a game

pub mod engine;
pub mod settlement;
pub mod winner;

pub use engine::{Advance, GameEngine, PlayReport, SettleStep};
pub use settlement::{apply_settlement, calculate_settle, Settlement};
pub use winner::check_winner;
