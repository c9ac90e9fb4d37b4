//! # par-game
//!
//! Rules engine for a four-seat card game played with two-faced cards.
//!
//! Each round every seat commits one card, showing one face and hiding the
//! other. The cards are then settled in seat order against a running
//! reference point: a hidden number below the reference costs the seat a
//! draw, hidden function tags protect it. The first seat to empty its hand
//! at a round boundary wins.
//!
//! ## Design Principles
//!
//! 1. **One state machine**: `playing -> revealing -> settling -> round-end`.
//!    Seat actions are accepted only while playing; every other transition is
//!    a system step that is a no-op when invoked out of phase.
//!
//! 2. **Validate at the edge**: the shared document is checked once, when it
//!    becomes a `RoundState`. The engine then assumes a well-formed state.
//!
//! 3. **No partial writes**: a rejected operation leaves the state and the
//!    stored document untouched.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: deck, hands and log are `im` vectors,
//!   so a session can work on a copy and commit only on success.
//!
//! - **Single writer**: stored documents carry a revision and every update is
//!   one transaction, so duplicate advance triggers apply once.
//!
//! ## Modules
//!
//! - `core`: seats, turn order, RNG, configuration, state, errors
//! - `cards`: faces, cards, the 108-card catalog and the shuffler
//! - `effects`: shown-face effects (forced draw, direction flip)
//! - `rules`: settlement, win detection and the phase state machine
//! - `document`: the shared room and round documents
//! - `session`: document storage and the per-session context

pub mod cards;
pub mod core;
pub mod document;
pub mod effects;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    next_seat, settlement_order, Direction, EngineError, GameConfig, GameRng, IntegrityError,
    Phase, PlayerInfo, RoundState, Seat, SeatMap, Winner,
};

pub use crate::cards::{build_catalog, shuffle, Card, Color, Face, PlayedCard, Side, Transform};

pub use crate::effects::{DrawOutcome, EffectResolver, ShownEffect};

pub use crate::rules::{calculate_settle, check_winner, Advance, GameEngine, PlayReport, Settlement};

pub use crate::document::{DocumentError, Room, RoomStatus, RoundDocument};

pub use crate::session::{DocumentStore, GameSession, InMemoryStore, StoreError, Versioned};
