//! Error taxonomy for the engine.
//!
//! - `EngineError`: why a seat action or phase advance was rejected
//! - `IntegrityError`: the shared document or a card is malformed
//! - `CatalogError`: the card catalog does not have its fixed composition
//! - `ConfigError`: the configuration cannot produce a playable deal
//!
//! An empty deck on a required draw is not an error. The draw is skipped
//! and the game continues.

use thiserror::Error;

use super::seat::Seat;
use super::state::Phase;
use crate::cards::{Card, Face};

/// A rejected engine operation. The state is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A seat other than the authorized actor tried to act.
    #[error("{seat} acted out of turn, {expected} is to act")]
    TurnViolation { seat: Seat, expected: Seat },

    /// The action is not allowed in the current phase.
    #[error("{action} is not allowed during the {phase} phase")]
    PhaseViolation { action: &'static str, phase: Phase },

    /// The chosen card index is outside the seat's hand.
    #[error("{seat} has no card at index {index} (hand holds {hand_len})")]
    NoSuchCard {
        seat: Seat,
        index: usize,
        hand_len: usize,
    },

    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Malformed shared state. Never silently repaired.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("seat index {0} is out of range")]
    SeatIndex(usize),

    #[error("expected 4 {what}, found {found}")]
    SeatCount { what: &'static str, found: usize },

    #[error("face value {0} is outside 1..=10")]
    FaceValue(u8),

    #[error("unknown face tag {0:?}")]
    UnknownFace(String),

    #[error("{0} may only be printed on a card's bottom")]
    TagOnTop(Face),

    #[error("card {top}/{bottom} has an action tag on both faces")]
    TwoActionFaces { top: Face, bottom: Face },

    #[error("card {0} has the wrong kind for its faces")]
    CardKind(Card),

    #[error("played slot of {slot} holds a card played by {seat}")]
    PlayedSlot { slot: Seat, seat: Seat },

    #[error("played card of {0} shows or hides a face it does not have")]
    PlayedFaces(Seat),

    #[error("{seat} hides {face}, which must always be shown")]
    HiddenActionFace { seat: Seat, face: Face },

    #[error("{0} has no played card to settle")]
    MissingPlayed(Seat),

    #[error("reference point {0} is outside 1..=10")]
    ReferencePoint(i64),

    #[error("round number must be at least 1")]
    RoundNumber,

    #[error("all four seats have played but the phase is still playing")]
    PlayingComplete,

    #[error("{seat} is to act but has already played")]
    ActorAlreadyPlayed { seat: Seat },

    #[error("phase {phase} does not match winner record (winner present: {has_winner})")]
    WinnerPhase { phase: Phase, has_winner: bool },

    #[error("document holds {0} cards, more than the catalog")]
    CardCount(usize),
}

/// The catalog deviates from its fixed composition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog group {group} has {actual} cards, expected {expected}")]
    Group {
        group: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("catalog has {actual} cards, expected {expected}")]
    Total { expected: usize, actual: usize },

    #[error(transparent)]
    Card(#[from] IntegrityError),
}

/// The configuration cannot produce a playable deal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cannot deal {0} cards to each of 4 seats from 108")]
    HandSize(usize),

    #[error("log capacity must be at least 1")]
    LogCapacity,
}
