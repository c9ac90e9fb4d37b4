//! The round document: `RoundState` as it sits in the shared store.
//!
//! ## Shape
//!
//! camelCase keys, seats as plain indices, faces as numbers or tag strings:
//!
//! ```text
//! { players: [{id, name}] x4, deck: [Card], hands: [[Card]] x4,
//!   played: [PlayedCard | null] x4, currentPlayer, startPlayer, settleIndex,
//!   round, phase, referencePoint, direction, flipNext, log: [string], winner? }
//! ```
//!
//! ## Validation
//!
//! `RoundState::try_from(RoundDocument)` is the only place a document is
//! checked. Everything downstream assumes a well-formed `RoundState`.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::cards::{Card, PlayedCard, CATALOG_SIZE, MAX_VALUE, MIN_VALUE};
use crate::core::{
    Direction, IntegrityError, Phase, PlayerInfo, RoundState, Seat, SeatMap, Winner, SEAT_COUNT,
};

use super::DocumentError;

const LOG_TARGET: &str = "par_game::document::round";

/// Wire form of the game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundDocument {
    pub players: Vec<PlayerInfo>,
    #[serde(default)]
    pub deck: Vec<Card>,
    pub hands: Vec<Vec<Card>>,
    pub played: Vec<Option<PlayedCard>>,
    pub current_player: usize,
    pub start_player: usize,
    #[serde(default)]
    pub settle_index: usize,
    pub round: u32,
    pub phase: Phase,
    pub reference_point: i64,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub flip_next: bool,
    #[serde(default)]
    pub log: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
}

impl RoundDocument {
    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<&RoundState> for RoundDocument {
    fn from(state: &RoundState) -> Self {
        Self {
            players: state.players.values().cloned().collect(),
            deck: state.deck.iter().copied().collect(),
            hands: state
                .hands
                .values()
                .map(|hand| hand.iter().copied().collect())
                .collect(),
            played: state.played.values().copied().collect(),
            current_player: state.current_seat.index(),
            start_player: state.start_seat.index(),
            settle_index: state.settle_seat.index(),
            round: state.round,
            phase: state.phase,
            reference_point: i64::from(state.reference_point),
            direction: state.direction,
            flip_next: state.pending_flip,
            log: state.log.iter().cloned().collect(),
            winner: state.winner.clone(),
        }
    }
}

impl TryFrom<RoundDocument> for RoundState {
    type Error = IntegrityError;

    fn try_from(doc: RoundDocument) -> Result<Self, Self::Error> {
        let round = doc.round;
        let phase = doc.phase;
        validate(doc).map_err(|err| {
            error!(target: LOG_TARGET, round, %phase, %err, "rejected round document");
            err
        })
    }
}

fn seat_array<T>(what: &'static str, items: Vec<T>) -> Result<SeatMap<T>, IntegrityError> {
    let found = items.len();
    let data: [T; SEAT_COUNT] = items
        .try_into()
        .map_err(|_| IntegrityError::SeatCount { what, found })?;
    Ok(SeatMap::from_array(data))
}

fn validate(doc: RoundDocument) -> Result<RoundState, IntegrityError> {
    let players = seat_array("players", doc.players)?;
    let hands = seat_array("hands", doc.hands)?;
    let played = seat_array("played slots", doc.played)?;

    let current_seat = Seat::try_from(doc.current_player)?;
    let start_seat = Seat::try_from(doc.start_player)?;
    let settle_seat = Seat::try_from(doc.settle_index)?;

    let reference_point = u8::try_from(doc.reference_point)
        .ok()
        .filter(|r| (MIN_VALUE..=MAX_VALUE).contains(r))
        .ok_or(IntegrityError::ReferencePoint(doc.reference_point))?;
    if doc.round == 0 {
        return Err(IntegrityError::RoundNumber);
    }

    for card in doc.deck.iter().chain(hands.values().flatten()) {
        card.validate()?;
    }
    for (slot, card) in played.iter() {
        if let Some(card) = card {
            card.validate(slot)?;
        }
    }

    let played_count = played.values().filter(|p| p.is_some()).count();
    let total = doc.deck.len() + hands.values().map(Vec::len).sum::<usize>() + played_count;
    if total > CATALOG_SIZE {
        return Err(IntegrityError::CardCount(total));
    }

    match doc.phase {
        Phase::Playing if played_count == SEAT_COUNT => return Err(IntegrityError::PlayingComplete),
        Phase::Playing if played[current_seat].is_some() => {
            return Err(IntegrityError::ActorAlreadyPlayed { seat: current_seat })
        }
        Phase::Settling if played[settle_seat].is_none() => {
            return Err(IntegrityError::MissingPlayed(settle_seat))
        }
        _ => {}
    }
    if doc.winner.is_some() != (doc.phase == Phase::Finished) {
        return Err(IntegrityError::WinnerPhase {
            phase: doc.phase,
            has_winner: doc.winner.is_some(),
        });
    }

    let to_vector = |cards: Vec<Card>| cards.into_iter().collect::<Vector<Card>>();
    Ok(RoundState {
        players,
        deck: to_vector(doc.deck),
        hands: SeatMap::from_array(hands.into_array().map(to_vector)),
        played,
        reference_point,
        direction: doc.direction,
        start_seat,
        current_seat,
        settle_seat,
        round: doc.round,
        phase: doc.phase,
        pending_flip: doc.flip_next,
        log: doc.log.into_iter().collect(),
        winner: doc.winner,
    })
}
