//! Round state: the authoritative in-memory game state.
//!
//! ## RoundState
//!
//! Everything the engine reads and writes during a game:
//! - Seats (player identity and name), hands and the shared deck
//! - The played slot of each seat for the current round
//! - Reference point, direction, start/current/settle seats
//! - Round number, phase, deferred flip flag
//! - The human-readable game log and the winner record
//!
//! A `RoundState` is created once at game start and reset in place at every
//! round boundary. Uses `im` persistent vectors so a session can clone the
//! state, apply an operation and commit only on success.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::seat::{settlement_order, Direction, Seat, SeatMap, SEAT_COUNT};
use crate::cards::{Card, PlayedCard, MIN_VALUE};

/// Phase of the round state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Seats play one card each, in turn order.
    Playing,
    /// All four cards are down; waiting to start settlement.
    Revealing,
    /// One seat's card is settled per step.
    Settling,
    /// All four settled; the win check runs next.
    RoundEnd,
    /// Terminal. A winner has been recorded.
    Finished,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Playing => "playing",
            Phase::Revealing => "revealing",
            Phase::Settling => "settling",
            Phase::RoundEnd => "round-end",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Identity of the player in a seat.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: String,
    pub name: String,
}

impl PlayerInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The recorded winner of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub index: Seat,
    pub name: String,
}

/// Full game state shared by all seats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    /// Player in each seat.
    pub players: SeatMap<PlayerInfo>,

    /// Remaining draw pile (top = back).
    pub deck: Vector<Card>,

    /// Cards held by each seat.
    pub hands: SeatMap<Vector<Card>>,

    /// This round's played card per seat.
    pub played: SeatMap<Option<PlayedCard>>,

    /// Running threshold, always within 1..=10.
    pub reference_point: u8,

    pub direction: Direction,

    /// First seat to play and to settle this round.
    pub start_seat: Seat,

    /// Seat to play while `Playing`.
    pub current_seat: Seat,

    /// Seat to settle while `Settling`.
    pub settle_seat: Seat,

    /// Round number (starts at 1).
    pub round: u32,

    pub phase: Phase,

    /// A flip was shown this round; direction reverses at the boundary.
    pub pending_flip: bool,

    /// Human-readable game log.
    pub log: Vector<String>,

    /// Set once the game is finished.
    pub winner: Option<Winner>,
}

impl RoundState {
    /// Create the state for round 1 from a dealt deck and hands.
    ///
    /// ## Defaults
    ///
    /// - `phase`: Playing
    /// - `start_seat`, `current_seat`, `settle_seat`: Seat 0
    /// - `reference_point`: 1
    /// - `direction`: counter-clockwise
    #[must_use]
    pub fn new(players: SeatMap<PlayerInfo>, deck: Vector<Card>, hands: SeatMap<Vector<Card>>) -> Self {
        let first = Seat::FIRST;
        Self {
            players,
            deck,
            hands,
            played: SeatMap::default(),
            reference_point: MIN_VALUE,
            direction: Direction::Ccw,
            start_seat: first,
            current_seat: first,
            settle_seat: first,
            round: 1,
            phase: Phase::Playing,
            pending_flip: false,
            log: Vector::new(),
            winner: None,
        }
    }

    /// Name of the player in a seat.
    #[must_use]
    pub fn name(&self, seat: Seat) -> &str {
        &self.players[seat].name
    }

    /// A seat's hand.
    #[must_use]
    pub fn hand(&self, seat: Seat) -> &Vector<Card> {
        &self.hands[seat]
    }

    /// Number of seats with a card down this round.
    #[must_use]
    pub fn played_count(&self) -> usize {
        self.played.values().filter(|p| p.is_some()).count()
    }

    /// Settlement order for the current round.
    #[must_use]
    pub fn settlement_order(&self) -> [Seat; SEAT_COUNT] {
        settlement_order(self.start_seat, self.direction)
    }

    /// Move the top card of the deck into a seat's hand.
    ///
    /// Returns the drawn card, or `None` if the deck is empty.
    pub fn draw(&mut self, seat: Seat) -> Option<Card> {
        let card = self.deck.pop_back()?;
        self.hands[seat].push_back(card);
        Some(card)
    }

    /// Cards still in play: deck, hands and the table.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        self.deck.len()
            + self.hands.values().map(Vector::len).sum::<usize>()
            + self.played_count()
    }

    /// Append a line to the game log.
    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push_back(line.into());
    }

    /// Drop the oldest log lines beyond `capacity`.
    pub fn trim_log(&mut self, capacity: usize) {
        if self.log.len() > capacity {
            self.log = self.log.skip(self.log.len() - capacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, Face};

    fn seat(i: u8) -> Seat {
        Seat::new(i).unwrap()
    }

    fn card(n: u8) -> Card {
        Card::new(Face::Number(n), Face::Number(n), Color::Red).unwrap()
    }

    fn players() -> SeatMap<PlayerInfo> {
        SeatMap::new(|s| PlayerInfo::new(format!("p{}", s.index()), format!("Player {}", s.index())))
    }

    #[test]
    fn test_new_state_defaults() {
        let state = RoundState::new(players(), Vector::new(), SeatMap::default());

        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.round, 1);
        assert_eq!(state.reference_point, 1);
        assert_eq!(state.direction, Direction::Ccw);
        assert_eq!(state.start_seat, seat(0));
        assert_eq!(state.current_seat, seat(0));
        assert_eq!(state.played_count(), 0);
        assert!(!state.pending_flip);
        assert_eq!(state.name(seat(2)), "Player 2");
    }

    #[test]
    fn test_draw_takes_from_top() {
        let deck: Vector<Card> = vec![card(1), card(2), card(3)].into();
        let mut state = RoundState::new(players(), deck, SeatMap::default());

        assert_eq!(state.draw(seat(1)), Some(card(3)));
        assert_eq!(state.hand(seat(1)).len(), 1);
        assert_eq!(state.deck.len(), 2);
        assert_eq!(state.cards_in_play(), 3);
    }

    #[test]
    fn test_draw_from_empty_deck() {
        let mut state = RoundState::new(players(), Vector::new(), SeatMap::default());
        assert_eq!(state.draw(seat(0)), None);
        assert!(state.hand(seat(0)).is_empty());
    }

    #[test]
    fn test_trim_log_keeps_newest() {
        let mut state = RoundState::new(players(), Vector::new(), SeatMap::default());
        for i in 0..5 {
            state.push_log(format!("line {i}"));
        }
        state.trim_log(2);

        let lines: Vec<_> = state.log.iter().cloned().collect();
        assert_eq!(lines, vec!["line 3", "line 4"]);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::RoundEnd.to_string(), "round-end");
        assert_eq!(serde_json::to_string(&Phase::RoundEnd).unwrap(), "\"round-end\"");
        let phase: Phase = serde_json::from_str("\"settling\"").unwrap();
        assert_eq!(phase, Phase::Settling);
    }
}
