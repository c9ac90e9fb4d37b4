//! The room document: lobby membership, status and the game in progress.
//!
//! A room collects four players while `waiting`, becomes `playing` when the
//! host starts the game and `finished` once the game records a winner.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{PlayerInfo, RoundState, SeatMap, SEAT_COUNT};
use crate::rules::GameEngine;

use super::{DocumentError, RoundDocument};

const LOG_TARGET: &str = "par_game::document::room";

/// Lifecycle of a room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Waiting,
    Playing,
    Finished,
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomStatus::Waiting => f.write_str("waiting"),
            RoomStatus::Playing => f.write_str("playing"),
            RoomStatus::Finished => f.write_str("finished"),
        }
    }
}

/// A player's entry in the lobby.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatEntry {
    pub name: String,
    /// Seat the player will take when the game starts.
    pub index: usize,
}

/// The shared room document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub host_seat_id: String,
    #[serde(default)]
    pub players: FxHashMap<String, SeatEntry>,
    #[serde(default)]
    pub status: RoomStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<RoundDocument>,
}

impl Room {
    /// Open a room with the host in seat 0.
    pub fn new(host_id: impl Into<String>, host_name: impl Into<String>) -> Self {
        let host_id = host_id.into();
        let mut players = FxHashMap::default();
        players.insert(
            host_id.clone(),
            SeatEntry {
                name: host_name.into(),
                index: 0,
            },
        );
        Self {
            host_seat_id: host_id,
            players,
            status: RoomStatus::Waiting,
            game: None,
        }
    }

    /// Parse a room from JSON.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the room to JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn is_host(&self, id: &str) -> bool {
        self.host_seat_id == id
    }

    /// Four players are seated and the game has not started.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.status == RoomStatus::Waiting && self.players.len() == SEAT_COUNT
    }

    /// Seat a player, returning their seat index.
    ///
    /// Joining again with the same id returns the existing seat.
    pub fn join(&mut self, id: impl Into<String>, name: impl Into<String>) -> Result<usize, DocumentError> {
        let id = id.into();
        if let Some(entry) = self.players.get(&id) {
            return Ok(entry.index);
        }
        if self.status != RoomStatus::Waiting {
            return Err(DocumentError::NotWaiting(self.status));
        }
        let index = (0..SEAT_COUNT)
            .find(|i| self.players.values().all(|p| p.index != *i))
            .ok_or(DocumentError::RoomFull)?;

        debug!(target: LOG_TARGET, %id, index, "player joined");
        self.players.insert(
            id,
            SeatEntry {
                name: name.into(),
                index,
            },
        );
        Ok(index)
    }

    /// Remove a player from the lobby.
    ///
    /// If the host leaves, the remaining player with the lowest seat index
    /// becomes host.
    pub fn leave(&mut self, id: &str) -> Result<(), DocumentError> {
        if self.status != RoomStatus::Waiting {
            return Err(DocumentError::NotWaiting(self.status));
        }
        if self.players.remove(id).is_none() {
            return Err(DocumentError::UnknownPlayer(id.to_string()));
        }
        if self.is_host(id) {
            if let Some((next, _)) = self.players.iter().min_by_key(|(_, p)| p.index) {
                self.host_seat_id = next.clone();
            }
        }
        debug!(target: LOG_TARGET, %id, remaining = self.players.len(), "player left");
        Ok(())
    }

    /// The four players ordered by seat index.
    pub fn seating(&self) -> Result<SeatMap<PlayerInfo>, DocumentError> {
        if self.players.len() != SEAT_COUNT {
            return Err(DocumentError::Seating(self.players.len()));
        }
        let mut seated: Vec<_> = self.players.iter().collect();
        seated.sort_by_key(|(_, entry)| entry.index);

        for (expected, (_, entry)) in seated.iter().enumerate() {
            if entry.index != expected {
                return Err(DocumentError::SeatIndices);
            }
        }

        let players: Vec<PlayerInfo> = seated
            .into_iter()
            .map(|(id, entry)| PlayerInfo::new(id.clone(), entry.name.clone()))
            .collect();
        let players: [PlayerInfo; SEAT_COUNT] = players
            .try_into()
            .map_err(|_| DocumentError::Seating(SEAT_COUNT))?;
        Ok(SeatMap::from_array(players))
    }

    /// Deal a new game and mark the room as playing.
    pub fn start_game(&mut self, engine: &GameEngine) -> Result<RoundState, DocumentError> {
        if self.status != RoomStatus::Waiting {
            return Err(DocumentError::NotWaiting(self.status));
        }
        let state = engine.deal_new_game(self.seating()?)?;
        self.game = Some(RoundDocument::from(&state));
        self.status = RoomStatus::Playing;
        info!(target: LOG_TARGET, host = %self.host_seat_id, "game started");
        Ok(state)
    }

    /// The validated game state.
    pub fn game_state(&self) -> Result<RoundState, DocumentError> {
        let doc = self.game.clone().ok_or(DocumentError::NoGame)?;
        Ok(RoundState::try_from(doc)?)
    }

    /// Write a new game state back into the room.
    pub fn store_game(&mut self, state: &RoundState) {
        self.game = Some(RoundDocument::from(state));
        self.sync_status();
    }

    /// Mark the room finished once its game has a winner.
    pub fn sync_status(&mut self) {
        let finished = self.game.as_ref().is_some_and(|g| g.winner.is_some());
        if finished && self.status != RoomStatus::Finished {
            self.status = RoomStatus::Finished;
            info!(target: LOG_TARGET, host = %self.host_seat_id, "room finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Phase, Seat, Winner};

    fn full_room() -> Room {
        let mut room = Room::new("h", "Host");
        room.join("b", "Bea").unwrap();
        room.join("c", "Cy").unwrap();
        room.join("d", "Di").unwrap();
        room
    }

    #[test]
    fn test_join_assigns_free_seats() {
        let mut room = Room::new("h", "Host");
        assert_eq!(room.join("b", "Bea").unwrap(), 1);
        assert_eq!(room.join("c", "Cy").unwrap(), 2);
        assert_eq!(room.join("b", "Bea").unwrap(), 1);

        room.leave("b").unwrap();
        assert_eq!(room.join("e", "Ed").unwrap(), 1);
    }

    #[test]
    fn test_room_full() {
        let mut room = full_room();
        assert!(room.can_start());
        assert!(matches!(room.join("x", "X"), Err(DocumentError::RoomFull)));
    }

    #[test]
    fn test_host_leaving_passes_host() {
        let mut room = full_room();
        room.leave("h").unwrap();
        assert_eq!(room.host_seat_id, "b");
        assert!(!room.can_start());
    }

    #[test]
    fn test_seating_orders_by_index() {
        let seating = full_room().seating().unwrap();
        let names: Vec<_> = seating.values().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Host", "Bea", "Cy", "Di"]);
        assert_eq!(seating[Seat::new(2).unwrap()].id, "c");
    }

    #[test]
    fn test_seating_needs_four() {
        let room = Room::new("h", "Host");
        assert!(matches!(room.seating(), Err(DocumentError::Seating(1))));
    }

    #[test]
    fn test_start_game() {
        let mut room = full_room();
        let engine = GameEngine::new(GameConfig::default().with_seed(3)).unwrap();

        let state = room.start_game(&engine).unwrap();

        assert_eq!(room.status, RoomStatus::Playing);
        assert_eq!(room.game_state().unwrap(), state);
        assert!(matches!(room.start_game(&engine), Err(DocumentError::NotWaiting(RoomStatus::Playing))));
        assert!(matches!(room.join("x", "X"), Err(DocumentError::NotWaiting(_))));
    }

    #[test]
    fn test_status_follows_winner() {
        let mut room = full_room();
        let mut state = room.start_game(&GameEngine::default()).unwrap();

        room.store_game(&state);
        assert_eq!(room.status, RoomStatus::Playing);

        state.phase = Phase::Finished;
        state.winner = Some(Winner {
            index: Seat::FIRST,
            name: "Host".into(),
        });
        room.store_game(&state);
        assert_eq!(room.status, RoomStatus::Finished);
    }

    #[test]
    fn test_room_json() {
        let room = full_room();
        let json = room.to_json().unwrap();
        assert!(json.contains("\"hostSeatId\":\"h\""));
        assert!(json.contains("\"status\":\"waiting\""));
        assert!(!json.contains("\"game\""));
        assert_eq!(Room::from_json(&json).unwrap(), room);
    }
}
