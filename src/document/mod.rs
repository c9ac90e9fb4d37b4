//! The shared document exchanged with the storage layer.
//!
//! - `Room`: lobby membership, status and the game in progress
//! - `RoundDocument`: the wire form of `RoundState`, and its validation

mod room;
mod round;

pub use room::{Room, RoomStatus, SeatEntry};
pub use round::RoundDocument;

use thiserror::Error;

use crate::core::{EngineError, IntegrityError};

/// A document could not be read, validated or updated.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("room has {0} players, a game needs 4")]
    Seating(usize),

    #[error("room seat indices are not 0 through 3")]
    SeatIndices,

    #[error("room is full")]
    RoomFull,

    #[error("room is {0}, not waiting")]
    NotWaiting(RoomStatus),

    #[error("only the host can {0}")]
    NotHost(&'static str),

    #[error("player {0} is not in the room")]
    UnknownPlayer(String),

    #[error("room has no game")]
    NoGame,
}
