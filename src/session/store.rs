//! Document storage with single-writer arbitration.
//!
//! Every room document carries a revision. `transact` runs a closure against
//! the current document under exclusive access; a committed update bumps the
//! revision, an aborted or failed one writes nothing.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::EngineError;
use crate::document::{DocumentError, Room};

const LOG_TARGET: &str = "par_game::session::store";

/// A failed store operation. Nothing was written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("room {0} does not exist")]
    NoSuchRoom(String),

    #[error("room {0} already exists")]
    RoomExists(String),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// A room document at a specific revision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Versioned {
    pub revision: u64,
    pub room: Room,
}

/// What a transaction decided to do with the document.
#[derive(Debug)]
pub enum Update<T> {
    /// Write this room as the next revision.
    Commit(Room, T),
    /// Leave the document as it is.
    Abort(T),
}

/// Outcome of a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transacted<T> {
    /// Revision after the transaction.
    pub revision: u64,
    pub committed: bool,
    pub value: T,
}

/// Shared storage for room documents.
pub trait DocumentStore {
    /// Read a room at its current revision.
    fn read(&self, room_id: &str) -> Result<Option<Versioned>, StoreError>;

    /// Store a new room at revision 1. Fails if the id is taken.
    fn create(&self, room_id: &str, room: Room) -> Result<Versioned, StoreError>;

    /// Run `f` on the current document with no other writer in between.
    fn transact<T, F>(&self, room_id: &str, f: F) -> Result<Transacted<T>, StoreError>
    where
        F: FnOnce(&Versioned) -> Result<Update<T>, StoreError>;
}

#[derive(Debug)]
struct Stored {
    revision: u64,
    json: String,
}

impl Stored {
    fn load(&self) -> Result<Versioned, StoreError> {
        Ok(Versioned {
            revision: self.revision,
            room: Room::from_json(&self.json)?,
        })
    }
}

/// In-process store keeping each room as a serialized JSON document.
///
/// Clones share the same rooms.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    rooms: Arc<RwLock<FxHashMap<String, Stored>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rooms held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.read().is_empty()
    }

    /// Drop a room. Returns whether it existed.
    pub fn remove(&self, room_id: &str) -> bool {
        self.rooms.write().remove(room_id).is_some()
    }
}

impl DocumentStore for InMemoryStore {
    fn read(&self, room_id: &str) -> Result<Option<Versioned>, StoreError> {
        self.rooms.read().get(room_id).map(Stored::load).transpose()
    }

    fn create(&self, room_id: &str, room: Room) -> Result<Versioned, StoreError> {
        let mut rooms = self.rooms.write();
        if rooms.contains_key(room_id) {
            return Err(StoreError::RoomExists(room_id.to_string()));
        }
        let json = room.to_json()?;
        rooms.insert(room_id.to_string(), Stored { revision: 1, json });
        debug!(target: LOG_TARGET, room_id, "room created");
        Ok(Versioned { revision: 1, room })
    }

    fn transact<T, F>(&self, room_id: &str, f: F) -> Result<Transacted<T>, StoreError>
    where
        F: FnOnce(&Versioned) -> Result<Update<T>, StoreError>,
    {
        let mut rooms = self.rooms.write();
        let stored = rooms
            .get_mut(room_id)
            .ok_or_else(|| StoreError::NoSuchRoom(room_id.to_string()))?;
        let current = stored.load()?;

        match f(&current)? {
            Update::Commit(room, value) => {
                stored.json = room.to_json()?;
                stored.revision += 1;
                trace!(target: LOG_TARGET, room_id, revision = stored.revision, "committed");
                Ok(Transacted {
                    revision: stored.revision,
                    committed: true,
                    value,
                })
            }
            Update::Abort(value) => Ok(Transacted {
                revision: current.revision,
                committed: false,
                value,
            }),
        }
    }
}
