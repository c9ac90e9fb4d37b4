//! Per-session context: one room, one store, one engine.
//!
//! Every operation is a single store transaction. The round state is read
//! from the document, changed on a private copy and written back only if the
//! engine accepted the change.
//!
//! ## Duplicate triggers
//!
//! System-driven advances are keyed on the revision the caller observed.
//! Several observers may race to advance the same revision; the first one
//! commits and the rest find a newer revision and do nothing.

use tracing::{debug, info};

use crate::cards::Side;
use crate::core::{RoundState, Seat};
use crate::document::{DocumentError, Room};
use crate::rules::{Advance, GameEngine, PlayReport};

use super::store::{DocumentStore, StoreError, Transacted, Update, Versioned};

const LOG_TARGET: &str = "par_game::session";

/// A game session bound to one room in a store.
#[derive(Clone, Debug)]
pub struct GameSession<S> {
    store: S,
    engine: GameEngine,
    room_id: String,
}

impl<S: DocumentStore> GameSession<S> {
    pub fn new(store: S, engine: GameEngine, room_id: impl Into<String>) -> Self {
        Self {
            store,
            engine,
            room_id: room_id.into(),
        }
    }

    #[must_use]
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    #[must_use]
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open the room with its host.
    pub fn create(&self, host_id: &str, host_name: &str) -> Result<Versioned, StoreError> {
        self.store.create(&self.room_id, Room::new(host_id, host_name))
    }

    /// Seat a player in the lobby, returning their seat index.
    pub fn join(&self, id: &str, name: &str) -> Result<usize, StoreError> {
        let done = self.store.transact(&self.room_id, |current| {
            if let Some(entry) = current.room.players.get(id) {
                return Ok(Update::Abort(entry.index));
            }
            let mut room = current.room.clone();
            let index = room.join(id, name)?;
            Ok(Update::Commit(room, index))
        })?;
        Ok(done.value)
    }

    /// Remove a player from the lobby.
    pub fn leave(&self, id: &str) -> Result<(), StoreError> {
        self.commit(|room| Ok(room.leave(id)?))?;
        Ok(())
    }

    /// Deal the game. Only the host may start it.
    pub fn start(&self, requester: &str) -> Result<RoundState, StoreError> {
        let engine = &self.engine;
        let done = self.commit(|room| {
            if !room.is_host(requester) {
                return Err(DocumentError::NotHost("start the game").into());
            }
            Ok(room.start_game(engine)?)
        })?;
        info!(target: LOG_TARGET, room_id = %self.room_id, revision = done.revision, "session started");
        Ok(done.value)
    }

    /// Play a card for `seat`.
    pub fn play_card(&self, seat: Seat, card_index: usize, side: Side) -> Result<PlayReport, StoreError> {
        let engine = &self.engine;
        let done = self.commit(|room| {
            let mut state = room.game_state()?;
            let report = engine.play_card(&mut state, seat, card_index, side)?;
            room.store_game(&state);
            Ok(report)
        })?;
        Ok(done.value)
    }

    /// Advance the game one system step, if the document is still at
    /// `observed_revision`.
    ///
    /// Returns the transition applied, or `None` if the revision is stale or
    /// there is nothing to advance.
    pub fn attempt_advance(&self, observed_revision: u64) -> Result<Option<Advance>, StoreError> {
        let engine = &self.engine;
        let done = self.store.transact(&self.room_id, |current| {
            if current.revision != observed_revision {
                debug!(
                    target: LOG_TARGET,
                    observed = observed_revision,
                    current = current.revision,
                    "stale advance ignored"
                );
                return Ok(Update::Abort(None));
            }
            let mut room = current.room.clone();
            let mut state = room.game_state()?;
            match engine.advance_phase(&mut state)? {
                Advance::Idle { .. } => Ok(Update::Abort(None)),
                advance => {
                    room.store_game(&state);
                    Ok(Update::Commit(room, Some(advance)))
                }
            }
        })?;
        Ok(done.value)
    }

    /// Drive system steps until a seat has to act or the game is finished.
    pub fn run_system_phases(&self) -> Result<Vec<Advance>, StoreError> {
        let mut steps = Vec::new();
        loop {
            let snapshot = self.snapshot()?;
            if let Some(advance) = self.attempt_advance(snapshot.revision)? {
                steps.push(advance);
                continue;
            }
            // None is either idle or a lost race; only retry the race.
            if self.snapshot()?.revision == snapshot.revision {
                return Ok(steps);
            }
        }
    }

    /// The room at its current revision.
    pub fn snapshot(&self) -> Result<Versioned, StoreError> {
        self.store
            .read(&self.room_id)?
            .ok_or_else(|| StoreError::NoSuchRoom(self.room_id.clone()))
    }

    /// The current validated game state.
    pub fn state(&self) -> Result<RoundState, StoreError> {
        Ok(self.snapshot()?.room.game_state()?)
    }

    fn commit<T>(
        &self,
        f: impl FnOnce(&mut Room) -> Result<T, StoreError>,
    ) -> Result<Transacted<T>, StoreError> {
        self.store.transact(&self.room_id, |current| {
            let mut room = current.room.clone();
            let value = f(&mut room)?;
            Ok(Update::Commit(room, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Phase};
    use crate::session::InMemoryStore;

    fn seat(i: u8) -> Seat {
        Seat::new(i).unwrap()
    }

    fn started() -> GameSession<InMemoryStore> {
        let engine = GameEngine::new(GameConfig::default().with_seed(11)).unwrap();
        let session = GameSession::new(InMemoryStore::new(), engine, "ROOM");
        session.create("h", "Host").unwrap();
        for (id, name) in [("b", "Bea"), ("c", "Cy"), ("d", "Di")] {
            session.join(id, name).unwrap();
        }
        session.start("h").unwrap();
        session
    }

    #[test]
    fn test_only_host_starts() {
        let session = GameSession::new(InMemoryStore::new(), GameEngine::default(), "ROOM");
        session.create("h", "Host").unwrap();
        for id in ["b", "c", "d"] {
            session.join(id, id).unwrap();
        }

        let err = session.start("b").unwrap_err();
        assert!(matches!(err, StoreError::Document(DocumentError::NotHost(_))));
        assert_eq!(session.snapshot().unwrap().revision, 4);
    }

    #[test]
    fn test_rejected_play_writes_nothing() {
        let session = started();
        let before = session.snapshot().unwrap();

        let err = session.play_card(seat(2), 0, Side::Top).unwrap_err();

        assert!(matches!(err, StoreError::Engine(_)));
        assert_eq!(session.snapshot().unwrap(), before);
    }

    #[test]
    fn test_stale_advance_is_noop() {
        let session = started();
        for s in 0..4 {
            session.play_card(seat(s), 0, Side::Top).unwrap();
        }
        let observed = session.snapshot().unwrap().revision;

        let first = session.attempt_advance(observed).unwrap();
        let second = session.attempt_advance(observed).unwrap();

        assert_eq!(first, Some(Advance::Revealed));
        assert_eq!(second, None);
        assert_eq!(session.state().unwrap().phase, Phase::Settling);
        assert_eq!(session.snapshot().unwrap().revision, observed + 1);
    }

    #[test]
    fn test_advance_while_playing_is_noop() {
        let session = started();
        let revision = session.snapshot().unwrap().revision;
        assert_eq!(session.attempt_advance(revision).unwrap(), None);
        assert_eq!(session.snapshot().unwrap().revision, revision);
    }

    #[test]
    fn test_run_system_phases_finishes_round() {
        let session = started();
        for s in 0..4 {
            session.play_card(seat(s), 0, Side::Top).unwrap();
        }

        let steps = session.run_system_phases().unwrap();

        // reveal, four settlements, round end
        assert_eq!(steps.len(), 6);
        let state = session.state().unwrap();
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.round, 2);
        assert_eq!(state.current_seat, seat(1));
    }
}
