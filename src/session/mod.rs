//! Sessions and document storage.
//!
//! - `DocumentStore`: revisioned, transactional access to room documents
//! - `InMemoryStore`: in-process store behind a `parking_lot` lock
//! - `GameSession`: the context every game operation runs through

mod game;
mod store;

pub use game::GameSession;
pub use store::{DocumentStore, InMemoryStore, StoreError, Transacted, Update, Versioned};
