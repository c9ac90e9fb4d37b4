//! Card system: faces, cards, the catalog and the shuffler.
//!
//! ## Key Types
//!
//! - `Face`: a number or a function tag, dispatched by exhaustive matching
//! - `Card`: an immutable two-faced card
//! - `PlayedCard`: a card committed with one face shown and one hidden
//! - `build_catalog`: the fixed 108-card catalog
//! - `shuffle`: Fisher–Yates over any sequence

pub mod card;
pub mod catalog;
pub mod shuffle;

pub use card::{Card, CardKind, Color, Face, PlayedCard, Side, Transform, MAX_VALUE, MIN_VALUE};
pub use catalog::{build_catalog, CATALOG_SIZE};
pub use shuffle::shuffle;
