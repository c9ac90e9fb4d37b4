//! Win detection.
//!
//! Runs only at round end, after all four settlements and their draws. The
//! first seat in index order with an empty hand wins.

use crate::core::{RoundState, Seat};

/// The winning seat, if any seat has emptied its hand.
///
/// Ties go to the lowest seat index.
#[must_use]
pub fn check_winner(state: &RoundState) -> Option<Seat> {
    state
        .hands
        .iter()
        .find(|(_, hand)| hand.is_empty())
        .map(|(seat, _)| seat)
}
