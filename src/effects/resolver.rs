//! Effect resolution - applying a shown face to the round state.
//!
//! Runs once per settled card, after the reference-point comparison. Both
//! may draw for the same settlement; the two are independent.

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::cards::PlayedCard;
use crate::core::{RoundState, Seat};

use super::{DrawOutcome, EffectReport, ShownEffect};

const LOG_TARGET: &str = "par_game::effects::resolver";

/// Resolves shown-face effects on the round state.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply the effect of `played`'s shown face.
    ///
    /// Forced draws are taken one at a time from the deck top, previous seat
    /// first, each skipped independently if the deck has run out. A flip only
    /// raises `pending_flip`; the direction itself changes at round end.
    pub fn resolve(state: &mut RoundState, played: &PlayedCard) -> EffectReport {
        let effect = ShownEffect::of(played, &state.settlement_order());
        let mut draws = SmallVec::new();

        match effect {
            ShownEffect::NoEffect => {}
            ShownEffect::ForcedDraw { previous, next } => {
                state.push_log(format!("{} shows +1: neighbours draw", state.name(played.seat())));
                for (seat, role) in [(previous, "previous"), (next, "next")] {
                    let outcome = draw_one(state, seat, role);
                    draws.push((seat, outcome));
                }
            }
            ShownEffect::Flip => {
                state.pending_flip = true;
                state.push_log(format!(
                    "{} shows a flip: direction changes next round",
                    state.name(played.seat())
                ));
                debug!(target: LOG_TARGET, seat = %played.seat(), "flip pending");
            }
        }

        EffectReport { effect, draws }
    }
}

/// Draw one card for `seat`, logging the outcome.
///
/// An empty deck is not an error: the draw is skipped and the game continues.
pub(crate) fn draw_one(state: &mut RoundState, seat: Seat, reason: &str) -> DrawOutcome {
    match state.draw(seat) {
        Some(card) => {
            state.push_log(format!(
                "{} ({reason}) draws 1, {} left in deck",
                state.name(seat),
                state.deck.len()
            ));
            debug!(target: LOG_TARGET, %seat, reason, %card, "drew card");
            DrawOutcome::Drew(card)
        }
        None => {
            state.push_log(format!("{} ({reason}) cannot draw: deck is empty", state.name(seat)));
            warn!(target: LOG_TARGET, %seat, reason, "deck empty, draw skipped");
            DrawOutcome::DeckEmpty
        }
    }
}
