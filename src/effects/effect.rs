//! Effect definitions.
//!
//! Only the *shown* face of a settled card carries an effect:
//! - `ForcedDraw`: the previous and next seats in settlement order draw one card each
//! - `Flip`: direction reverses at the next round boundary
//!
//! Every other shown face has no effect.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, Face, PlayedCard};
use crate::core::{Seat, SEAT_COUNT};

/// The effect of a settled card's shown face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShownEffect {
    /// The shown face does nothing.
    NoEffect,

    /// Both neighbours in settlement order draw, previous seat first.
    ForcedDraw { previous: Seat, next: Seat },

    /// Direction reverses at the next `round-end -> playing` transition.
    Flip,
}

impl ShownEffect {
    /// Determine the effect of `played` given this round's settlement order.
    #[must_use]
    pub fn of(played: &PlayedCard, order: &[Seat; SEAT_COUNT]) -> Self {
        match played.shown() {
            Face::ForcedDraw => {
                let pos = order
                    .iter()
                    .position(|&s| s == played.seat())
                    .unwrap_or_default();
                ShownEffect::ForcedDraw {
                    previous: order[(pos + SEAT_COUNT - 1) % SEAT_COUNT],
                    next: order[(pos + 1) % SEAT_COUNT],
                }
            }
            Face::Flip => ShownEffect::Flip,
            Face::Number(_) | Face::Transform(_) | Face::Skip => ShownEffect::NoEffect,
        }
    }
}

/// Result of one attempted draw from the deck top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOutcome {
    /// The seat took this card.
    Drew(Card),
    /// The deck was empty; the draw was skipped.
    DeckEmpty,
}

impl DrawOutcome {
    #[must_use]
    pub fn drew(&self) -> bool {
        matches!(self, DrawOutcome::Drew(_))
    }
}

/// What resolving a shown face did to the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectReport {
    pub effect: ShownEffect,
    /// Draws in the order they happened.
    pub draws: SmallVec<[(Seat, DrawOutcome); 2]>,
}

impl EffectReport {
    /// Number of cards that actually left the deck.
    #[must_use]
    pub fn cards_drawn(&self) -> usize {
        self.draws.iter().filter(|(_, d)| d.drew()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, Side};
    use crate::core::{settlement_order, Direction};

    fn seat(i: u8) -> Seat {
        Seat::new(i).unwrap()
    }

    fn played(top: Face, bottom: Face, side: Side, by: Seat) -> PlayedCard {
        PlayedCard::commit(Card::new(top, bottom, Color::Red).unwrap(), side, by).0
    }

    #[test]
    fn test_forced_draw_neighbours_follow_settlement_order() {
        let order = settlement_order(seat(1), Direction::Ccw); // 1, 2, 3, 0
        let card = played(Face::Number(3), Face::ForcedDraw, Side::Bottom, seat(1));

        assert_eq!(
            ShownEffect::of(&card, &order),
            ShownEffect::ForcedDraw {
                previous: seat(0),
                next: seat(2)
            }
        );

        let order = settlement_order(seat(1), Direction::Cw); // 1, 0, 3, 2
        let card = played(Face::Number(3), Face::ForcedDraw, Side::Bottom, seat(3));
        assert_eq!(
            ShownEffect::of(&card, &order),
            ShownEffect::ForcedDraw {
                previous: seat(0),
                next: seat(2)
            }
        );
    }

    #[test]
    fn test_flip_and_plain_faces() {
        let order = settlement_order(seat(0), Direction::Ccw);

        let flip = played(Face::Number(5), Face::Flip, Side::Top, seat(0));
        assert_eq!(ShownEffect::of(&flip, &order), ShownEffect::Flip);

        let skip_shown = played(Face::Number(5), Face::Skip, Side::Bottom, seat(0));
        assert_eq!(ShownEffect::of(&skip_shown, &order), ShownEffect::NoEffect);

        let number = played(Face::Number(5), Face::Number(7), Side::Top, seat(0));
        assert_eq!(ShownEffect::of(&number, &order), ShownEffect::NoEffect);
    }
}
