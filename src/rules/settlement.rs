//! Settlement: one played card against the running reference point.
//!
//! Evaluated on the *hidden* face:
//! 1. `Skip` hidden: no draw, reference unchanged.
//! 2. Transform hidden: no draw, the transform is applied to the reference.
//! 3. Number hidden: the settle point is that number, transformed by the shown
//!    face if it is a transform. The seat draws one card if the settle point is
//!    below the reference, and the reference becomes the settle point either way.
//!
//! All transforms cap at 10.

use tracing::{debug, error};

use crate::cards::{Face, PlayedCard, Transform};
use crate::core::{IntegrityError, RoundState, Seat};
use crate::effects::{draw_one, DrawOutcome};

const LOG_TARGET: &str = "par_game::rules::settlement";

/// Outcome of comparing one played card with the reference point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// Hidden `Skip`: the seat is protected and the reference stays put.
    Skipped { reference: u8 },

    /// Hidden transform: the seat is protected and the reference is transformed.
    Shielded { transform: Transform, new_reference: u8 },

    /// Hidden number compared against the reference.
    Compared { settle_point: u8, need_draw: bool },
}

impl Settlement {
    /// Whether the seat was protected from drawing outright.
    #[must_use]
    pub fn skip_draw(&self) -> bool {
        !matches!(self, Settlement::Compared { .. })
    }

    /// Whether the seat must draw one card.
    #[must_use]
    pub fn need_draw(&self) -> bool {
        matches!(self, Settlement::Compared { need_draw: true, .. })
    }

    /// The compared value, if a number was hidden.
    #[must_use]
    pub fn settle_point(&self) -> Option<u8> {
        match self {
            Settlement::Compared { settle_point, .. } => Some(*settle_point),
            _ => None,
        }
    }

    /// The reference point after this settlement.
    #[must_use]
    pub fn new_reference(&self) -> u8 {
        match *self {
            Settlement::Skipped { reference } => reference,
            Settlement::Shielded { new_reference, .. } => new_reference,
            Settlement::Compared { settle_point, .. } => settle_point,
        }
    }

    /// Why no draw happened, for the game log.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        match self {
            Settlement::Skipped { .. } => {
                Some("Skip protection: no draw, reference unchanged".to_string())
            }
            Settlement::Shielded { transform, .. } => Some(format!(
                "{} protection: no draw",
                Face::Transform(*transform)
            )),
            Settlement::Compared { .. } => None,
        }
    }
}

/// Evaluate one played card against `reference_point`.
///
/// Pure; the state is not touched. A forced-draw or flip face can never be
/// hidden, so finding one there is reported as an integrity error.
///
/// ```
/// use par_game::cards::{Card, Color, Face, PlayedCard, Side, Transform};
/// use par_game::core::Seat;
/// use par_game::rules::calculate_settle;
///
/// let card = Card::new(Face::Number(7), Face::Transform(Transform::Double), Color::Red).unwrap();
/// let (played, _) = PlayedCard::commit(card, Side::Bottom, Seat::FIRST);
/// let settlement = calculate_settle(&played, 10).unwrap();
/// assert_eq!(settlement.settle_point(), Some(10));
/// assert!(!settlement.need_draw());
/// ```
pub fn calculate_settle(
    played: &PlayedCard,
    reference_point: u8,
) -> Result<Settlement, IntegrityError> {
    match played.hidden() {
        Face::Skip => Ok(Settlement::Skipped {
            reference: reference_point,
        }),
        Face::Transform(transform) => Ok(Settlement::Shielded {
            transform,
            new_reference: transform.apply(reference_point),
        }),
        Face::Number(value) => {
            let settle_point = match played.shown() {
                Face::Transform(transform) => transform.apply(value),
                Face::Number(_) | Face::Skip | Face::ForcedDraw | Face::Flip => value,
            };
            Ok(Settlement::Compared {
                settle_point,
                need_draw: settle_point < reference_point,
            })
        }
        face @ (Face::ForcedDraw | Face::Flip) => {
            error!(target: LOG_TARGET, seat = %played.seat(), %face, "action face hidden");
            Err(IntegrityError::HiddenActionFace {
                seat: played.seat(),
                face,
            })
        }
    }
}

/// Fold a settlement into the state: the settling seat's draw and the new reference.
///
/// Returns the draw outcome if the seat was required to draw.
pub fn apply_settlement(
    state: &mut RoundState,
    seat: Seat,
    played: &PlayedCard,
    settlement: &Settlement,
) -> Option<DrawOutcome> {
    let before = state.reference_point;
    state.push_log(format!(
        "{} hides {} | reference {}",
        state.name(seat),
        played.hidden(),
        before
    ));

    let draw = match settlement {
        Settlement::Compared {
            settle_point,
            need_draw: true,
        } => {
            state.push_log(format!("settle {settle_point} < reference {before}: draw 1"));
            Some(draw_one(state, seat, "settlement"))
        }
        Settlement::Compared { settle_point, .. } => {
            state.push_log(format!("settle {settle_point} >= reference {before}: no draw"));
            None
        }
        protected => {
            if let Some(reason) = protected.reason() {
                state.push_log(reason);
            }
            None
        }
    };

    state.reference_point = settlement.new_reference();
    if state.reference_point != before {
        state.push_log(format!("reference {} -> {}", before, state.reference_point));
    }
    debug!(
        target: LOG_TARGET,
        %seat,
        ?settlement,
        reference = state.reference_point,
        "settled"
    );
    draw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Color, Side};
    use crate::core::{PlayerInfo, SeatMap};
    use im::Vector;

    fn seat(i: u8) -> Seat {
        Seat::new(i).unwrap()
    }

    /// Played card with `shown` on top and `hidden` on the bottom.
    fn played(shown: Face, hidden: Face) -> PlayedCard {
        let card = Card::new(shown, hidden, Color::Blue).unwrap();
        PlayedCard::commit(card, Side::Top, seat(0)).0
    }

    /// Played card with `hidden` on top (for tags that only live on bottoms).
    fn played_showing_bottom(shown: Face, hidden: Face) -> PlayedCard {
        let card = Card::new(hidden, shown, Color::Blue).unwrap();
        PlayedCard::commit(card, Side::Bottom, seat(0)).0
    }

    #[test]
    fn test_hidden_skip_never_draws() {
        for reference in 1..=10 {
            for shown in [Face::Number(1), Face::Number(8)] {
                let s = calculate_settle(&played(shown, Face::Skip), reference).unwrap();
                assert!(s.skip_draw());
                assert!(!s.need_draw());
                assert_eq!(s.new_reference(), reference);
            }
        }
    }

    #[test]
    fn test_hidden_transform_moves_reference() {
        let plus_two = played(Face::Number(3), Face::Transform(Transform::PlusTwo));
        let s = calculate_settle(&plus_two, 9).unwrap();
        assert!(s.skip_draw());
        assert_eq!(s.new_reference(), 10);

        let plus_one = played(Face::Number(6), Face::Transform(Transform::PlusOne));
        assert_eq!(calculate_settle(&plus_one, 10).unwrap().new_reference(), 10);
        assert_eq!(calculate_settle(&plus_one, 4).unwrap().new_reference(), 5);

        let double = played(Face::Number(2), Face::Transform(Transform::Double));
        assert_eq!(calculate_settle(&double, 3).unwrap().new_reference(), 6);
        assert_eq!(calculate_settle(&double, 6).unwrap().new_reference(), 10);
    }

    #[test]
    fn test_shown_transform_applies_to_settle_point() {
        let card = played_showing_bottom(Face::Transform(Transform::Double), Face::Number(7));
        let s = calculate_settle(&card, 10).unwrap();

        assert_eq!(s.settle_point(), Some(10));
        assert!(!s.need_draw());
        assert_eq!(s.new_reference(), 10);

        let card = played_showing_bottom(Face::Transform(Transform::PlusOne), Face::Number(5));
        let s = calculate_settle(&card, 7).unwrap();
        assert_eq!(s.settle_point(), Some(6));
        assert!(s.need_draw());
    }

    #[test]
    fn test_plain_numbers_compare() {
        let s = calculate_settle(&played(Face::Number(5), Face::Number(3)), 5).unwrap();
        assert_eq!(s.settle_point(), Some(3));
        assert!(s.need_draw());
        assert_eq!(s.new_reference(), 3);

        let s = calculate_settle(&played(Face::Number(1), Face::Number(5)), 5).unwrap();
        assert!(!s.need_draw());
    }

    #[test]
    fn test_shown_skip_or_action_settles_hidden_number() {
        let skip_shown = played_showing_bottom(Face::Skip, Face::Number(6));
        assert_eq!(calculate_settle(&skip_shown, 2).unwrap().settle_point(), Some(6));

        let draw_shown = played_showing_bottom(Face::ForcedDraw, Face::Number(2));
        let s = calculate_settle(&draw_shown, 4).unwrap();
        assert_eq!(s.settle_point(), Some(2));
        assert!(s.need_draw());
    }

    #[test]
    fn test_apply_draws_and_updates_reference() {
        let players = SeatMap::new(|s| PlayerInfo::new(s.index().to_string(), "P"));
        let deck: Vector<Card> = vec![Card::new(Face::Number(9), Face::Number(9), Color::Red).unwrap()].into();
        let mut state = RoundState::new(players, deck, SeatMap::default());
        state.reference_point = 5;

        let card = played(Face::Number(5), Face::Number(3));
        let settlement = calculate_settle(&card, 5).unwrap();
        let draw = apply_settlement(&mut state, seat(0), &card, &settlement);

        assert!(matches!(draw, Some(DrawOutcome::Drew(_))));
        assert_eq!(state.hand(seat(0)).len(), 1);
        assert_eq!(state.reference_point, 3);

        // deck now empty: the next required draw is skipped
        let draw = apply_settlement(&mut state, seat(0), &card, &Settlement::Compared {
            settle_point: 1,
            need_draw: true,
        });
        assert_eq!(draw, Some(DrawOutcome::DeckEmpty));
        assert_eq!(state.reference_point, 1);
    }
}
