//! Cards, faces and played cards.
//!
//! Every card has two faces. A face is either a number (1..=10) or one of the
//! function tags. When a seat plays a card it commits to showing one face and
//! hiding the other.
//!
//! On the wire a face is a bare number or one of the tags `"x+1"`, `"x+2"`,
//! `"x*2"`, `"Skip"`, `"+1"` (forced draw) and `"⇌"` (flip).

use serde::{Deserialize, Serialize};

use crate::core::error::IntegrityError;
use crate::core::Seat;

/// Lowest numeric face and reference point.
pub const MIN_VALUE: u8 = 1;
/// Highest numeric face and reference point.
pub const MAX_VALUE: u8 = 10;

/// A value transform printed on a function card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transform {
    /// `x+1`
    PlusOne,
    /// `x+2`
    PlusTwo,
    /// `x*2`
    Double,
}

impl Transform {
    /// Apply the transform, capping the result at [`MAX_VALUE`].
    #[must_use]
    pub fn apply(self, value: u8) -> u8 {
        let raw = match self {
            Transform::PlusOne => value.saturating_add(1),
            Transform::PlusTwo => value.saturating_add(2),
            Transform::Double => value.saturating_mul(2),
        };
        raw.min(MAX_VALUE)
    }

    fn tag(self) -> &'static str {
        match self {
            Transform::PlusOne => "x+1",
            Transform::PlusTwo => "x+2",
            Transform::Double => "x*2",
        }
    }
}

/// One face of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FaceRepr", into = "FaceRepr")]
pub enum Face {
    /// A plain value, 1..=10.
    Number(u8),
    /// Modifies a value instead of being one.
    Transform(Transform),
    /// Protects the seat from drawing when hidden.
    Skip,
    /// Neighbours in settlement order draw one card each. Always shown.
    ForcedDraw,
    /// Reverses direction from the next round on. Always shown.
    Flip,
}

impl Face {
    /// Faces that may never be hidden.
    #[must_use]
    pub fn must_be_shown(self) -> bool {
        matches!(self, Face::ForcedDraw | Face::Flip)
    }

    /// Faces that may only be printed on a card's bottom.
    #[must_use]
    pub fn bottom_only(self) -> bool {
        matches!(self, Face::Transform(_) | Face::Skip)
    }

    /// The numeric value, if this is a number face.
    #[must_use]
    pub fn value(self) -> Option<u8> {
        match self {
            Face::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The wire tag for this face, `None` for numbers.
    #[must_use]
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Face::Number(_) => None,
            Face::Transform(t) => Some(t.tag()),
            Face::Skip => Some("Skip"),
            Face::ForcedDraw => Some("+1"),
            Face::Flip => Some("⇌"),
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Face::Number(n) => write!(f, "{n}"),
            Face::Transform(t) => f.write_str(t.tag()),
            Face::Skip => f.write_str("Skip"),
            Face::ForcedDraw => f.write_str("+1 draw"),
            Face::Flip => f.write_str("⇌"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum FaceRepr {
    Number(u8),
    Tag(String),
}

impl TryFrom<FaceRepr> for Face {
    type Error = IntegrityError;

    fn try_from(repr: FaceRepr) -> Result<Self, Self::Error> {
        match repr {
            FaceRepr::Number(n) if (MIN_VALUE..=MAX_VALUE).contains(&n) => Ok(Face::Number(n)),
            FaceRepr::Number(n) => Err(IntegrityError::FaceValue(n)),
            FaceRepr::Tag(tag) => match tag.as_str() {
                "x+1" => Ok(Face::Transform(Transform::PlusOne)),
                "x+2" => Ok(Face::Transform(Transform::PlusTwo)),
                "x*2" => Ok(Face::Transform(Transform::Double)),
                "Skip" => Ok(Face::Skip),
                "+1" => Ok(Face::ForcedDraw),
                "⇌" => Ok(Face::Flip),
                _ => Err(IntegrityError::UnknownFace(tag)),
            },
        }
    }
}

impl From<Face> for FaceRepr {
    fn from(face: Face) -> Self {
        match face {
            Face::Number(n) => FaceRepr::Number(n),
            other => FaceRepr::Tag(other.tag().unwrap_or_default().to_string()),
        }
    }
}

/// Card color. Cosmetic only; the rules never compare colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
    Blue,
    Green,
}

impl Color {
    /// All four colors in catalog order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Yellow, Color::Blue, Color::Green];
}

/// Whether a card carries a function tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Basic,
    Function,
}

/// Which printed face a seat chooses to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
}

/// An immutable two-faced card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    top: Face,
    bottom: Face,
    color: Color,
    #[serde(rename = "type")]
    kind: CardKind,
}

impl Card {
    /// Create a card, checking the face placement rules.
    ///
    /// The kind is derived from the faces: any tag makes a function card.
    /// At most one face may carry an always-shown tag, since the other face
    /// has to be hidden.
    pub fn new(top: Face, bottom: Face, color: Color) -> Result<Self, IntegrityError> {
        if top.bottom_only() {
            return Err(IntegrityError::TagOnTop(top));
        }
        if top.must_be_shown() && bottom.must_be_shown() {
            return Err(IntegrityError::TwoActionFaces { top, bottom });
        }
        let kind = if top.value().is_some() && bottom.value().is_some() {
            CardKind::Basic
        } else {
            CardKind::Function
        };
        Ok(Self {
            top,
            bottom,
            color,
            kind,
        })
    }

    /// Re-check the placement rules on a card read from a document.
    pub fn validate(&self) -> Result<(), IntegrityError> {
        let rebuilt = Card::new(self.top, self.bottom, self.color)?;
        if rebuilt.kind != self.kind {
            return Err(IntegrityError::CardKind(*self));
        }
        Ok(())
    }

    #[must_use]
    pub fn top(&self) -> Face {
        self.top
    }

    #[must_use]
    pub fn bottom(&self) -> Face {
        self.bottom
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// The face on the given side.
    #[must_use]
    pub fn face(&self, side: Side) -> Face {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    /// The side a seat has no choice about, if any.
    ///
    /// A forced-draw or flip tag can never be hidden, so the side carrying it
    /// must be shown.
    #[must_use]
    pub fn forced_side(&self) -> Option<Side> {
        if self.bottom.must_be_shown() {
            Some(Side::Bottom)
        } else if self.top.must_be_shown() {
            Some(Side::Top)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.top, self.bottom)
    }
}

/// A card committed face-up on the table by one seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedCard {
    #[serde(flatten)]
    card: Card,
    shown: Face,
    hidden: Face,
    #[serde(rename = "playerIndex")]
    seat: Seat,
}

impl PlayedCard {
    /// Commit `card` for `seat`, showing `requested` unless the card forces a side.
    ///
    /// Returns the played card and the side that was actually shown.
    #[must_use]
    pub fn commit(card: Card, requested: Side, seat: Seat) -> (Self, Side) {
        let side = card.forced_side().unwrap_or(requested);
        let (shown, hidden) = match side {
            Side::Top => (card.top, card.bottom),
            Side::Bottom => (card.bottom, card.top),
        };
        (
            Self {
                card,
                shown,
                hidden,
                seat,
            },
            side,
        )
    }

    /// Check a played card read from a document belongs to `slot`.
    pub fn validate(&self, slot: Seat) -> Result<(), IntegrityError> {
        self.card.validate()?;
        if self.seat != slot {
            return Err(IntegrityError::PlayedSlot {
                slot,
                seat: self.seat,
            });
        }
        let faces = (self.shown, self.hidden);
        if faces != (self.card.top, self.card.bottom) && faces != (self.card.bottom, self.card.top)
        {
            return Err(IntegrityError::PlayedFaces(slot));
        }
        if self.hidden.must_be_shown() {
            return Err(IntegrityError::HiddenActionFace {
                seat: slot,
                face: self.hidden,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn card(&self) -> Card {
        self.card
    }

    #[must_use]
    pub fn shown(&self) -> Face {
        self.shown
    }

    #[must_use]
    pub fn hidden(&self) -> Face {
        self.hidden
    }

    #[must_use]
    pub fn seat(&self) -> Seat {
        self.seat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(i: u8) -> Seat {
        Seat::new(i).unwrap()
    }

    #[test]
    fn test_transform_caps_at_ten() {
        assert_eq!(Transform::PlusOne.apply(10), 10);
        assert_eq!(Transform::PlusTwo.apply(9), 10);
        assert_eq!(Transform::Double.apply(7), 10);
        assert_eq!(Transform::Double.apply(4), 8);
        assert_eq!(Transform::PlusTwo.apply(3), 5);
    }

    #[test]
    fn test_face_wire_format() {
        let faces = [
            (Face::Number(7), "7"),
            (Face::Transform(Transform::PlusOne), "\"x+1\""),
            (Face::Transform(Transform::PlusTwo), "\"x+2\""),
            (Face::Transform(Transform::Double), "\"x*2\""),
            (Face::Skip, "\"Skip\""),
            (Face::ForcedDraw, "\"+1\""),
            (Face::Flip, "\"⇌\""),
        ];
        for (face, json) in faces {
            assert_eq!(serde_json::to_string(&face).unwrap(), json);
            assert_eq!(serde_json::from_str::<Face>(json).unwrap(), face);
        }
    }

    #[test]
    fn test_face_rejects_bad_values() {
        assert!(serde_json::from_str::<Face>("0").is_err());
        assert!(serde_json::from_str::<Face>("11").is_err());
        assert!(serde_json::from_str::<Face>("\"x+3\"").is_err());
    }

    #[test]
    fn test_card_kind_derived_from_faces() {
        let basic = Card::new(Face::Number(2), Face::Number(4), Color::Red).unwrap();
        assert_eq!(basic.kind(), CardKind::Basic);

        let function = Card::new(Face::Number(5), Face::Skip, Color::Blue).unwrap();
        assert_eq!(function.kind(), CardKind::Function);
    }

    #[test]
    fn test_two_action_faces_rejected() {
        assert_eq!(
            Card::new(Face::ForcedDraw, Face::Flip, Color::Red),
            Err(IntegrityError::TwoActionFaces {
                top: Face::ForcedDraw,
                bottom: Face::Flip
            })
        );
        assert!(Card::new(Face::Flip, Face::Flip, Color::Blue).is_err());
        assert!(Card::new(Face::Flip, Face::Number(4), Color::Blue).is_ok());
    }

    #[test]
    fn test_transform_on_top_rejected() {
        let result = Card::new(Face::Transform(Transform::Double), Face::Number(3), Color::Green);
        assert_eq!(
            result,
            Err(IntegrityError::TagOnTop(Face::Transform(Transform::Double)))
        );
    }

    #[test]
    fn test_commit_respects_choice() {
        let card = Card::new(Face::Number(3), Face::Number(8), Color::Yellow).unwrap();
        let (played, side) = PlayedCard::commit(card, Side::Bottom, seat(1));

        assert_eq!(side, Side::Bottom);
        assert_eq!(played.shown(), Face::Number(8));
        assert_eq!(played.hidden(), Face::Number(3));
        assert_eq!(played.seat(), seat(1));
    }

    #[test]
    fn test_commit_forces_action_tags_shown() {
        let draw = Card::new(Face::Number(4), Face::ForcedDraw, Color::Red).unwrap();
        let (played, side) = PlayedCard::commit(draw, Side::Top, seat(0));
        assert_eq!(side, Side::Bottom);
        assert_eq!(played.shown(), Face::ForcedDraw);
        assert_eq!(played.hidden(), Face::Number(4));

        let flip = Card::new(Face::Flip, Face::Number(6), Color::Blue).unwrap();
        let (played, side) = PlayedCard::commit(flip, Side::Bottom, seat(2));
        assert_eq!(side, Side::Top);
        assert_eq!(played.shown(), Face::Flip);
    }

    #[test]
    fn test_played_card_wire_format() {
        let card = Card::new(Face::Number(6), Face::Transform(Transform::PlusOne), Color::Green)
            .unwrap();
        let (played, _) = PlayedCard::commit(card, Side::Top, seat(3));

        let value = serde_json::to_value(played).unwrap();
        assert_eq!(value["top"], 6);
        assert_eq!(value["bottom"], "x+1");
        assert_eq!(value["color"], "green");
        assert_eq!(value["type"], "function");
        assert_eq!(value["shown"], 6);
        assert_eq!(value["hidden"], "x+1");
        assert_eq!(value["playerIndex"], 3);

        let back: PlayedCard = serde_json::from_value(value).unwrap();
        assert_eq!(back, played);
    }

    #[test]
    fn test_played_card_validation() {
        let card = Card::new(Face::Number(1), Face::Flip, Color::Red).unwrap();
        let (played, _) = PlayedCard::commit(card, Side::Top, seat(2));

        assert!(played.validate(seat(2)).is_ok());
        assert_eq!(
            played.validate(seat(1)),
            Err(IntegrityError::PlayedSlot {
                slot: seat(1),
                seat: seat(2)
            })
        );

        let tampered = PlayedCard {
            shown: Face::Number(1),
            hidden: Face::Flip,
            ..played
        };
        assert_eq!(
            tampered.validate(seat(2)),
            Err(IntegrityError::HiddenActionFace {
                seat: seat(2),
                face: Face::Flip
            })
        );
    }
}
