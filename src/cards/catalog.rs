//! The fixed 108-card catalog.
//!
//! | Group                 | Cards |
//! |-----------------------|-------|
//! | same-value basics     | 40    |
//! | cross-value basics    | 32    |
//! | special cross-value   | 4     |
//! | `x+1` / `x+2` / `x*2` | 12    |
//! | `Skip`                | 4     |
//! | forced draw (`+1`)    | 8     |
//! | flip (`⇌`)            | 8     |
//!
//! Cards come out in catalog order; shuffle before dealing.

use super::card::{Card, Color, Face, Transform};
use crate::core::error::CatalogError;

/// Total number of cards in the catalog.
pub const CATALOG_SIZE: usize = 108;

const CROSS_PAIRS: [(u8, u8); 8] = [
    (2, 4),
    (4, 6),
    (6, 8),
    (8, 10),
    (1, 3),
    (3, 5),
    (5, 7),
    (7, 9),
];

/// Build the full catalog in deterministic order.
///
/// Fails only if a group deviates from its fixed count.
///
/// ```
/// use par_game::cards::catalog::{build_catalog, CATALOG_SIZE};
///
/// let deck = build_catalog().unwrap();
/// assert_eq!(deck.len(), CATALOG_SIZE);
/// ```
pub fn build_catalog() -> Result<Vec<Card>, CatalogError> {
    let mut deck = Vec::with_capacity(CATALOG_SIZE);

    let same_value = (1..=10u8)
        .flat_map(|n| Color::ALL.map(|c| (n, n, c)))
        .map(|(top, bottom, color)| Card::new(Face::Number(top), Face::Number(bottom), color));
    extend_group(&mut deck, "same-value basic", 40, same_value)?;

    let cross = CROSS_PAIRS
        .iter()
        .flat_map(|&(top, bottom)| Color::ALL.map(|c| (top, bottom, c)))
        .map(|(top, bottom, color)| Card::new(Face::Number(top), Face::Number(bottom), color));
    extend_group(&mut deck, "cross-value basic", 32, cross)?;

    let special = [
        (2, 10, Color::Red),
        (2, 10, Color::Blue),
        (1, 9, Color::Yellow),
        (1, 9, Color::Green),
    ]
    .into_iter()
    .map(|(top, bottom, color)| Card::new(Face::Number(top), Face::Number(bottom), color));
    extend_group(&mut deck, "special cross-value basic", 4, special)?;

    let transforms = [
        (5..=8, Transform::PlusOne),
        (1..=4, Transform::PlusTwo),
        (1..=4, Transform::Double),
    ];
    for (tops, transform) in transforms {
        extend_group(
            &mut deck,
            "transform",
            4,
            tagged(tops, Face::Transform(transform)),
        )?;
    }

    extend_group(&mut deck, "skip", 4, tagged(5..=8, Face::Skip))?;
    extend_group(&mut deck, "forced draw", 8, tagged(1..=8, Face::ForcedDraw))?;
    extend_group(&mut deck, "flip", 8, tagged(1..=8, Face::Flip))?;

    if deck.len() != CATALOG_SIZE {
        return Err(CatalogError::Total {
            expected: CATALOG_SIZE,
            actual: deck.len(),
        });
    }
    Ok(deck)
}

/// Function cards with a number on top, colors cycling in catalog order.
fn tagged(
    tops: std::ops::RangeInclusive<u8>,
    tag: Face,
) -> impl Iterator<Item = Result<Card, crate::core::error::IntegrityError>> {
    tops.zip(Color::ALL.into_iter().cycle())
        .map(move |(top, color)| Card::new(Face::Number(top), tag, color))
}

fn extend_group(
    deck: &mut Vec<Card>,
    group: &'static str,
    expected: usize,
    cards: impl Iterator<Item = Result<Card, crate::core::error::IntegrityError>>,
) -> Result<(), CatalogError> {
    let before = deck.len();
    for card in cards {
        deck.push(card?);
    }
    let actual = deck.len() - before;
    if actual != expected {
        return Err(CatalogError::Group {
            group,
            expected,
            actual,
        });
    }
    Ok(())
}
