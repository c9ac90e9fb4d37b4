//! Seat identification, per-seat storage and turn order.
//!
//! ## Seat
//!
//! Type-safe identifier for one of the four fixed seats at the table.
//!
//! ## SeatMap
//!
//! Per-seat data storage backed by a fixed array for O(1) access.
//! Supports iteration and indexing by `Seat`.
//!
//! ## Turn order
//!
//! `next_seat` and `settlement_order` are pure seat-rotation arithmetic.
//! Counter-clockwise walks up the seat indices, clockwise walks down.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::IntegrityError;

/// Number of seats at every table.
pub const SEAT_COUNT: usize = 4;

/// Seat identifier, `Seat(0)` through `Seat(3)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Seat(u8);

impl Seat {
    /// Seat 0, where the first round starts.
    pub const FIRST: Seat = Seat(0);

    /// Create a seat, returning `None` if the index is out of range.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < SEAT_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all four seats in index order.
    ///
    /// ```
    /// use par_game::core::Seat;
    ///
    /// let seats: Vec<_> = Seat::all().collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[3].index(), 3);
    /// ```
    pub fn all() -> impl Iterator<Item = Seat> {
        (0..SEAT_COUNT as u8).map(Seat)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

impl TryFrom<usize> for Seat {
    type Error = IntegrityError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u8::try_from(index)
            .ok()
            .and_then(Seat::new)
            .ok_or(IntegrityError::SeatIndex(index))
    }
}

impl TryFrom<u8> for Seat {
    type Error = IntegrityError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Seat::try_from(index as usize)
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        seat.0
    }
}

/// Direction of travel around the table.
///
/// Only ever changes at a round boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Clockwise: seat indices decrease.
    Cw,
    /// Counter-clockwise: seat indices increase.
    #[default]
    Ccw,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Direction::Cw => Direction::Ccw,
            Direction::Ccw => Direction::Cw,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Cw => f.write_str("clockwise"),
            Direction::Ccw => f.write_str("counter-clockwise"),
        }
    }
}

/// The seat after `seat` in `direction`.
#[must_use]
pub const fn next_seat(seat: Seat, direction: Direction) -> Seat {
    let step = match direction {
        Direction::Ccw => 1,
        Direction::Cw => SEAT_COUNT - 1,
    };
    Seat(((seat.index() + step) % SEAT_COUNT) as u8)
}

/// The four seats visited from `start`, stepping with `next_seat`.
///
/// Used both for the playing order and the settlement order of a round.
///
/// ```
/// use par_game::core::{settlement_order, Direction, Seat};
///
/// let start = Seat::new(1).unwrap();
/// let order: Vec<usize> = settlement_order(start, Direction::Cw)
///     .iter()
///     .map(|s| s.index())
///     .collect();
/// assert_eq!(order, vec![1, 0, 3, 2]);
/// ```
#[must_use]
pub fn settlement_order(start: Seat, direction: Direction) -> [Seat; SEAT_COUNT] {
    let mut order = [start; SEAT_COUNT];
    for i in 1..SEAT_COUNT {
        order[i] = next_seat(order[i - 1], direction);
    }
    order
}

/// Position of `seat` within the settlement order starting at `start`.
#[must_use]
pub fn order_position(start: Seat, direction: Direction, seat: Seat) -> usize {
    settlement_order(start, direction)
        .iter()
        .position(|&s| s == seat)
        // the order visits every seat once, so the position always exists
        .unwrap_or_default()
}

/// Per-seat data storage with O(1) access.
///
/// Backed by a `[T; 4]` with one entry per seat.
///
/// ## Example
///
/// ```
/// use par_game::core::{Seat, SeatMap};
///
/// let mut counts: SeatMap<u32> = SeatMap::new(|_| 8);
/// let seat = Seat::new(2).unwrap();
/// counts[seat] -= 1;
/// assert_eq!(counts[seat], 7);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatMap<T> {
    data: [T; SEAT_COUNT],
}

impl<T> SeatMap<T> {
    /// Create a new SeatMap with values from a factory function.
    pub fn new(factory: impl Fn(Seat) -> T) -> Self {
        Self {
            data: [Seat(0), Seat(1), Seat(2), Seat(3)].map(factory),
        }
    }

    /// Wrap an array already in seat order.
    pub fn from_array(data: [T; SEAT_COUNT]) -> Self {
        Self { data }
    }

    /// Create a new SeatMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        &self.data[seat.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (Seat, &T) pairs in seat index order.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over the values in seat index order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Consume the map, returning the values in seat index order.
    pub fn into_array(self) -> [T; SEAT_COUNT] {
        self.data
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}
