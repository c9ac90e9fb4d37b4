//! Game configuration.
//!
//! The table shape (four seats, 108 cards, reference point 1..=10) is fixed by
//! the rules. What a host can tune is how many cards each seat is dealt, the
//! shuffle seed and how much of the game log the shared document keeps.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::seat::SEAT_COUNT;
use crate::cards::catalog::CATALOG_SIZE;

/// Cards dealt to each seat at game start.
pub const DEFAULT_HAND_SIZE: usize = 8;

/// Complete game configuration.
///
/// ```
/// use par_game::core::GameConfig;
///
/// let config = GameConfig::default().with_seed(7).with_log_capacity(200);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.hand_size, 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Cards dealt to each seat.
    pub hand_size: usize,

    /// Shuffle seed. `None` draws one from entropy.
    pub seed: Option<u64>,

    /// Maximum log lines kept in the shared document. `None` keeps everything.
    pub log_capacity: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            seed: None,
            log_capacity: None,
        }
    }
}

impl GameConfig {
    /// Set the number of cards dealt to each seat.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Use a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bound the shared game log.
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = Some(capacity);
        self
    }

    /// Check the configuration can produce a playable deal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dealt = self.hand_size.checked_mul(SEAT_COUNT);
        if self.hand_size == 0 || dealt.map_or(true, |n| n > CATALOG_SIZE) {
            return Err(ConfigError::HandSize(self.hand_size));
        }
        if self.log_capacity == Some(0) {
            return Err(ConfigError::LogCapacity);
        }
        Ok(())
    }
}
