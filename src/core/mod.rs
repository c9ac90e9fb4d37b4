//! Core engine types: seats, turn order, RNG, configuration, state, errors.

pub mod config;
pub mod error;
pub mod rng;
pub mod seat;
pub mod state;

pub use config::{GameConfig, DEFAULT_HAND_SIZE};
pub use error::{CatalogError, ConfigError, EngineError, IntegrityError};
pub use rng::GameRng;
pub use seat::{next_seat, order_position, settlement_order, Direction, Seat, SeatMap, SEAT_COUNT};
pub use state::{Phase, PlayerInfo, RoundState, Winner};
