//! Shared helpers for integration tests.

#![allow(dead_code)]

use par_game::cards::Side;
use par_game::core::{Phase, PlayerInfo, RoundState, Seat, SeatMap};
use par_game::rules::GameEngine;

/// Route engine logs to the test harness. Set `RUST_LOG` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn seat(i: u8) -> Seat {
    Seat::new(i).unwrap()
}

pub fn players() -> SeatMap<PlayerInfo> {
    let names = ["Ann", "Ben", "Cat", "Dan"];
    SeatMap::new(|s| PlayerInfo::new(format!("id-{}", s.index()), names[s.index()]))
}

/// Play until the game is finished, choosing each move with `pick`.
///
/// Returns the number of rounds started. Panics if the game runs past
/// `max_rounds`.
pub fn play_to_completion(
    engine: &GameEngine,
    state: &mut RoundState,
    max_rounds: u32,
    mut pick: impl FnMut(&RoundState) -> (usize, Side),
) -> u32 {
    while state.phase != Phase::Finished {
        assert!(state.round <= max_rounds, "game did not finish in {max_rounds} rounds");
        if state.phase == Phase::Playing {
            let seat = state.current_seat;
            let (index, side) = pick(state);
            engine.play_card(state, seat, index, side).unwrap();
        } else {
            engine.advance_until_input(state).unwrap();
        }
        assert_eq!(accounted_cards(state), 108);
    }
    state.round
}

/// Cards in play plus the four discarded at every completed round.
pub fn accounted_cards(state: &RoundState) -> usize {
    state.cards_in_play() + 4 * (state.round as usize - 1)
}

/// Always plays the first card in hand, top side up.
pub fn first_card(_: &RoundState) -> (usize, Side) {
    (0, Side::Top)
}
