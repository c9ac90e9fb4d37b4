//! The round state machine.
//!
//! `playing -> revealing -> settling -> round-end -> playing (next round)`,
//! with `finished` terminal.
//!
//! - `play_card` is the only seat action and is only accepted while playing,
//!   from the current seat.
//! - `advance_phase` drives every other transition. It is a no-op outside
//!   the system-driven phases, so a duplicate trigger does no harm.
//!
//! Every operation validates first and mutates only once nothing can fail,
//! so a rejected call leaves the state exactly as it was.

use im::Vector;
use tracing::{debug, error, info};

use crate::cards::{build_catalog, shuffle, Card, PlayedCard, Side, MIN_VALUE};
use crate::core::{
    next_seat, order_position, ConfigError, Direction, EngineError, GameConfig, GameRng, IntegrityError, Phase,
    PlayerInfo, RoundState, Seat, SeatMap, Winner, SEAT_COUNT,
};
use crate::effects::{DrawOutcome, EffectReport, EffectResolver};

use super::settlement::{apply_settlement, calculate_settle, Settlement};
use super::winner::check_winner;

const LOG_TARGET: &str = "par_game::rules::engine";

/// What a successful play did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayReport {
    pub played: PlayedCard,
    /// The side actually shown.
    pub side: Side,
    /// The card carried a tag that overrode the requested side.
    pub forced: bool,
    /// All four cards are down and the round moved to revealing.
    pub revealing: bool,
}

/// One settlement step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettleStep {
    pub seat: Seat,
    pub settlement: Settlement,
    /// The settling seat's own draw, if the settlement required one.
    pub draw: Option<DrawOutcome>,
    pub effect: EffectReport,
    /// This was the last seat in settlement order.
    pub round_over: bool,
}

/// The transition taken by `advance_phase`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Nothing to advance: a seat must act, or the game is over.
    Idle { phase: Phase },
    /// Revealing moved on to settling.
    Revealed,
    /// Revealing found an empty played slot and fell back to playing.
    Recovered { missing: Seat },
    /// One seat was settled.
    Settled(Box<SettleStep>),
    /// Round end with no winner: the next round has started.
    NextRound {
        round: u32,
        start: Seat,
        direction: Direction,
        flipped: bool,
    },
    /// Round end with a winner: the game is finished.
    Finished { winner: Seat },
}

/// Section headers in the game log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Banner {
    Reveal,
    Settle,
    RoundOver,
}

impl Banner {
    fn text(self) -> &'static str {
        match self {
            Banner::Reveal => "------ cards down, revealing ------",
            Banner::Settle => "------ settlement ------",
            Banner::RoundOver => "------ round over ------",
        }
    }
}

/// The rules engine for one table configuration.
#[derive(Clone, Debug, Default)]
pub struct GameEngine {
    config: GameConfig,
}

impl GameEngine {
    /// Create an engine with a validated configuration.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shuffle a fresh catalog and deal a new game.
    ///
    /// Each seat receives `hand_size` cards, one at a time round-robin from
    /// the deck top.
    pub fn deal_new_game(&self, players: SeatMap<PlayerInfo>) -> Result<RoundState, EngineError> {
        let mut rng = GameRng::from_seed_or_entropy(self.config.seed);
        self.deal_with_rng(players, &mut rng)
    }

    /// Deal a new game using the given RNG.
    pub fn deal_with_rng(
        &self,
        players: SeatMap<PlayerInfo>,
        rng: &mut GameRng,
    ) -> Result<RoundState, EngineError> {
        let mut deck = shuffle(build_catalog()?, rng);

        let mut hands: SeatMap<Vector<Card>> = SeatMap::default();
        for _ in 0..self.config.hand_size {
            for seat in Seat::all() {
                let card = deck
                    .pop()
                    .ok_or(ConfigError::HandSize(self.config.hand_size))?;
                hands[seat].push_back(card);
            }
        }

        let mut state = RoundState::new(players, deck.into_iter().collect(), hands);
        state.push_log("Game started");
        state.push_log("Round 1 begins");
        info!(
            target: LOG_TARGET,
            seed = rng.seed(),
            hand_size = self.config.hand_size,
            deck = state.deck.len(),
            "dealt new game"
        );
        self.finish(&mut state);
        Ok(state)
    }

    /// Play the card at `card_index` from `seat`'s hand, showing `side`.
    ///
    /// If the card carries a forced-draw or flip tag, the side with the tag
    /// is shown regardless of `side`.
    pub fn play_card(
        &self,
        state: &mut RoundState,
        seat: Seat,
        card_index: usize,
        side: Side,
    ) -> Result<PlayReport, EngineError> {
        if state.phase != Phase::Playing {
            debug!(target: LOG_TARGET, %seat, phase = %state.phase, "play rejected: wrong phase");
            return Err(EngineError::PhaseViolation {
                action: "play card",
                phase: state.phase,
            });
        }
        if seat != state.current_seat {
            debug!(target: LOG_TARGET, %seat, expected = %state.current_seat, "play rejected: not your turn");
            return Err(EngineError::TurnViolation {
                seat,
                expected: state.current_seat,
            });
        }
        if state.played[seat].is_some() {
            return Err(IntegrityError::ActorAlreadyPlayed { seat }.into());
        }
        let hand_len = state.hands[seat].len();
        if card_index >= hand_len {
            return Err(EngineError::NoSuchCard {
                seat,
                index: card_index,
                hand_len,
            });
        }

        let card = state.hands[seat].remove(card_index);
        let (played, shown_side) = PlayedCard::commit(card, side, seat);
        let forced = shown_side != side;
        state.played[seat] = Some(played);
        state.push_log(format!("{} plays, showing {}", state.name(seat), played.shown()));

        let revealing = state.played_count() == SEAT_COUNT;
        if revealing {
            state.phase = Phase::Revealing;
            state.settle_seat = state.start_seat;
            state.push_log(Banner::Reveal.text());
        } else {
            state.current_seat = next_seat(state.current_seat, state.direction);
        }

        debug!(
            target: LOG_TARGET,
            %seat,
            %card,
            shown = %played.shown(),
            forced,
            revealing,
            "card played"
        );
        self.finish(state);
        Ok(PlayReport {
            played,
            side: shown_side,
            forced,
            revealing,
        })
    }

    /// Attempt the next system-driven transition.
    ///
    /// Returns `Advance::Idle` while a seat must play or once the game is
    /// finished. Errors only on malformed state, which is left untouched.
    pub fn advance_phase(&self, state: &mut RoundState) -> Result<Advance, EngineError> {
        let advance = match state.phase {
            Phase::Playing | Phase::Finished => Advance::Idle { phase: state.phase },
            Phase::Revealing => Self::reveal(state),
            Phase::Settling => Advance::Settled(Box::new(Self::settle_next(state)?)),
            Phase::RoundEnd => Self::end_round(state),
        };
        self.finish(state);
        Ok(advance)
    }

    /// Advance until a seat has to act or the game is finished.
    pub fn advance_until_input(&self, state: &mut RoundState) -> Result<Vec<Advance>, EngineError> {
        let mut steps = Vec::new();
        loop {
            match self.advance_phase(state)? {
                Advance::Idle { .. } => return Ok(steps),
                step => steps.push(step),
            }
        }
    }

    /// The winning seat, if any.
    #[must_use]
    pub fn check_winner(&self, state: &RoundState) -> Option<Seat> {
        check_winner(state)
    }

    fn reveal(state: &mut RoundState) -> Advance {
        let missing = state
            .settlement_order()
            .into_iter()
            .find(|&seat| state.played[seat].is_none());

        if let Some(missing) = missing {
            error!(
                target: LOG_TARGET,
                seat = %missing,
                round = state.round,
                "revealing with an empty played slot, reverting to playing"
            );
            state.push_log(format!("{} has not played yet, back to playing", state.name(missing)));
            state.phase = Phase::Playing;
            state.current_seat = missing;
            return Advance::Recovered { missing };
        }

        state.phase = Phase::Settling;
        state.settle_seat = state.start_seat;
        state.push_log(Banner::Settle.text());
        Advance::Revealed
    }

    fn settle_next(state: &mut RoundState) -> Result<SettleStep, EngineError> {
        let seat = state.settle_seat;
        let played = state.played[seat].ok_or(IntegrityError::MissingPlayed(seat))?;
        let settlement = calculate_settle(&played, state.reference_point)?;

        let draw = apply_settlement(state, seat, &played, &settlement);
        let effect = EffectResolver::resolve(state, &played);

        let position = order_position(state.start_seat, state.direction, seat);
        let round_over = position == SEAT_COUNT - 1;
        if round_over {
            state.phase = Phase::RoundEnd;
            state.push_log(Banner::RoundOver.text());
        } else {
            state.settle_seat = state.settlement_order()[position + 1];
        }

        Ok(SettleStep {
            seat,
            settlement,
            draw,
            effect,
            round_over,
        })
    }

    fn end_round(state: &mut RoundState) -> Advance {
        if let Some(winner) = check_winner(state) {
            let name = state.name(winner).to_string();
            state.push_log(format!("{name} wins!"));
            state.winner = Some(Winner {
                index: winner,
                name,
            });
            state.phase = Phase::Finished;
            info!(target: LOG_TARGET, %winner, round = state.round, "game finished");
            return Advance::Finished { winner };
        }

        let flipped = state.pending_flip;
        if flipped {
            state.direction = state.direction.flipped();
            state.pending_flip = false;
            state.push_log(format!("Direction is now {}", state.direction));
        }

        let start = next_seat(state.start_seat, state.direction);
        state.played = SeatMap::default();
        state.reference_point = MIN_VALUE;
        state.start_seat = start;
        state.current_seat = start;
        state.settle_seat = start;
        state.round += 1;
        state.phase = Phase::Playing;
        state.push_log(format!("Round {} begins", state.round));

        info!(
            target: LOG_TARGET,
            round = state.round,
            %start,
            direction = %state.direction,
            flipped,
            "next round"
        );
        Advance::NextRound {
            round: state.round,
            start,
            direction: state.direction,
            flipped,
        }
    }

    fn finish(&self, state: &mut RoundState) {
        if let Some(capacity) = self.config.log_capacity {
            state.trim_log(capacity);
        }
    }
}
