//! Effect system for shown card faces.
//!
//! - `ShownEffect`: what a settled card's shown face does
//! - `EffectResolver`: applies it to the round state
//! - `DrawOutcome`: result of a single draw from the deck top

mod effect;
mod resolver;

pub use effect::{DrawOutcome, EffectReport, ShownEffect};
pub use resolver::EffectResolver;

pub(crate) use resolver::draw_one;
