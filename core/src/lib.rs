//! Mine generation and digging engine of a tile-digging game.
//!
//! A [`GameSession`] owns everything: the [`MineField`] being dug, the [`PlayerState`] and the
//! random source. Front-ends read the session and feed it player actions; every action
//! resolves immediately into an outcome value.

#![no_std]

extern crate alloc;

pub use engine::*;
pub use equipment::*;
pub use error::*;
pub use field::*;
pub use generator::*;
pub use player::*;
pub use random::*;
pub use rules::*;
pub use session::*;
pub use tile::*;
pub use town::{SaloonOption, SaloonOutcome};
pub use types::*;

mod engine;
mod equipment;
mod error;
mod field;
mod generator;
mod player;
mod random;
mod rules;
mod session;
mod tile;
pub mod town;
mod types;
