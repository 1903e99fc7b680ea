//! Game session engine for a single-player memory matching card game.
//!
//! The crate is headless: [`GameEngine`] owns the board and the rules, and a
//! presentation shell reads [`Session`] snapshots and forwards player intents.

pub use card::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use scoring::*;
pub use store::*;
pub use types::*;

mod card;
mod clock;
mod engine;
mod error;
mod generator;
mod scoring;
mod store;
mod types;
