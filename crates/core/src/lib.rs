//! Core Skyjo rules. Keep this crate free of IO and platform concerns.

pub mod actions;
pub mod cards;
pub mod config;
pub mod deck;
pub mod hand;
pub mod rng;
pub mod round;
pub mod scoresheet;
pub mod scoring;
pub mod session;
pub mod state;
pub mod view;

pub use actions::*;
pub use cards::*;
pub use config::*;
pub use deck::*;
pub use hand::*;
pub use rng::*;
pub use round::*;
pub use scoresheet::*;
pub use scoring::*;
pub use session::*;
pub use state::*;
pub use view::*;
