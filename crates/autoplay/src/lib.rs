//! Skyjo bots and a seeded self-play driver over the core rules.

mod action;
mod config;
mod error;
pub mod heuristics;
mod policy;
mod simulator;
mod trace;

pub use action::*;
pub use config::*;
pub use error::*;
pub use policy::*;
pub use simulator::*;
pub use trace::*;
