use crate::{Phase, TurnPhase};
use thiserror::Error;

mod guards;
mod setup;
mod turn;

pub use setup::initialize_game;

/// Why a transition refused to run. The input state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("invalid turn phase: {0:?}")]
    InvalidTurnPhase(TurnPhase),
    #[error("unknown player index {0}")]
    UnknownPlayer(usize),
    #[error("slot index {0} out of range")]
    IndexOutOfRange(usize),
    #[error("slot {0} is empty")]
    EmptySlot(usize),
    #[error("slot {0} is already revealed")]
    AlreadyRevealed(usize),
    #[error("initial reveal needs two distinct slots")]
    DuplicateIndex,
    #[error("player {0} already revealed their initial cards")]
    InitialRevealDone(usize),
    #[error("no drawn card")]
    NoDrawnCard,
    #[error("a card taken from the discard pile must replace a hand card")]
    MustReplace,
    #[error("draw pile is empty")]
    EmptyDrawPile,
    #[error("discard pile is empty")]
    EmptyDiscardPile,
    #[error("the drawn card has not been played")]
    DrawnCardHeld,
    #[error("no hidden slot left to reveal")]
    NoHiddenSlot,
}
