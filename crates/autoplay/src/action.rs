use serde::{Deserialize, Serialize};
use skyjo_core::Action;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DrawSource {
    DrawPile,
    DiscardPile,
}

impl DrawSource {
    pub fn into_action(self) -> Action {
        match self {
            Self::DrawPile => Action::DrawFromPile,
            Self::DiscardPile => Action::DrawFromDiscard,
        }
    }
}

/// What to do with the card in hand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardDecision {
    Replace(usize),
    DiscardAndReveal(usize),
}

impl CardDecision {
    pub fn into_action(self) -> Action {
        match self {
            Self::Replace(index) => Action::Replace { index },
            Self::DiscardAndReveal(index) => Action::DiscardAndReveal { index },
        }
    }
}
