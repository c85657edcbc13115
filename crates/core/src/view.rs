//! Redacted, per-seat view of a [`GameState`].
//!
//! AI policies only ever receive a [`PlayerView`]. Opponents' face-down cards
//! come out as [`VisibleSlot::Hidden`], so their values cannot be read.

use crate::{
    Card, GameState, Hand, Phase, PlayerId, RoundError, TurnPhase, ValidActions, HAND_SIZE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VisibleSlot {
    Empty,
    Hidden,
    Revealed(i32),
}

impl VisibleSlot {
    pub fn value(self) -> Option<i32> {
        match self {
            Self::Revealed(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpponentView {
    pub seat: usize,
    pub id: PlayerId,
    pub name: String,
    pub slots: [VisibleSlot; HAND_SIZE],
}

impl OpponentView {
    pub fn visible_score(&self) -> i32 {
        self.slots.iter().filter_map(|slot| slot.value()).sum()
    }

    pub fn hidden_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, VisibleSlot::Hidden))
            .count()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    state: &'a GameState,
    seat: usize,
}

impl GameState {
    pub fn view_for(&self, seat: usize) -> Result<PlayerView<'_>, RoundError> {
        if seat >= self.players.len() {
            return Err(RoundError::UnknownPlayer(seat));
        }
        Ok(PlayerView { state: self, seat })
    }
}

pub fn redact(hand: &Hand) -> [VisibleSlot; HAND_SIZE] {
    (*hand.slots()).map(|slot| match slot {
        None => VisibleSlot::Empty,
        Some(card) if card.is_revealed => VisibleSlot::Revealed(card.value),
        Some(_) => VisibleSlot::Hidden,
    })
}

impl<'a> PlayerView<'a> {
    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.state.turn_phase
    }

    pub fn is_my_turn(&self) -> bool {
        self.state.phase.is_turn_cycle() && self.state.current_player_index == self.seat
    }

    /// The viewer's own grid.
    pub fn own_hand(&self) -> &'a Hand {
        &self.state.players[self.seat].hand
    }

    pub fn opponent(&self, seat: usize) -> Option<OpponentView> {
        if seat == self.seat {
            return None;
        }
        let player = self.state.players.get(seat)?;
        Some(OpponentView {
            seat,
            id: player.id.clone(),
            name: player.name.clone(),
            slots: redact(&player.hand),
        })
    }

    pub fn opponents(&self) -> Vec<OpponentView> {
        (0..self.state.players.len())
            .filter_map(|seat| self.opponent(seat))
            .collect()
    }

    pub fn discard_top(&self) -> Option<Card> {
        self.state.deck.discard_top().copied()
    }

    /// The card in hand between drawing and resolving. It is face up.
    pub fn drawn_card(&self) -> Option<Card> {
        self.state.drawn_card
    }

    /// Legal moves of the state as a whole. Only meaningful to the viewer on
    /// its own turn, or for its own initial reveal.
    pub fn valid_actions(&self) -> ValidActions {
        self.state.valid_actions()
    }
}
