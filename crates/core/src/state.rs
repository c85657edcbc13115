use crate::{Card, Deck, Hand};
use serde::{Deserialize, Serialize};

pub type PlayerId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Phase {
    InitialReveal,
    Playing,
    FinalRound,
    Finished,
}

impl Phase {
    /// Phases in which the regular draw/resolve turn cycle runs.
    pub fn is_turn_cycle(self) -> bool {
        matches!(self, Self::Playing | Self::FinalRound)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    Draw,
    ReplaceOrDiscard,
    MustReplace,
    MustReveal,
}

impl TurnPhase {
    pub fn holds_drawn_card(self) -> bool {
        matches!(self, Self::ReplaceOrDiscard | Self::MustReplace)
    }
}

/// Seat identity, independent of any dealt hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
}

impl PlayerInfo {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hand: Hand,
}

/// One round of play. Transitions never mutate a state in place; they take
/// `&GameState` and hand back a fresh value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub deck: Deck,
    #[serde(default)]
    pub drawn_card: Option<Card>,
    pub phase: Phase,
    pub turn_phase: TurnPhase,
    #[serde(default)]
    pub finishing_player_index: Option<usize>,
    /// Seed for reshuffling the discard pile when the draw pile runs dry.
    #[serde(default)]
    pub deck_seed: u64,
    #[serde(default)]
    pub recycles: u32,
    /// Cards removed by column clears. They never return to a pile and never
    /// score, but they still belong to the dealt multiset.
    #[serde(default)]
    pub cleared: Vec<Card>,
}

impl GameState {
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn player_index(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|player| player.id == id)
    }

    pub fn discard_top(&self) -> Option<&Card> {
        self.deck.discard_top()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn finisher(&self) -> Option<&Player> {
        self.finishing_player_index
            .and_then(|index| self.players.get(index))
    }

    /// Cards still in play: both piles, every occupied slot and the drawn card.
    pub fn cards_in_play(&self) -> usize {
        let in_hands: usize = self
            .players
            .iter()
            .map(|player| player.hand.occupied_count())
            .sum();
        self.deck.len() + in_hands + usize::from(self.drawn_card.is_some())
    }

    /// Every card of the dealt multiset, cleared columns included.
    pub fn card_count(&self) -> usize {
        self.cards_in_play() + self.cleared.len()
    }
}
