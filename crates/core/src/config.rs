use crate::{standard_composition, Card, HAND_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("player count {count} outside {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },
    #[error("a game needs at least two seats, got minimum {0}")]
    MinPlayersTooLow(usize),
    #[error("deck holds {available} cards but dealing needs {needed}")]
    DeckTooSmall { needed: usize, available: usize },
    #[error("card value {0} outside -2..=12")]
    CardValueOutOfRange(i32),
    #[error("duplicate player id {0}")]
    DuplicatePlayerId(String),
    #[error("score limit must be positive, got {0}")]
    ScoreLimit(i32),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckEntry {
    pub value: i32,
    pub copies: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleConfig {
    /// A game ends once any cumulative total reaches this.
    #[serde(default = "default_score_limit")]
    pub score_limit: i32,
    #[serde(default = "default_min_players")]
    pub min_players: usize,
    #[serde(default = "default_max_players")]
    pub max_players: usize,
    #[serde(default = "standard_composition")]
    pub deck: Vec<DeckEntry>,
}

fn default_score_limit() -> i32 {
    100
}

fn default_min_players() -> usize {
    2
}

fn default_max_players() -> usize {
    8
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            score_limit: default_score_limit(),
            min_players: default_min_players(),
            max_players: default_max_players(),
            deck: standard_composition(),
        }
    }
}

impl RuleConfig {
    pub fn deck_size(&self) -> usize {
        self.deck.iter().map(|entry| entry.copies as usize).sum()
    }

    /// Cards consumed by the deal: a full hand per seat plus the first discard.
    pub fn cards_needed(players: usize) -> usize {
        players * HAND_SIZE + 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 2 {
            return Err(ConfigError::MinPlayersTooLow(self.min_players));
        }
        if self.max_players < self.min_players {
            return Err(ConfigError::PlayerCount {
                count: self.max_players,
                min: self.min_players,
                max: self.max_players,
            });
        }
        if self.score_limit <= 0 {
            return Err(ConfigError::ScoreLimit(self.score_limit));
        }
        if let Some(entry) = self.deck.iter().find(|entry| !Card::is_valid_value(entry.value)) {
            return Err(ConfigError::CardValueOutOfRange(entry.value));
        }
        let needed = Self::cards_needed(self.max_players);
        let available = self.deck_size();
        if available < needed {
            return Err(ConfigError::DeckTooSmall { needed, available });
        }
        Ok(())
    }

    pub fn check_player_count(&self, count: usize) -> Result<(), ConfigError> {
        if count < self.min_players || count > self.max_players {
            return Err(ConfigError::PlayerCount {
                count,
                min: self.min_players,
                max: self.max_players,
            });
        }
        Ok(())
    }
}
