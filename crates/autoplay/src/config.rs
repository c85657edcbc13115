use serde::{Deserialize, Serialize};
use skyjo_core::RuleConfig;
use std::fmt;
use std::str::FromStr;

/// AI strength tier.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
    Hardcore,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Normal, Self::Hard, Self::Hardcore];

    /// Highest value the tier treats as a good card worth keeping.
    pub fn good_card_threshold(self) -> i32 {
        match self {
            Self::Hardcore => 4,
            Self::Normal | Self::Hard => 3,
        }
    }

    pub fn is_advanced(self) -> bool {
        matches!(self, Self::Hard | Self::Hardcore)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Hardcore => "hardcore",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            "hardcore" => Ok(Self::Hardcore),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoplayConfig {
    pub seed: u64,
    /// Rounds played before giving up on reaching the score limit.
    pub max_rounds: u32,
    pub max_steps_per_round: u32,
    /// One tier per seat; the seat count is the player count.
    pub seats: Vec<Difficulty>,
    #[serde(default)]
    pub rules: RuleConfig,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FFEE,
            max_rounds: 50,
            max_steps_per_round: 2_000,
            seats: vec![Difficulty::Normal, Difficulty::Hard, Difficulty::Hardcore],
            rules: RuleConfig::default(),
        }
    }
}
