use crate::{GameState, Hand, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerScore {
    pub player_id: PlayerId,
    pub name: String,
    pub raw_score: i32,
    pub final_score: i32,
    pub is_finisher: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundResult {
    /// In seat order.
    pub scores: Vec<PlayerScore>,
    pub finisher_id: Option<PlayerId>,
    pub is_strictly_lowest: bool,
}

impl RoundResult {
    pub fn raw_scores(&self) -> BTreeMap<PlayerId, i32> {
        self.scores
            .iter()
            .map(|score| (score.player_id.clone(), score.raw_score))
            .collect()
    }

    pub fn score_for(&self, player_id: &str) -> Option<&PlayerScore> {
        self.scores.iter().find(|score| score.player_id == player_id)
    }
}

/// Sum of every remaining card. Cleared columns hold nothing and add 0;
/// face-down cards count at their value since the round is over.
pub fn hand_score(hand: &Hand) -> i32 {
    hand.total()
}

/// The finisher penalty: a finisher who is not strictly lowest doubles a
/// positive score. Zero and negative scores are never doubled.
pub fn calculate_round_score(raw_score: i32, is_finisher: bool, is_strictly_lowest: bool) -> i32 {
    if is_finisher && !is_strictly_lowest && raw_score > 0 {
        raw_score * 2
    } else {
        raw_score
    }
}

/// True when the finisher's score is below every other score. A tie
/// disqualifies; a missing finisher entry is never lowest.
pub fn check_strictly_lowest(finisher_id: &str, scores: &BTreeMap<PlayerId, i32>) -> bool {
    let Some(&finisher_score) = scores.get(finisher_id) else {
        return false;
    };
    scores
        .iter()
        .filter(|(id, _)| id.as_str() != finisher_id)
        .all(|(_, &score)| score > finisher_score)
}

/// Scores a round from the hands and the finisher alone.
pub fn calculate_final_scores(state: &GameState) -> RoundResult {
    let raw: BTreeMap<PlayerId, i32> = state
        .players
        .iter()
        .map(|player| (player.id.clone(), hand_score(&player.hand)))
        .collect();
    let finisher_id = state.finisher().map(|player| player.id.clone());
    let is_strictly_lowest = finisher_id
        .as_deref()
        .is_some_and(|id| check_strictly_lowest(id, &raw));

    let scores = state
        .players
        .iter()
        .map(|player| {
            let raw_score = hand_score(&player.hand);
            let is_finisher = finisher_id.as_deref() == Some(player.id.as_str());
            PlayerScore {
                player_id: player.id.clone(),
                name: player.name.clone(),
                raw_score,
                final_score: calculate_round_score(raw_score, is_finisher, is_strictly_lowest),
                is_finisher,
            }
        })
        .collect();

    RoundResult {
        scores,
        finisher_id,
        is_strictly_lowest,
    }
}
