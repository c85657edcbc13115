use crate::{
    calculate_round_score, check_strictly_lowest, PlayerId, PlayerInfo, RoundResult,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("unknown player {0}")]
    UnknownPlayer(String),
    #[error("no raw score for player {0}")]
    MissingScore(String),
    #[error("finisher {0} is not seated")]
    UnknownFinisher(String),
    #[error("round has no finisher")]
    NoFinisher,
    #[error("unknown round {0}")]
    UnknownRound(u32),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Round {
    pub id: u32,
    pub raw_scores: BTreeMap<PlayerId, i32>,
    pub scores: BTreeMap<PlayerId, i32>,
    pub finisher_id: PlayerId,
    pub is_strictly_lowest: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerTotal {
    pub player_id: PlayerId,
    pub name: String,
    pub total: i32,
}

/// Cumulative scores over the rounds of one game. Manual entry and virtual
/// play both feed it, through the same scoring rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreSheet {
    players: Vec<PlayerInfo>,
    threshold: i32,
    rounds: Vec<Round>,
    next_round_id: u32,
}

impl ScoreSheet {
    pub fn new(players: Vec<PlayerInfo>, threshold: i32) -> Self {
        Self {
            players,
            threshold,
            rounds: Vec::new(),
            next_round_id: 1,
        }
    }

    pub fn players(&self) -> &[PlayerInfo] {
        &self.players
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Scores a manually entered round and appends it.
    pub fn add_round(
        &mut self,
        raw_scores: &BTreeMap<PlayerId, i32>,
        finisher_id: &str,
    ) -> Result<&Round, ScoreError> {
        if !self.players.iter().any(|player| player.id == finisher_id) {
            return Err(ScoreError::UnknownFinisher(finisher_id.to_string()));
        }
        if let Some(id) = raw_scores
            .keys()
            .find(|id| !self.players.iter().any(|player| &player.id == *id))
        {
            return Err(ScoreError::UnknownPlayer(id.clone()));
        }
        if let Some(player) = self
            .players
            .iter()
            .find(|player| !raw_scores.contains_key(&player.id))
        {
            return Err(ScoreError::MissingScore(player.id.clone()));
        }

        let is_strictly_lowest = check_strictly_lowest(finisher_id, raw_scores);
        let scores = raw_scores
            .iter()
            .map(|(id, &raw)| {
                let is_finisher = id.as_str() == finisher_id;
                let final_score = calculate_round_score(raw, is_finisher, is_strictly_lowest);
                (id.clone(), final_score)
            })
            .collect();
        let round = Round {
            id: self.next_round_id,
            raw_scores: raw_scores.clone(),
            scores,
            finisher_id: finisher_id.to_string(),
            is_strictly_lowest,
        };
        self.next_round_id += 1;
        self.rounds.push(round);
        Ok(&self.rounds[self.rounds.len() - 1])
    }

    /// Appends a round scored by virtual play.
    pub fn record_result(&mut self, result: &RoundResult) -> Result<&Round, ScoreError> {
        let finisher = result.finisher_id.as_deref().ok_or(ScoreError::NoFinisher)?;
        self.add_round(&result.raw_scores(), finisher)
    }

    pub fn delete_round(&mut self, round_id: u32) -> Result<Round, ScoreError> {
        let position = self
            .rounds
            .iter()
            .position(|round| round.id == round_id)
            .ok_or(ScoreError::UnknownRound(round_id))?;
        Ok(self.rounds.remove(position))
    }

    /// Totals in seat order.
    pub fn totals(&self) -> Vec<PlayerTotal> {
        self.players
            .iter()
            .map(|player| PlayerTotal {
                player_id: player.id.clone(),
                name: player.name.clone(),
                total: self
                    .rounds
                    .iter()
                    .map(|round| round.scores.get(&player.id).copied().unwrap_or(0))
                    .sum(),
            })
            .collect()
    }

    pub fn total_for(&self, player_id: &str) -> Option<i32> {
        self.totals()
            .into_iter()
            .find(|total| total.player_id == player_id)
            .map(|total| total.total)
    }

    /// Lowest total first; equal totals keep seat order.
    pub fn standings(&self) -> Vec<PlayerTotal> {
        let mut totals = self.totals();
        totals.sort_by_key(|total| total.total);
        totals
    }

    pub fn is_game_over(&self) -> bool {
        self.totals()
            .iter()
            .any(|total| total.total >= self.threshold)
    }

    /// Lowest total once the game is over; the earliest seat wins a tie.
    pub fn winner(&self) -> Option<PlayerTotal> {
        if !self.is_game_over() {
            return None;
        }
        self.standings().into_iter().next()
    }

    /// Clears every round, keeping players and threshold.
    pub fn reset(&mut self) {
        self.rounds.clear();
        self.next_round_id = 1;
    }
}
