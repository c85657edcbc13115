use crate::{
    calculate_final_scores, ConfigError, GameState, Phase, PlayerInfo, RngState, Round,
    RoundError, RoundResult, RuleConfig, ScoreError, ScoreSheet,
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("round error: {0}")]
    Round(#[from] RoundError),
    #[error("score error: {0}")]
    Score(#[from] ScoreError),
    #[error("round {0} already scored")]
    RoundAlreadyScored(u32),
    #[error("round {0} not scored yet")]
    RoundNotScored(u32),
    #[error("game is over")]
    GameOver,
}

/// A full game: consecutive rounds for a fixed set of players until someone
/// reaches the score limit. Each round is a fresh [`GameState`].
#[derive(Debug, Clone)]
pub struct Session {
    config: RuleConfig,
    players: Vec<PlayerInfo>,
    sheet: ScoreSheet,
    state: GameState,
    round_number: u32,
    round_scored: bool,
}

impl Session {
    pub fn new(
        players: Vec<PlayerInfo>,
        config: RuleConfig,
        rng: &mut RngState,
    ) -> Result<Self, SessionError> {
        let state = GameState::deal(&players, &config, rng)?;
        let sheet = ScoreSheet::new(players.clone(), config.score_limit);
        Ok(Self {
            config,
            players,
            sheet,
            state,
            round_number: 1,
            round_scored: false,
        })
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn players(&self) -> &[PlayerInfo] {
        &self.players
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sheet(&self) -> &ScoreSheet {
        &self.sheet
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn is_game_over(&self) -> bool {
        self.sheet.is_game_over()
    }

    /// Replaces the current round state, typically with the result of a
    /// transition on [`Session::state`].
    pub fn set_state(&mut self, state: GameState) {
        self.state = state;
    }

    /// Scores the finished round onto the sheet.
    pub fn end_round(&mut self) -> Result<(RoundResult, &Round), SessionError> {
        if self.state.phase != Phase::Finished {
            return Err(RoundError::InvalidPhase(self.state.phase).into());
        }
        if self.round_scored {
            return Err(SessionError::RoundAlreadyScored(self.round_number));
        }
        let result = calculate_final_scores(&self.state);
        let round = self.sheet.record_result(&result)?;
        self.round_scored = true;
        info!(
            round = self.round_number,
            finisher = ?result.finisher_id,
            strictly_lowest = result.is_strictly_lowest,
            "round scored"
        );
        Ok((result, round))
    }

    pub fn start_next_round(&mut self, rng: &mut RngState) -> Result<(), SessionError> {
        if !self.round_scored {
            return Err(SessionError::RoundNotScored(self.round_number));
        }
        if self.sheet.is_game_over() {
            return Err(SessionError::GameOver);
        }
        self.state = GameState::deal(&self.players, &self.config, rng)?;
        self.round_number += 1;
        self.round_scored = false;
        Ok(())
    }

    /// New game with the same players: scores reset, fresh deal.
    pub fn rematch(&mut self, rng: &mut RngState) -> Result<(), SessionError> {
        self.state = GameState::deal(&self.players, &self.config, rng)?;
        self.sheet.reset();
        self.round_number = 1;
        self.round_scored = false;
        Ok(())
    }
}
