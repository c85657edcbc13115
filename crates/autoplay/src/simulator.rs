use crate::{
    AutoplayConfig, AutoplayError, AutoplayResult, Bot, RoundRecord, RunStatus, SeatRecord,
    StepRecord, SummaryStats,
};
use skyjo_core::{GameState, Phase, PlayerInfo, RngState, Session};
use std::time::Instant;
use tracing::{debug, info};

/// A table of bots playing a full game, one action at a time.
#[derive(Debug)]
pub struct Simulator {
    pub session: Session,
    bots: Vec<Bot>,
    deal_rng: RngState,
}

impl Simulator {
    pub fn new(config: &AutoplayConfig) -> Result<Self, AutoplayError> {
        let mut deal_rng = RngState::from_seed(config.seed);
        let players = seat_players(config);
        let bots = config
            .seats
            .iter()
            .map(|&difficulty| Bot::new(difficulty, deal_rng.next_u64()))
            .collect();
        let session = Session::new(players, config.rules.clone(), &mut deal_rng)?;
        Ok(Self {
            session,
            bots,
            deal_rng,
        })
    }

    pub fn state(&self) -> &GameState {
        self.session.state()
    }

    /// Seat expected to act next: the first seat still owing its opening
    /// reveal, then whoever holds the turn.
    pub fn next_actor(&self) -> Option<usize> {
        let state = self.state();
        match state.phase {
            Phase::InitialReveal => state
                .valid_actions()
                .reveal_initial
                .first()
                .map(|option| option.player_index),
            Phase::Playing | Phase::FinalRound => Some(state.current_player_index),
            Phase::Finished => None,
        }
    }

    /// Plans and applies one action. `Ok(None)` once the round is over.
    pub fn step(&mut self, step: u32) -> Result<Option<StepRecord>, AutoplayError> {
        let Some(seat) = self.next_actor() else {
            return Ok(None);
        };
        let before = self.session.state();
        let view = before.view_for(seat)?;
        let bot = self
            .bots
            .get_mut(seat)
            .ok_or(AutoplayError::NoLegalAction(seat))?;
        let action = bot.plan(&view).ok_or(AutoplayError::NoLegalAction(seat))?;

        let after = before.apply(&action)?;
        let record = StepRecord {
            step,
            seat,
            phase_before: format!("{:?}", before.phase),
            turn_phase_before: format!("{:?}", before.turn_phase),
            action,
            drawn_value: before.drawn_card.map(|card| card.value),
            phase_after: format!("{:?}", after.phase),
            discard_top_after: after.discard_top().map(|card| card.value),
            visible_score_after: after.players[seat].hand.visible_score(),
            columns_cleared: (after.cleared.len() - before.cleared.len()) / 3,
        };
        self.session.set_state(after);
        Ok(Some(record))
    }

    /// Steps until the round finishes or `max_steps` runs out.
    pub fn play_round(&mut self, max_steps: u32) -> Result<(Vec<StepRecord>, bool), AutoplayError> {
        let mut steps = Vec::new();
        for step in 0..max_steps {
            match self.step(step)? {
                Some(record) => steps.push(record),
                None => return Ok((steps, true)),
            }
        }
        let finished = self.state().phase == Phase::Finished;
        Ok((steps, finished))
    }

    pub fn seat_records(&self) -> Vec<SeatRecord> {
        self.session
            .players()
            .iter()
            .zip(&self.bots)
            .enumerate()
            .map(|(seat, (player, bot))| SeatRecord {
                seat,
                player_id: player.id.clone(),
                name: player.name.clone(),
                difficulty: bot.difficulty(),
            })
            .collect()
    }
}

fn seat_players(config: &AutoplayConfig) -> Vec<PlayerInfo> {
    config
        .seats
        .iter()
        .enumerate()
        .map(|(seat, difficulty)| {
            PlayerInfo::new(format!("bot-{seat}"), format!("Bot {} ({difficulty})", seat + 1))
        })
        .collect()
}

/// Plays one seeded game to the score limit, or until a round or step cap
/// stops it.
pub fn run_autoplay(config: &AutoplayConfig) -> Result<AutoplayResult, AutoplayError> {
    let started_at = Instant::now();
    let mut sim = Simulator::new(config)?;
    let seats = sim.seat_records();
    let mut rounds = Vec::new();
    let mut total_steps: u32 = 0;
    let mut status = None;

    for _ in 0..config.max_rounds {
        let round = sim.session.round_number();
        let (steps, finished) = match sim.play_round(config.max_steps_per_round) {
            Ok(value) => value,
            Err(AutoplayError::NoLegalAction(seat)) => {
                debug!(round, seat, "no legal action");
                status = Some(RunStatus::NoLegalAction);
                break;
            }
            Err(err) => return Err(err),
        };
        total_steps = total_steps.saturating_add(steps.len() as u32);
        if !finished {
            status = Some(RunStatus::MaxSteps);
            break;
        }

        let recycles = sim.state().recycles;
        let (result, _) = sim.session.end_round()?;
        info!(
            round,
            steps = steps.len(),
            finisher = ?result.finisher_id,
            "round played"
        );
        rounds.push(RoundRecord {
            round,
            finisher_id: result.finisher_id,
            is_strictly_lowest: result.is_strictly_lowest,
            scores: result.scores,
            recycles,
            steps,
        });

        if sim.session.is_game_over() {
            status = Some(RunStatus::GameOver);
            break;
        }
        sim.session.start_next_round(&mut sim.deal_rng)?;
    }

    let round_count = rounds.len() as u32;
    let sheet = sim.session.sheet();
    let winner = sheet.winner();
    if let Some(winner) = winner.as_ref() {
        info!(winner = %winner.name, total = winner.total, "game over");
    }
    Ok(AutoplayResult {
        status: status.unwrap_or(RunStatus::MaxRounds),
        seed: config.seed,
        seats,
        rounds,
        totals: sheet.totals(),
        winner,
        summary: SummaryStats {
            rounds: round_count,
            steps: total_steps,
            wall_time_ms: started_at.elapsed().as_millis() as u64,
        },
    })
}
