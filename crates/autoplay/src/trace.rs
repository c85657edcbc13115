use crate::{AutoplayError, Difficulty};
use serde::{Deserialize, Serialize};
use skyjo_core::{Action, PlayerScore, PlayerTotal};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    /// Someone reached the score limit.
    GameOver,
    MaxRounds,
    MaxSteps,
    NoLegalAction,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatRecord {
    pub seat: usize,
    pub player_id: String,
    pub name: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepRecord {
    pub step: u32,
    pub seat: usize,
    pub phase_before: String,
    pub turn_phase_before: String,
    pub action: Action,
    /// Card held when the action was chosen.
    #[serde(default)]
    pub drawn_value: Option<i32>,
    pub phase_after: String,
    #[serde(default)]
    pub discard_top_after: Option<i32>,
    pub visible_score_after: i32,
    pub columns_cleared: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundRecord {
    pub round: u32,
    #[serde(default)]
    pub finisher_id: Option<String>,
    pub is_strictly_lowest: bool,
    pub scores: Vec<PlayerScore>,
    pub recycles: u32,
    pub steps: Vec<StepRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    pub rounds: u32,
    pub steps: u32,
    pub wall_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoplayResult {
    pub status: RunStatus,
    pub seed: u64,
    pub seats: Vec<SeatRecord>,
    pub rounds: Vec<RoundRecord>,
    pub totals: Vec<PlayerTotal>,
    #[serde(default)]
    pub winner: Option<PlayerTotal>,
    pub summary: SummaryStats,
}

impl AutoplayResult {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!("status: {}", run_status_label(&self.status)),
            format!("seed: {}", self.seed),
            format!(
                "summary: rounds={} steps={} wall_ms={}",
                self.summary.rounds, self.summary.steps, self.summary.wall_time_ms
            ),
            String::new(),
            "seats:".to_string(),
        ];
        for seat in &self.seats {
            lines.push(format!(
                "  seat {:>2}: {} ({}) {}",
                seat.seat, seat.name, seat.player_id, seat.difficulty
            ));
        }
        lines.push(String::new());
        lines.push("totals:".to_string());
        for total in &self.totals {
            lines.push(format!("  {:<16} {:>5}", total.name, total.total));
        }
        match self.winner.as_ref() {
            Some(winner) => lines.push(format!("winner: {} ({})", winner.name, winner.total)),
            None => lines.push("winner: (none)".to_string()),
        }
        lines.push(String::new());
        for round in &self.rounds {
            lines.push(format!(
                "round {:>3} | finisher={} strictly_lowest={} recycles={}",
                round.round,
                round.finisher_id.as_deref().unwrap_or("-"),
                round.is_strictly_lowest,
                round.recycles
            ));
            for score in &round.scores {
                lines.push(format!(
                    "    {:<16} raw={:>4} final={:>4}{}",
                    score.name,
                    score.raw_score,
                    score.final_score,
                    if score.is_finisher { " *" } else { "" }
                ));
            }
            for step in &round.steps {
                lines.push(format!(
                    "  step {:>4} | seat {} | {}",
                    step.step,
                    step.seat,
                    step.action.short_label()
                ));
                lines.push(format!(
                    "      {} {} -> {} visible={} discard_top={}",
                    step.phase_before,
                    step.turn_phase_before,
                    step.phase_after,
                    step.visible_score_after,
                    step.discard_top_after
                        .map(|value| value.to_string())
                        .unwrap_or_else(|| "-".to_string())
                ));
                if let Some(value) = step.drawn_value {
                    lines.push(format!("      held: {value}"));
                }
                if step.columns_cleared > 0 {
                    lines.push(format!("      columns cleared: {}", step.columns_cleared));
                }
            }
            lines.push(String::new());
        }
        lines.join("\n")
    }
}

fn run_status_label(status: &RunStatus) -> &'static str {
    match status {
        RunStatus::GameOver => "GameOver",
        RunStatus::MaxRounds => "MaxRounds",
        RunStatus::MaxSteps => "MaxSteps",
        RunStatus::NoLegalAction => "NoLegalAction",
    }
}

pub fn write_json(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(result)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, result.to_text_report())?;
    Ok(())
}
