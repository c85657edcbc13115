//! Command-line front end: bot self-play, manual round scoring and the rule
//! set in force.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use skyjo_autoplay::{run_autoplay, write_json, write_text, AutoplayConfig, Difficulty, RunStatus};
use skyjo_core::{PlayerInfo, RuleConfig, ScoreSheet};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "skyjo")]
#[command(about = "Skyjo rules engine, bots and score keeper")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Show progress output
    #[arg(long, global = true)]
    show_output: bool,

    /// Rule config JSON file; defaults to the standard rules
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Let bots play complete games against each other
    Simulate(SimulateArgs),
    /// Score one manually entered round
    Score(ScoreArgs),
    /// Print the rule config as JSON
    Rules,
}

#[derive(Args)]
struct SimulateArgs {
    /// Number of games to play
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Comma-separated tier per seat (normal, hard, hardcore)
    #[arg(long, value_delimiter = ',', default_value = "normal,hard,hardcore")]
    seats: Vec<Difficulty>,

    /// Seed of the first game; later games add their index
    #[arg(long)]
    seed: Option<u64>,

    /// Give up on a game after this many rounds
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Write each game's trace as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write each game's trace as a text report
    #[arg(long)]
    text: Option<PathBuf>,
}

#[derive(Args)]
struct ScoreArgs {
    /// Id of the player who revealed their grid first
    #[arg(long)]
    finisher: String,

    /// Score limit used to report whether the game would end
    #[arg(long)]
    threshold: Option<i32>,

    /// Raw scores as id=score
    #[arg(required = true)]
    scores: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rules = load_rules(cli.rules.as_deref())?;
    match cli.command {
        Command::Simulate(args) => simulate(&args, rules),
        Command::Score(args) => score(&args, &rules),
        Command::Rules => {
            println!("{}", serde_json::to_string_pretty(&rules)?);
            Ok(())
        }
    }
}

fn load_rules(path: Option<&Path>) -> Result<RuleConfig> {
    let Some(path) = path else {
        return Ok(RuleConfig::default());
    };
    let body = fs::read_to_string(path)
        .with_context(|| format!("reading rules from {}", path.display()))?;
    let rules: RuleConfig = serde_json::from_str(&body)
        .with_context(|| format!("parsing rules from {}", path.display()))?;
    rules.validate().context("invalid rules")?;
    Ok(rules)
}

#[derive(Debug, Default)]
struct TierTally {
    seats: u32,
    wins: u32,
    total_points: i64,
}

fn simulate(args: &SimulateArgs, rules: RuleConfig) -> Result<()> {
    if args.seats.is_empty() {
        bail!("at least one seat is required");
    }
    rules
        .check_player_count(args.seats.len())
        .context("seat count does not fit the rules")?;

    let defaults = AutoplayConfig::default();
    let base_seed = args.seed.unwrap_or(defaults.seed);
    let mut tally: BTreeMap<Difficulty, TierTally> = BTreeMap::new();
    let mut unfinished = 0u32;

    for game in 0..args.games {
        let config = AutoplayConfig {
            seed: base_seed.wrapping_add(u64::from(game)),
            max_rounds: args.max_rounds.unwrap_or(defaults.max_rounds),
            seats: args.seats.clone(),
            rules: rules.clone(),
            ..defaults.clone()
        };
        let result = run_autoplay(&config)
            .with_context(|| format!("game {game} (seed {})", config.seed))?;
        info!(game, status = ?result.status, rounds = result.rounds.len(), "game complete");
        if result.status != RunStatus::GameOver {
            warn!(game, status = ?result.status, "game ended early");
            unfinished += 1;
        }

        for (seat, total) in result.seats.iter().zip(&result.totals) {
            let entry = tally.entry(seat.difficulty).or_default();
            entry.seats += 1;
            entry.total_points += i64::from(total.total);
            if result
                .winner
                .as_ref()
                .is_some_and(|winner| winner.player_id == total.player_id)
            {
                entry.wins += 1;
            }
        }

        let winner = result
            .winner
            .as_ref()
            .map(|winner| format!("{} ({})", winner.name, winner.total))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "game {:>3} seed {:>20} rounds {:>3} winner {}",
            game,
            config.seed,
            result.rounds.len(),
            winner
        );

        if let Some(path) = args.json.as_deref() {
            let path = numbered(path, game, args.games);
            write_json(&path, &result)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        if let Some(path) = args.text.as_deref() {
            let path = numbered(path, game, args.games);
            write_text(&path, &result)
                .with_context(|| format!("writing {}", path.display()))?;
        }
    }

    println!();
    for (difficulty, entry) in &tally {
        let average = if entry.seats == 0 {
            0.0
        } else {
            entry.total_points as f64 / f64::from(entry.seats)
        };
        println!(
            "{:<9} seats {:>4} wins {:>4} avg points {:>7.1}",
            difficulty.label(),
            entry.seats,
            entry.wins,
            average
        );
    }
    if unfinished > 0 {
        println!("unfinished games: {unfinished}");
    }
    Ok(())
}

/// `trace.json` becomes `trace-3.json` when several games are written.
fn numbered(path: &Path, game: u32, games: u32) -> PathBuf {
    if games <= 1 {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trace".to_string());
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{game}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{game}"),
    };
    path.with_file_name(name)
}

fn parse_score(entry: &str) -> Result<(String, i32)> {
    let Some((id, value)) = entry.split_once('=') else {
        bail!("expected id=score, got {entry}");
    };
    let id = id.trim();
    if id.is_empty() {
        bail!("missing player id in {entry}");
    }
    let value = value
        .trim()
        .parse::<i32>()
        .with_context(|| format!("bad score in {entry}"))?;
    Ok((id.to_string(), value))
}

fn score(args: &ScoreArgs, rules: &RuleConfig) -> Result<()> {
    let mut raw = BTreeMap::new();
    let mut players = Vec::new();
    for entry in &args.scores {
        let (id, value) = parse_score(entry)?;
        if raw.insert(id.clone(), value).is_some() {
            bail!("player {id} scored twice");
        }
        players.push(PlayerInfo::new(id.clone(), id));
    }

    let threshold = args.threshold.unwrap_or(rules.score_limit);
    let mut sheet = ScoreSheet::new(players, threshold);
    let round = sheet
        .add_round(&raw, &args.finisher)
        .context("scoring round")?
        .clone();

    println!(
        "finisher {} strictly lowest: {}",
        round.finisher_id, round.is_strictly_lowest
    );
    for player in sheet.players() {
        let raw_score = round.raw_scores.get(&player.id).copied().unwrap_or_default();
        let final_score = round.scores.get(&player.id).copied().unwrap_or_default();
        let marker = if player.id == round.finisher_id { " *" } else { "" };
        println!("  {:<16} raw {:>4} final {:>4}{marker}", player.id, raw_score, final_score);
    }
    if sheet.is_game_over() {
        println!("score limit {threshold} reached");
    }
    Ok(())
}
