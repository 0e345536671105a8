use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ultimate_ttt::ai::{Agent, LineCompleterAgent, RandomAgent};
use ultimate_ttt::config::AppConfig;
use ultimate_ttt::error::MatchError;
use ultimate_ttt::game::{encode_log, GameOutcome, GameState, Player};

/// Pit two agents against each other over a batch of games.
#[derive(Parser)]
#[command(name = "ultimate_ttt", about = "Ultimate Tic-Tac-Toe self-play driver")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Override agent playing X: random or line-completer
    #[arg(long)]
    player_x: Option<String>,

    /// Override agent playing O
    #[arg(long)]
    player_o: Option<String>,

    /// Override RNG seed (omit for OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Override path for per-game JSON records
    #[arg(long)]
    record: Option<PathBuf>,

    /// Print each game's encoded log
    #[arg(long)]
    verbose: bool,
}

/// One finished game, as persisted to the record file.
#[derive(Debug, serde::Serialize)]
struct GameRecord {
    log: String,
    plies: usize,
    outcome: String,
}

fn build_agent(kind: &str, seed: Option<u64>) -> Result<Box<dyn Agent>, MatchError> {
    match kind {
        "random" => Ok(match seed {
            Some(seed) => Box::new(RandomAgent::seeded(seed)),
            None => Box::new(RandomAgent::new()),
        }),
        "line-completer" => Ok(match seed {
            Some(seed) => Box::new(LineCompleterAgent::seeded(seed)),
            None => Box::new(LineCompleterAgent::new()),
        }),
        other => Err(MatchError::UnknownAgent(other.to_string())),
    }
}

/// Drive one game to completion, enforcing the agent contract on every ply.
fn play_game(agent_x: &mut dyn Agent, agent_o: &mut dyn Agent) -> Result<GameState, MatchError> {
    let mut state = GameState::initial();
    loop {
        let view = state.view();
        let agent: &mut dyn Agent = if state.player_to_move() == Player::X {
            &mut *agent_x
        } else {
            &mut *agent_o
        };
        let mv = agent.select_move(&view);
        if !state.is_legal(mv) {
            return Err(MatchError::IllegalMove {
                agent: agent.name().to_string(),
                mv,
                legal: view.legal_moves,
            });
        }
        state.apply_move(mv);
        if state.just_finished() {
            return Ok(state);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(games) = cli.games {
        config.selfplay.games = games;
    }
    if let Some(player_x) = cli.player_x {
        config.selfplay.player_x = player_x;
    }
    if let Some(player_o) = cli.player_o {
        config.selfplay.player_o = player_o;
    }
    if let Some(seed) = cli.seed {
        config.selfplay.seed = Some(seed);
    }
    if let Some(record) = cli.record {
        config.selfplay.record_path = Some(record);
    }
    config.validate().context("validating configuration")?;

    let selfplay = &config.selfplay;
    let mut agent_x = build_agent(&selfplay.player_x, selfplay.seed)?;
    let mut agent_o = build_agent(&selfplay.player_o, selfplay.seed.map(|s| s.wrapping_add(1)))?;

    let mut x_wins = 0usize;
    let mut o_wins = 0usize;
    let mut stale = 0usize;
    let mut records = Vec::with_capacity(selfplay.games);

    for game in 0..selfplay.games {
        let state = play_game(agent_x.as_mut(), agent_o.as_mut())
            .with_context(|| format!("playing game {}", game + 1))?;
        let outcome = state.outcome().context("finished game has no outcome")?;
        let label = match outcome {
            GameOutcome::Winner(player) => player.name().to_string(),
            GameOutcome::Stale => "stale".to_string(),
        };
        if cli.verbose {
            println!(
                "game {:>4}: {:>2} plies, {:<5} | {}",
                game + 1,
                state.move_count(),
                label,
                encode_log(&state)
            );
        }
        match outcome {
            GameOutcome::Winner(Player::X) => x_wins += 1,
            GameOutcome::Winner(Player::O) => o_wins += 1,
            GameOutcome::Stale => stale += 1,
        }
        records.push(GameRecord {
            log: encode_log(&state),
            plies: state.move_count(),
            outcome: label,
        });
    }

    println!(
        "{} games: X ({}) won {}, O ({}) won {}, {} stale",
        selfplay.games,
        agent_x.name(),
        x_wins,
        agent_o.name(),
        o_wins,
        stale
    );

    if let Some(path) = &selfplay.record_path {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating record file {}", path.display()))?;
        serde_json::to_writer_pretty(file, &records)
            .with_context(|| format!("writing records to {}", path.display()))?;
        println!("Wrote {} game records to {}", records.len(), path.display());
    }

    Ok(())
}
