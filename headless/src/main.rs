use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use pickle_core::{
    Collaborators, Config, Difficulty, GamePhase, GameRng, Match, MemoryLeaderboard, RandomSource,
};
use proto::Command;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod host;

use host::{apply, attach_autopilot, snapshot, LogAudio, LogEffects};

#[derive(Parser, Debug)]
#[command(name = "pickle-headless")]
#[command(about = "Runs a pickleball match against the AI with an autopilot human")]
struct Cli {
    /// JSON config file; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for reproducible matches (entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// AI opponent skill; the config file decides when omitted
    #[arg(long, value_enum)]
    difficulty: Option<CliDifficulty>,
    /// Skill of the autopilot playing the human side, 0..1
    #[arg(long, default_value_t = 0.8)]
    autopilot: f32,
    /// Hold the power-shot key for the whole match
    #[arg(long)]
    power_shots: bool,
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Give up after this much simulated time
    #[arg(long, default_value_t = 900.0)]
    max_seconds: f32,
    /// Write length-prefixed postcard frames here
    #[arg(long)]
    record: Option<PathBuf>,
    /// Name the leaderboard records the human's score under
    #[arg(long, default_value = pickle_core::GUEST)]
    name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliDifficulty {
    Easy,
    Medium,
    Hard,
}

impl From<CliDifficulty> for Difficulty {
    fn from(value: CliDifficulty) -> Self {
        match value {
            CliDifficulty::Easy => Difficulty::Easy,
            CliDifficulty::Medium => Difficulty::Medium,
            CliDifficulty::Hard => Difficulty::Hard,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None => return Ok(Config::new()),
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: Config = serde_json::from_str(&raw)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(level) = cli.difficulty {
        config.difficulty = level.into();
    }

    let rng: Box<dyn RandomSource> = match cli.seed {
        Some(seed) => Box::new(GameRng::new(seed)),
        None => Box::new(GameRng::from_entropy()),
    };

    let mut game = Match::new(config, rng);
    attach_autopilot(&mut game, cli.autopilot)?;
    let mut collab = Collaborators::new(
        Box::new(LogAudio),
        Box::new(LogEffects),
        Box::new(MemoryLeaderboard::new()),
    )
    .with_identity(cli.name.as_str());

    info!(difficulty = ?game.config.difficulty, seed = ?cli.seed, "match starting");
    apply(&mut game, Command::Start);

    let fps = cli.fps.max(1);
    let dt = 1.0 / fps as f32;
    let max_ticks = (cli.max_seconds.max(0.0) * fps as f32) as u32;
    let mut recording = Vec::new();

    for tick in 0..max_ticks {
        apply(
            &mut game,
            Command::Input {
                move_left: false,
                move_right: false,
                power_shot: cli.power_shots,
            },
        );
        game.update(dt);
        collab.dispatch(&game.events);

        if cli.record.is_some() {
            let record = snapshot(&game, tick)
                .to_record()
                .map_err(|e| anyhow!("encoding frame {}: {}", tick, e))?;
            recording.extend_from_slice(&record);
        }

        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    if let Some(path) = &cli.record {
        fs::write(path, &recording)
            .with_context(|| format!("writing recording {}", path.display()))?;
        info!(bytes = recording.len(), path = %path.display(), "recording saved");
    }

    if game.phase() != GamePhase::GameOver {
        info!("time limit reached before the match was decided");
    }
    println!("Final score: player {} - ai {}", game.score.player, game.score.ai);
    if let Some(status) = &collab.status {
        println!("{}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_is_a_value_enum() {
        let cli = Cli::try_parse_from(["pickle-headless", "--difficulty", "hard"]).expect("parse");
        assert_eq!(cli.difficulty, Some(CliDifficulty::Hard));
        assert_eq!(Difficulty::from(CliDifficulty::Hard), Difficulty::Hard);

        let err = Cli::try_parse_from(["pickle-headless", "--difficulty", "nightmare"])
            .expect_err("unknown level");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pickle-headless"]).expect("parse");
        assert_eq!(cli.difficulty, None);
        assert_eq!(cli.name, pickle_core::GUEST);
        assert_eq!(cli.fps, 60);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let path = std::env::temp_dir().join(format!("pickle-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"restitution": 1.2}"#).expect("write config");
        let err = load_config(Some(&path)).expect_err("restitution of 1.2 gains energy");
        fs::remove_file(&path).ok();
        assert!(format!("{:#}", err).contains("restitution"));

        assert_eq!(load_config(None).expect("defaults"), Config::new());
    }
}
