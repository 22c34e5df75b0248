use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use game_engine::{GameConfig, PlayerCharacter, SleepSettings};
use game_regression::{run_session, Action, SessionEvent, SessionTrace};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Create and exercise a player character")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the state of a freshly created character.
    Inspect(InspectArgs),
    /// Apply a sequence of actions and print every notification raised.
    Simulate(SimulateArgs),
}

#[derive(Args)]
struct CharacterArgs {
    /// TOML file with `[player]` and `[sleep]` tables.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    nickname: Option<String>,
}

#[derive(Args)]
struct InspectArgs {
    #[command(flatten)]
    character: CharacterArgs,
}

#[derive(Args)]
struct SimulateArgs {
    #[command(flatten)]
    character: CharacterArgs,
    /// Overrides `sleep.seed` from the config.
    #[arg(long)]
    seed: Option<u64>,
    /// `sleep` or `damage:<amount>`; repeat to build a script.
    #[arg(long = "action", required = true)]
    actions: Vec<Action>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
    let cli = Cli::parse();
    match cli.command {
        Commands::Inspect(args) => handle_inspect(args),
        Commands::Simulate(args) => handle_simulate(args),
    }
}

fn handle_inspect(args: InspectArgs) -> Result<()> {
    let player = build_character(&args.character, None)?;
    println!("{}", serde_json::to_string_pretty(&player.snapshot())?);
    Ok(())
}

fn handle_simulate(args: SimulateArgs) -> Result<()> {
    let mut player = build_character(&args.character, args.seed)?;
    let started_at = Utc::now().to_rfc3339();
    info!(target: "player_cli", actions = args.actions.len(), seed = player.sleep_seed(), "simulating");

    let trace = run_session(&mut player, &args.actions);
    let report = session_report(&trace, &started_at);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// `events` lists every notification of the session in order; `steps` keeps
/// the per-action breakdown.
fn session_report(trace: &SessionTrace, started_at: &str) -> serde_json::Value {
    let events: Vec<&SessionEvent> = trace.steps.iter().flat_map(|s| &s.events).collect();
    serde_json::json!({
        "started_at": started_at,
        "seed": trace.seed,
        "events": events,
        "steps": trace.steps,
        "final": trace.final_state,
    })
}

fn build_character(args: &CharacterArgs, seed: Option<u64>) -> Result<PlayerCharacter> {
    let mut config = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => GameConfig {
            sleep: SleepSettings::from_env(),
            ..GameConfig::default()
        },
    };
    if let Some(seed) = seed {
        config.sleep.seed = seed;
    }

    let mut player = PlayerCharacter::with_config(config)?;
    if let Some(first_name) = &args.first_name {
        player.set_first_name(first_name.as_str());
    }
    if let Some(last_name) = &args.last_name {
        player.set_last_name(last_name.as_str());
    }
    if let Some(nickname) = &args.nickname {
        player.set_nickname(nickname.as_str());
    }
    Ok(player)
}

fn load_config(path: &Path) -> Result<GameConfig> {
    GameConfig::from_path(path).with_context(|| format!("failed to load {}", path.display()))
}
