use std::path::PathBuf;

use clap::Parser;

use rps_bench::config::{ResolvedOutputs, SessionConfig};
use rps_bench::logging::init_logging;
use rps_bench::runner::SessionRunner;
use rps_bot::StrategyKind;
use rps_core::network::NetworkVariant;

/// Headless match harness for the rock-paper-scissors predictor.
#[derive(Debug, Parser)]
#[command(
    name = "rps-bench",
    author,
    version,
    about = "Deterministic rock-paper-scissors prediction harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/session.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of rounds to play.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<usize>,

    /// Override the RNG seed for both players.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the computer strategy (random, win-stay_lose-shift, win-shift_lose-shift).
    #[arg(long, value_name = "STRATEGY")]
    strategy: Option<StrategyKind>,

    /// Override the network topology (direct or inverted).
    #[arg(long, value_name = "NETWORK")]
    network: Option<NetworkVariant>,

    /// Exit after validating the configuration (no match is played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SessionConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(rounds) = cli.rounds {
        config.session.rounds = rounds;
    }

    if let Some(seed) = cli.seed {
        config.session.seed = Some(seed);
    }

    if let Some(strategy) = cli.strategy {
        config.session.strategy = strategy;
    }

    if let Some(network) = cli.network {
        config.session.network = network;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let rounds = config.session.rounds;

    println!(
        "Loaded configuration '{run_id}': {rounds} round{} vs {} with the {} network",
        if rounds == 1 { "" } else { "s" },
        config.session.strategy,
        config.session.network
    );

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = SessionRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: match execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Match complete for '{run_id}': {} rounds → {} rows at {}",
        summary.rounds_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!(
        "Total score: human {}, computer {}, ties {}. {}.",
        summary.scores.human(),
        summary.scores.computer(),
        summary.scores.ties(),
        summary.report.verdict()
    );
    if let Some(rate) = summary.report.prediction_hit_rate {
        println!("Adviser hit rate: {:.1}%", rate * 100.0);
    }
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(dataset_path) = summary.dataset_path.as_ref() {
        println!("Played rounds saved to {}", dataset_path.display());
    }
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
