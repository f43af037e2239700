//! Monte Carlo batch over one parameter set
//!
//! Usage: cargo run --bin batch -- --runs 1000 --seed 42 [--params params.json]

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use holding_sim::scenario::Percentiles;
use holding_sim::{BatchSummary, ScenarioRunner, SimulationParameters};

#[derive(Debug, Parser)]
#[command(name = "batch", about = "Run many seeded simulations and summarise closing balances")]
struct Args {
    /// JSON parameter file (defaults are used when omitted)
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Number of simulations
    #[arg(short, long, default_value_t = 1000)]
    runs: usize,

    /// Base seed of the batch
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn print_row(label: &str, p: &Percentiles) {
    println!("  {:<12} mean={:>14.2} p10={:>14.2} p50={:>14.2} p90={:>14.2}",
        label, p.mean, p.p10, p.p50, p.p90);
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = match &args.params {
        Some(path) => SimulationParameters::from_json_file(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => SimulationParameters::default(),
    }
    .sanitized();

    let runner = ScenarioRunner::new(params).context("invalid simulation parameters")?;

    let start = Instant::now();
    let results = runner.run_batch(args.runs, args.seed);
    let summary = BatchSummary::from_results(&results);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Batch of {} runs over {} months in {:?}",
        summary.runs, runner.params().months(), start.elapsed());
    println!("\nClosing capital:");
    print_row("Holding", &summary.holding);
    print_row("Subsidiary", &summary.subsidiary);
    println!("\n  Runs ending with negative holding capital: {:.1}%",
        summary.holding_shortfall_rate * 100.0);

    Ok(())
}
