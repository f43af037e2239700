//! Holding Sim CLI
//!
//! Runs one holding/subsidiary simulation and writes the monthly results to CSV

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use holding_sim::export::{default_file_name, write_csv_file, DEFAULT_EXPORT_PREFIX};
use holding_sim::{SimulationEngine, SimulationParameters};

#[derive(Debug, Parser)]
#[command(name = "holding-sim", version, about = "Holding / subsidiary cash flow projection")]
struct Args {
    /// JSON parameter file (defaults are used when omitted)
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Override the number of months to simulate
    #[arg(short, long)]
    months: Option<i32>,

    /// Seed for reproducible draws (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// CSV output path (defaults to a dated file name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of months to print to the console
    #[arg(long, default_value_t = 12)]
    print: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Holding Sim v{}", env!("CARGO_PKG_VERSION"));
    println!("================\n");

    let mut params = match &args.params {
        Some(path) => SimulationParameters::from_json_file(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => SimulationParameters::default(),
    };
    if let Some(months) = args.months {
        params.duration_months = months;
    }
    let params = params.sanitized();

    println!("Parameters:");
    println!("  Duration: {} months", params.duration_months);
    println!("  Holding revenue/charges: {:.2} / {:.2}",
        params.base_monthly_revenue_holding, params.base_monthly_charges_holding);
    println!("  Subsidiary revenue/charges: {:.2} / {:.2}",
        params.base_monthly_revenue_subsidiary, params.base_monthly_charges_subsidiary);
    println!("  Volatility: {:.1}%, growth: {:.1}%/month",
        params.volatility * 100.0, params.monthly_growth_rate * 100.0);
    println!("  Shareholders: {}", params.shareholders.len());
    println!("  Reversal policy: {}", params.reversal_policy.tag());
    println!();

    let engine = SimulationEngine::new(params).context("invalid simulation parameters")?;
    let result = match args.seed {
        Some(seed) => engine.run_seeded(seed),
        None => engine.run(),
    };

    println!("{:>5} {:>12} {:>12} {:>12} {:>10} {:>12} {:>10} {:>10} {:>14} {:>14}",
        "Month", "Rev H", "Chg H", "Result H", "IS", "Profit Net", "Div SH", "Transfer", "Capital H", "Capital F");
    println!("{}", "-".repeat(130));

    for row in result.months.iter().take(args.print) {
        println!("{:>5} {:>12.2} {:>12.2} {:>12.2} {:>10.2} {:>12.2} {:>10.2} {:>10.2} {:>14.2} {:>14.2}",
            row.month,
            row.revenue_holding,
            row.charges_holding,
            row.result_holding,
            row.is_amount,
            row.profit_net,
            row.shareholders_dividends,
            row.holding_to_subsidiary,
            row.holding_capital,
            row.subsidiary_capital,
        );
    }
    if result.len() > args.print {
        println!("... ({} more months)", result.len() - args.print);
    }

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(default_file_name(DEFAULT_EXPORT_PREFIX, chrono::Local::now().date_naive()))
    });
    write_csv_file(&result.months, &output)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("\nFull results written to: {}", output.display());

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Total Months: {}", summary.total_months);
    println!("  Total IS: {:.2}", summary.total_tax);
    println!("  Total Dividend on Profit: {:.2}", summary.total_dividend_on_profit);
    println!("  Total Shareholder Dividends: {:.2}", summary.total_shareholders_dividends);
    println!("  Total Transfers: {:.2}", summary.total_transfers);
    println!("  Final Holding Capital: {:.2}", summary.final_holding_capital);
    println!("  Final Subsidiary Capital: {:.2}", summary.final_subsidiary_capital);

    Ok(())
}
