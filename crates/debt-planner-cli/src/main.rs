mod commands;
mod config;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use serde::Deserialize;
use std::process;

use commands::engine::ComputeArgs;
use commands::projection::{PortfolioArgs, SavingsArgs};
use config::CliConfig;

/// Debt payoff schedules and portfolio projections
#[derive(Parser)]
#[command(
    name = "dpl",
    version,
    about = "Debt payoff schedules and portfolio projections",
    long_about = "Computes months to payoff, total interest and total paid for credit \
                  cards, installment loans and mortgages, then projects portfolio \
                  payoff dates at current pace, with extra payments and in the best case."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format [default: json]
    #[arg(long, global = true)]
    output: Option<OutputFormat>,

    /// YAML file with default leftover, extra payment, date and output format
    #[arg(long, global = true)]
    config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the payoff summary of each debt
    Compute(ComputeArgs),
    /// Project weeks to debt-free at current pace, with extras and best case
    Project(PortfolioArgs),
    /// Estimate interest saved by an extra monthly payment
    Savings(SavingsArgs),
    /// Full portfolio analysis with totals, projection and savings
    Analyze(PortfolioArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG, when set, takes precedence over -v.
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .parse_default_env()
        .init();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    let format = cli
        .output
        .clone()
        .or_else(|| config.output.clone())
        .unwrap_or(OutputFormat::Json);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compute(args) => commands::engine::run_compute(args),
        Commands::Project(args) => commands::projection::run_project(args, &config),
        Commands::Savings(args) => commands::projection::run_savings(args),
        Commands::Analyze(args) => commands::projection::run_analyze(args, &config),
        Commands::Version => {
            println!("dpl {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
