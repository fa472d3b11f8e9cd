//! trip-settlement CLI
//!
//! Settle a trip snapshot from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Settle a trip from a JSON request file
//! trip-settlement settle --input trip.json
//!
//! # JSON response, largest balances matched first, with budget status
//! trip-settlement settle --input trip.json --format json --order largest --budget 1500
//!
//! # Generate a random trip for testing
//! trip-settlement generate --participants 8 --expenses 4 --seed 7
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs;
use trip_settlement::analysis::budget::BudgetStatus;
use trip_settlement::analysis::category::CategoryBreakdown;
use trip_settlement::core::money::{MatchOrder, MoneyPolicy};
use trip_settlement::core::snapshot::SettlementRequest;
use trip_settlement::settlement::report::{SettlementEngine, SettlementResult};
use trip_settlement::simulation::trip_generator::{generate_random_request, TripConfig};

/// Group-travel expense settlement
#[derive(Parser)]
#[command(name = "trip-settlement")]
#[command(about = "Compute balances and settle-up payments for a shared trip")]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Settle a trip described by a JSON request file
    Settle {
        /// Path to the JSON request
        #[arg(short, long)]
        input: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Greedy matching order: roster or largest
        #[arg(long, default_value = "roster")]
        order: MatchOrder,

        /// Trip budget to report spend against (e.g. "1500" or "1499.99")
        #[arg(long)]
        budget: Option<String>,

        /// Include the per-category spend breakdown
        #[arg(long)]
        categories: bool,
    },

    /// Generate a random trip request
    Generate {
        /// Number of participants
        #[arg(long, default_value_t = 6)]
        participants: usize,

        /// Expenses logged per participant
        #[arg(long, default_value_t = 3)]
        expenses: usize,

        /// Seed for a reproducible trip
        #[arg(long)]
        seed: Option<u64>,

        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// JSON output: the settlement response plus any requested analyses.
#[derive(Serialize)]
struct SettleOutput<'a> {
    #[serde(flatten)]
    settlement: &'a SettlementResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    budget: Option<&'a BudgetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<&'a CategoryBreakdown>,
}

fn load_request(path: &str) -> Result<SettlementRequest> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading request file '{}'", path))?;
    serde_json::from_str(&content).with_context(|| {
        format!(
            "parsing '{}'; expected {}",
            path,
            r#"{ "participants": [{ "id": "a", "name": "Alice" }], "expenses": [{ "payer_id": "a", "amount": 90 }] }"#
        )
    })
}

fn cmd_settle(
    input: &str,
    format: Format,
    order: MatchOrder,
    budget: Option<&str>,
    categories: bool,
) -> Result<()> {
    let snapshot = load_request(input)?.into_snapshot()?;
    let engine = SettlementEngine::with_policy(MoneyPolicy::default().with_match_order(order));
    let result = engine
        .settle(&snapshot)
        .with_context(|| format!("settling trip '{}'", snapshot.trip_id()))?;

    let budget_status = match budget {
        Some(raw) => {
            let amount: Decimal = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid budget '{}'", raw))?;
            Some(BudgetStatus::evaluate(amount, snapshot.total_spent()?)?)
        }
        None => None,
    };
    let breakdown = if categories {
        Some(CategoryBreakdown::from_expenses(snapshot.expenses())?)
    } else {
        None
    };

    info!(
        "trip {}: {} participants, {} expenses, {} transfers",
        snapshot.trip_id(),
        snapshot.roster().len(),
        snapshot.expenses().len(),
        result.transfers().len()
    );

    match format {
        Format::Json => {
            let output = SettleOutput {
                settlement: &result,
                budget: budget_status.as_ref(),
                categories: breakdown.as_ref(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Text => {
            println!("{}", result);
            if let Some(status) = &budget_status {
                println!("{}", status);
            }
            if let Some(breakdown) = &breakdown {
                println!("{}", breakdown);
            }
        }
    }
    Ok(())
}

fn cmd_generate(
    participants: usize,
    expenses: usize,
    seed: Option<u64>,
    output: Option<&str>,
) -> Result<()> {
    if participants == 0 {
        bail!("--participants must be at least 1");
    }

    let config = TripConfig {
        participant_count: participants,
        expenses_per_participant: expenses,
        seed,
        ..Default::default()
    };
    let request = generate_random_request(&config);
    let json = serde_json::to_string_pretty(&request)?;

    match output {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("writing to '{}'", path))?;
            eprintln!(
                "Generated {} expenses across {} participants → {}",
                request.expenses.len(),
                participants,
                path
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Settle {
            input,
            format,
            order,
            budget,
            categories,
        } => cmd_settle(&input, format, order, budget.as_deref(), categories),
        Commands::Generate {
            participants,
            expenses,
            seed,
            output,
        } => cmd_generate(participants, expenses, seed, output.as_deref()),
    }
}
