//! $402 CLI - price, evaluate and simulate serving-rights purchases

mod commands;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use path402_economics::constants::DEFAULT_SCHEDULE_POINTS;
use path402_wallet::Catalog;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "path402")]
#[command(about = "$402 pricing and serving-rights agent", version)]
struct Cli {
    /// Path to the catalog file
    #[arg(short, long, value_name = "FILE", default_value = "path402.toml")]
    config: PathBuf,

    /// Print structured JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current price and revenue split for an address
    Price {
        /// $address from the catalog
        address: String,
    },

    /// Price at a set of supply levels
    Schedule {
        address: String,

        /// Supply levels to sample
        #[arg(short, long, value_delimiter = ',')]
        points: Option<Vec<u64>>,
    },

    /// Breakeven, ROI projections and revenue outlook
    Economics {
        address: String,

        /// Expected total supply
        #[arg(long)]
        projected: Option<u64>,

        /// Fraction of holders actively serving
        #[arg(long)]
        participation: Option<f64>,
    },

    /// Budget decision for a fresh wallet
    Evaluate {
        address: String,

        /// Maximum acceptable price per token
        #[arg(short, long)]
        max_price: Option<u64>,
    },

    /// Run one agent session over the whole catalog
    Simulate {
        /// Serves to record per held token
        #[arg(short, long, default_value = "3")]
        serves: u64,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let catalog = Catalog::load_from_file(&cli.config)
        .with_context(|| format!("loading catalog {}", cli.config.display()))?;

    log::debug!(
        "Catalog {} loaded: {} offers, balance {}",
        cli.config.display(),
        catalog.content.len(),
        catalog.agent.initial_balance
    );

    match cli.command {
        Commands::Price { address } => {
            let offer = commands::find_offer(&catalog, &address)?;
            let report = commands::price(offer);
            if cli.json {
                print_json(&report)?;
            } else {
                render::price(&report);
            }
        }

        Commands::Schedule { address, points } => {
            let offer = commands::find_offer(&catalog, &address)?;
            let points = points.unwrap_or_else(|| DEFAULT_SCHEDULE_POINTS.to_vec());
            let schedule = commands::schedule(offer, &points);
            if cli.json {
                print_json(&schedule)?;
            } else {
                render::schedule(offer, &schedule);
            }
        }

        Commands::Economics {
            address,
            projected,
            participation,
        } => {
            if let Some(p) = participation {
                anyhow::ensure!(
                    p > 0.0 && p <= 1.0,
                    "participation must be in (0, 1], got {}",
                    p
                );
            }
            let offer = commands::find_offer(&catalog, &address)?;
            let analysis = commands::economics(&catalog, offer, projected, participation);
            if cli.json {
                print_json(&analysis)?;
            } else {
                render::economics(offer, &analysis);
            }
        }

        Commands::Evaluate { address, max_price } => {
            let offer = commands::find_offer(&catalog, &address)?;
            let decision = commands::evaluate(&catalog, offer, max_price);
            if cli.json {
                print_json(&decision)?;
            } else {
                render::decision(&decision);
                println!();
            }
        }

        Commands::Simulate { serves } => {
            let report = commands::simulate(&catalog, serves)?;
            if cli.json {
                print_json(&report)?;
            } else {
                render::simulation(&report);
            }
        }
    }

    Ok(())
}
