//! U-Cartonize command-line runner.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use u_cartonize_cli::{CliConfig, SyntheticGenerator};
use u_cartonize_core::PlanSummary;
use u_cartonize_d3::{Cartonizer, OrderRequest};
use u_cartonize_fulfillment::{AllocationRequest, Allocator, QuoteRequest, ShippingCalculator};

#[derive(Parser)]
#[command(name = "u-cartonize")]
#[command(about = "Warehouse cartonization, allocation and shipping quotes")]
#[command(version)]
struct Cli {
    /// TOML file with [packing] and [shipping] sections
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON output to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack an order into cartons
    Pack {
        /// Order request JSON
        file: PathBuf,

        /// Print a one-line summary to stderr
        #[arg(long)]
        summary: bool,
    },

    /// Allocate order lines against stock batches
    Allocate {
        /// Allocation request JSON
        file: PathBuf,
    },

    /// Quote shipping cost for a set of items
    Quote {
        /// Quote request JSON
        file: PathBuf,
    },

    /// Generate a random order request
    Synthetic {
        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of order lines
        #[arg(short, long, default_value = "5")]
        lines: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Pack { file, summary } => {
            let request = OrderRequest::from_json(&read(&file)?)?;
            let plan = Cartonizer::new(config.packing).pack(&request)?;

            if summary {
                let s = PlanSummary::from(&plan);
                eprintln!(
                    "{}: {} carton(s), {} packed, {} unpacked, {:.3} kg billable, {:.1}% utilization",
                    s.order_id,
                    s.cartons,
                    s.packed,
                    s.unpacked,
                    s.total_billable_weight_kg,
                    s.mean_utilization_percent
                );
            }
            emit(&plan, cli.output.as_deref())?;
        }

        Commands::Allocate { file } => {
            let request = AllocationRequest::from_json(&read(&file)?)?;
            let result = Allocator::new().allocate(&request)?;
            emit(&result, cli.output.as_deref())?;
        }

        Commands::Quote { file } => {
            let request = QuoteRequest::from_json(&read(&file)?)?;
            let calculator = match config.shipping {
                Some(rates) => ShippingCalculator::with_default_rates(rates),
                None => ShippingCalculator::new(),
            };
            let quote = calculator.quote(&request)?;
            emit(&quote, cli.output.as_deref())?;
        }

        Commands::Synthetic { seed, lines } => {
            let mut generator = match seed {
                Some(seed) => SyntheticGenerator::with_seed(seed),
                None => SyntheticGenerator::new(),
            };
            let order_id = format!("SYN-{}", seed.map_or("RANDOM".to_string(), |s| s.to_string()));
            let request = generator.order(order_id, lines);
            tracing::info!(
                "Generated {} line(s), {} unit(s)",
                request.items.len(),
                request.unit_count()
            );
            emit(&request, cli.output.as_deref())?;
        }
    }

    Ok(())
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn emit<T: Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("cannot write {}", path.display()))?;
            tracing::info!("Saved to: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
