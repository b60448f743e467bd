//! # Shopkeep Terminal Application Entry Point
//!
//! ## Startup Sequence
//! 1. Parse command line arguments (data directory, config path)
//! 2. Initialize tracing (RUST_LOG override, INFO default)
//! 3. Load `config.toml` (defaults when absent)
//! 4. Load the product file into a Catalog, reporting skipped lines;
//!    any other read failure degrades to an empty catalog
//! 5. Run the menu loop until exit
//!
//! Anything unanticipated that escapes the session loop is reported and
//! the process ends cleanly instead of crashing with an unhandled
//! fault.

mod config;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shopkeep_core::Catalog;
use shopkeep_store::{product_file, InvoiceWriter};

use config::AppConfig;
use session::Session;

/// Single-user inventory manager for a small retail shop.
#[derive(Debug, Parser)]
#[command(name = "shopkeep", version, about)]
struct Args {
    /// Directory holding the product file, config, and invoices.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Config file path (defaults to <data-dir>/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", style(format!("Fatal: {err:#}")).red());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config_path = args
        .config
        .unwrap_or_else(|| args.data_dir.join("config.toml"));
    let config = AppConfig::load(&config_path);
    let products_path = args.data_dir.join(&config.product_file);

    let catalog = match product_file::load(&products_path) {
        Ok(outcome) => {
            if outcome.skipped > 0 {
                println!(
                    "{}",
                    style(format!(
                        "Skipped {} malformed line(s) in {}",
                        outcome.skipped,
                        products_path.display()
                    ))
                    .yellow()
                );
            }
            info!(count = outcome.products.len(), "products loaded");
            Catalog::from_products(outcome.products)
        }
        Err(err) => {
            // Structural problems must not stop the shop from opening.
            warn!(%err, "could not load product file, starting empty");
            println!(
                "{}",
                style(format!("Could not load products ({err}), starting empty")).yellow()
            );
            Catalog::new()
        }
    };

    println!(
        "{}",
        style(format!("== {} ==", config.store_name)).bold().cyan()
    );

    let writer = InvoiceWriter::new(&args.data_dir, config.store_name.clone());
    Session::new(catalog, writer, products_path).run()
}
