//! Storefront CLI - browse a catalog dump and resolve product variants.
//!
//! Commands:
//! - `storefront brands` - List brands
//! - `storefront products` - List products, optionally by brand
//! - `storefront options` - Show option values and their state under a selection
//! - `storefront resolve` - Resolve a selection to a variant
//! - `storefront pick` - Pick options interactively
//! - `storefront cart` - Add a resolved variant to a cart
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, ConfigArgs, PickArgs, ProductsArgs, SelectionArgs};

/// Storefront CLI - Browse catalogs and resolve configurable product variants
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List brands
    Brands,

    /// List products
    Products(ProductsArgs),

    /// Show option values and whether they can be selected
    Options(SelectionArgs),

    /// Resolve a selection to a concrete variant
    Resolve(SelectionArgs),

    /// Pick options interactively
    Pick(PickArgs),

    /// Add the resolved variant to a cart
    Cart(CartArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(verbose: bool, configured: &str) {
    let fallback = if verbose { "debug" } else { configured };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    init_logging(ctx.output.is_verbose(), &ctx.config.output.log_level);
    tracing::debug!(config = ?ctx.config_path, root = %ctx.root.display(), "configuration loaded");

    // Execute command
    let result = match cli.command {
        Commands::Brands => commands::catalog::brands(&ctx).await,
        Commands::Products(args) => commands::catalog::products(args, &ctx).await,
        Commands::Options(args) => commands::options::options(args, &ctx).await,
        Commands::Resolve(args) => commands::options::resolve(args, &ctx).await,
        Commands::Pick(args) => commands::options::pick(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
