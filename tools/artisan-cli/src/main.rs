//! Artisan CLI - Command line storefront for the Artisan marketplace.
//!
//! Commands:
//! - `artisan browse` - List, filter and search products
//! - `artisan product` - Show a product with resolved price, stock and image
//! - `artisan cart` - Manage the persisted cart
//! - `artisan checkout` - Place orders for the cart
//! - `artisan orders` - Track placed orders
//! - `artisan config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{BrowseArgs, CartArgs, CheckoutArgs, ConfigArgs, OrdersArgs, ProductArgs};

/// Artisan CLI - Shop handmade goods from the terminal
#[derive(Parser)]
#[command(name = "artisan")]
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
    /// Browse and search products
    Browse(BrowseArgs),

    /// Show a product page
    Product(ProductArgs),

    /// Manage the cart
    Cart(CartArgs),

    /// Place orders for everything in the cart
    Checkout(CheckoutArgs),

    /// List and update orders
    Orders(OrdersArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    logging::init(&ctx.config.logging, cli.verbose)?;
    ctx.output.debug(&format!("Storage: {}", ctx.storage_dir().display()));

    // Execute command
    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
