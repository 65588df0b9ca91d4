//! CLI command implementations.

pub mod browse;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod product;

use artisan_commerce::resolve::Selections;
use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Search title, description and category.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only these categories (repeatable).
    #[arg(short, long)]
    pub category: Vec<String>,

    /// Maximum price, e.g. 50 or 49.99.
    #[arg(long)]
    pub max_price: Option<String>,

    /// Product type: physical, digital or customizable.
    #[arg(short = 't', long = "type")]
    pub product_type: Option<String>,

    /// Sort order: newest, price-low or price-high.
    #[arg(short, long, default_value = "newest")]
    pub sort: String,
}

/// Selection of a variant and seller for one product.
#[derive(Args, Clone, Default)]
pub struct SelectionArgs {
    /// Variant selection as DIMENSION=VALUE (repeatable), e.g. Color=Red.
    #[arg(short = 's', long = "select", value_parser = parse_selection)]
    pub selections: Vec<(String, String)>,

    /// Buy from this shop instead of the default seller.
    #[arg(long)]
    pub seller: Option<String>,
}

impl SelectionArgs {
    pub fn selections(&self) -> Selections {
        self.selections.iter().cloned().collect()
    }
}

fn parse_selection(input: &str) -> Result<(String, String), String> {
    let (dimension, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected DIMENSION=VALUE, got '{}'", input))?;
    let (dimension, value) = (dimension.trim(), value.trim());
    if dimension.is_empty() || value.is_empty() {
        return Err(format!("expected DIMENSION=VALUE, got '{}'", input));
    }
    Ok((dimension.to_string(), value.to_string()))
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: u64,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Also add this many to the cart.
    #[arg(long)]
    pub add: Option<i64>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// List cart contents.
    List,
    /// Add a product to the cart.
    Add {
        /// Product id.
        product: u64,

        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,

        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Set the quantity of a cart line. Zero removes it.
    Update {
        /// Product id.
        product: u64,
        /// New quantity.
        quantity: i64,
    },
    /// Remove a line. Prompts when no product is given.
    Remove {
        /// Product id.
        product: Option<u64>,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Customer placing the order.
    #[arg(long, default_value = "1")]
    pub customer: u64,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: Option<OrdersCommand>,

    /// Customer whose orders to list.
    #[arg(long, default_value = "1")]
    pub customer: u64,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List orders.
    List,
    /// Show one order.
    Show {
        /// Order id.
        id: u64,
    },
    /// Move an order to a new status.
    Status {
        /// Order id.
        id: u64,
        /// new, processing, shipped, completed or cancelled.
        status: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Print the config file in use.
    Path,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            parse_selection("Color = Ocean Blue").unwrap(),
            ("Color".to_string(), "Ocean Blue".to_string())
        );
        assert!(parse_selection("Color").is_err());
        assert!(parse_selection("=Red").is_err());
    }

    #[test]
    fn test_selections_keep_order() {
        let args = SelectionArgs {
            selections: vec![
                ("Size".into(), "L".into()),
                ("Color".into(), "Sage".into()),
            ],
            seller: None,
        };
        let selections = args.selections();
        assert_eq!(selections.variant_label().as_deref(), Some("L / Sage"));
    }
}
