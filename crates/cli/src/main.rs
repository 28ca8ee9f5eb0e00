//! Deco Estilos CLI - Cart and wishlist management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a variant to the cart
//! deco-cli cart add -v 11 -p 1 -n "Sillón Roble" --price 129.99 -q 2
//!
//! # Show the cart
//! deco-cli cart show
//!
//! # Toggle a product on the wishlist
//! deco-cli wish toggle -p 42
//!
//! # Claim the wishlist with a contact handle
//! deco-cli wish identify a@b.com --pending 42
//! ```
//!
//! # Commands
//!
//! - `cart` - Local cart operations (add, remove, set-quantity, show, clear)
//! - `wish` - Wishlist operations against the remote service (list, toggle,
//!   identify)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "deco-cli")]
#[command(author, version, about = "Deco Estilos CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the local shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wish {
        #[command(subcommand)]
        action: WishAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a variant to the cart (merges quantity if already present)
    Add {
        /// Variant id
        #[arg(short, long)]
        variant: i64,

        /// Product id
        #[arg(short, long)]
        product: i64,

        /// Product display name
        #[arg(short, long)]
        name: String,

        /// Unit price (e.g., 129.99)
        #[arg(long)]
        price: Decimal,

        /// Quantity to add
        #[arg(short, long, default_value = "1")]
        quantity: u32,

        /// Variant color label
        #[arg(long)]
        color: Option<String>,

        /// Variant size label
        #[arg(long)]
        size: Option<String>,

        /// Image URL
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Remove a variant from the cart
    Remove {
        /// Variant id
        #[arg(short, long)]
        variant: i64,
    },
    /// Replace the quantity for a variant (0 removes the line)
    SetQuantity {
        /// Variant id
        #[arg(short, long)]
        variant: i64,

        /// New quantity
        #[arg(short, long)]
        quantity: u32,
    },
    /// Print the cart contents and totals
    Show,
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishAction {
    /// Fetch and print the wishlist
    List,
    /// Toggle a product on the wishlist
    Toggle {
        /// Product id
        #[arg(short, long)]
        product: i64,
    },
    /// Claim the wishlist with an email or phone
    Identify {
        /// Email (contains @) or phone number
        identity: String,

        /// Product id that triggered the prompt, if any
        #[arg(long)]
        pending: Option<i64>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add {
                variant,
                product,
                name,
                price,
                quantity,
                color,
                size,
                image_url,
            } => {
                commands::cart::add(variant, product, &name, price, quantity, color, size, image_url)?;
            }
            CartAction::Remove { variant } => commands::cart::remove(variant)?,
            CartAction::SetQuantity { variant, quantity } => {
                commands::cart::set_quantity(variant, quantity)?;
            }
            CartAction::Show => commands::cart::show()?,
            CartAction::Clear => commands::cart::clear()?,
        },
        Commands::Wish { action } => match action {
            WishAction::List => commands::wish::list().await?,
            WishAction::Toggle { product } => commands::wish::toggle(product).await?,
            WishAction::Identify { identity, pending } => {
                commands::wish::identify(&identity, pending).await?;
            }
        },
    }
    Ok(())
}
