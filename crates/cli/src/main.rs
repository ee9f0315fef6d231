//! Shopfront CLI - drive the storefront client from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in; the token is written to the token directory
//! sf-cli login -e jane@example.com -p 'hunter2'
//!
//! # Browse the catalog
//! sf-cli products list
//! sf-cli products by-category 65f1c0ffee
//! sf-cli products search "dress"
//!
//! # Account and admin
//! sf-cli orders list
//! sf-cli admin dashboard
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - Session management
//! - `products` - List, show, search and filter products
//! - `categories` - List categories or show one
//! - `orders` - The signed-in account's orders
//! - `admin` - Dashboard, analytics and user roles

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopfront_client::{ClientConfig, Shopfront};
use tracing_subscriber::EnvFilter;

mod commands;

/// Token directory used when neither `--token-dir` nor `SHOPFRONT_TOKEN_DIR` is set.
const DEFAULT_TOKEN_DIR: &str = ".shopfront";

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(author, version, about = "Shopfront storefront client")]
struct Cli {
    /// Directory holding the `access_token` file
    #[arg(long, global = true)]
    token_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the bearer token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out and delete the stored token
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Browse products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// List categories, or show one
    Categories {
        /// Category ID
        id: Option<String>,
    },
    /// The signed-in account's orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Store administration
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products
    List,
    /// Show one product
    Get { id: String },
    /// List featured products
    Featured,
    /// List products related to one product
    Related { id: String },
    /// List one category's products
    ByCategory { id: String },
    /// Search product and category names
    Search { query: String },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders
    List,
    /// Show one order
    Get { id: String },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Show dashboard counters
    Dashboard,
    /// List accounts
    Users,
    /// Change an account's role (`user`, `admin`)
    SetRole { id: String, role: String },
    /// Show sales analytics
    Sales,
    /// Show inventory analytics
    Inventory,
}

#[tokio::main]
async fn main() {
    // .env may carry RUST_LOG, so load it before the filter is built
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shopfront_client=info,shopfront_cli=info")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ClientConfig::from_env()?;
    if let Some(dir) = cli.token_dir {
        config.token_dir = Some(dir);
    }
    let token_dir = config
        .token_dir
        .get_or_insert_with(|| PathBuf::from(DEFAULT_TOKEN_DIR))
        .clone();

    let shopfront = Shopfront::new(config)?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&shopfront, &token_dir, &email, password).await?;
        }
        Commands::Logout => commands::auth::logout(&shopfront, &token_dir).await?,
        Commands::Whoami => commands::auth::whoami(&shopfront).await?,
        Commands::Products { action } => match action {
            ProductAction::List => commands::catalog::list_products(&shopfront).await?,
            ProductAction::Get { id } => commands::catalog::show_product(&shopfront, &id).await?,
            ProductAction::Featured => commands::catalog::featured(&shopfront).await?,
            ProductAction::Related { id } => commands::catalog::related(&shopfront, &id).await?,
            ProductAction::ByCategory { id } => {
                commands::catalog::by_category(&shopfront, &id).await?;
            }
            ProductAction::Search { query } => {
                commands::catalog::search(&shopfront, &query).await?;
            }
        },
        Commands::Categories { id } => {
            commands::catalog::categories(&shopfront, id.as_deref()).await?;
        }
        Commands::Orders { action } => match action {
            OrderAction::List => commands::orders::list(&shopfront).await?,
            OrderAction::Get { id } => commands::orders::show(&shopfront, &id).await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Dashboard => commands::admin::dashboard(&shopfront).await?,
            AdminAction::Users => commands::admin::users(&shopfront).await?,
            AdminAction::SetRole { id, role } => {
                commands::admin::set_role(&shopfront, &id, &role).await?;
            }
            AdminAction::Sales => commands::admin::sales(&shopfront).await?,
            AdminAction::Inventory => commands::admin::inventory(&shopfront).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_token_dir_is_global() {
        let cli = Cli::try_parse_from(["sf-cli", "orders", "list", "--token-dir", "/tmp/sf"])
            .map_err(|e| e.to_string());
        assert_eq!(
            cli.ok().and_then(|cli| cli.token_dir),
            Some(PathBuf::from("/tmp/sf"))
        );
    }
}
