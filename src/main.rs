mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pantry_matching::StorageLocation;

/// pantry - match recipe ingredients against household inventory
#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Ingredient matching, food taxonomy and shelf-life lookups", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Rank a household's inventory against a recipe ingredient
    Match {
        ingredient: String,
        #[arg(long)]
        household: String,
    },
    /// Check whether a household can make a recipe
    Availability {
        #[arg(long)]
        household: String,
        /// Recipe JSON file
        #[arg(long)]
        recipe: String,
    },
    /// Classify a food name
    Taxonomy {
        name: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        brand: Option<String>,
    },
    /// Storage options and suggested expiration date
    ShelfLife {
        name: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<StorageLocation>,
        /// Purchase date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        purchased: Option<chrono::NaiveDate>,
        /// Explicit shelf life in days
        #[arg(long)]
        days: Option<i64>,
    },
    /// Record feedback on a suggested match
    Feedback {
        #[command(subcommand)]
        command: cli::household::FeedbackCommand,
    },
    /// Manage household ingredient equivalencies
    Equivalency {
        #[command(subcommand)]
        command: cli::household::EquivalencyCommand,
    },
    /// Manage household inventory
    Inventory {
        #[command(subcommand)]
        command: cli::household::InventoryCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = pantry::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    pantry::observability::init_observability(
        "pantry",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Migrate => pantry::migrate::migrate(&config).await,
        Commands::Reset => pantry::migrate::reset(&config).await,
        Commands::Match {
            ingredient,
            household,
        } => cli::matching::find_matches(config, ingredient, household).await,
        Commands::Availability { household, recipe } => {
            cli::matching::availability(config, household, recipe).await
        }
        Commands::Taxonomy {
            name,
            category,
            brand,
        } => cli::matching::taxonomy(config, name, category, brand),
        Commands::ShelfLife {
            name,
            category,
            location,
            purchased,
            days,
        } => cli::shelf_life::shelf_life(config, name, category, location, purchased, days),
        Commands::Feedback { command } => cli::household::feedback(config, command).await,
        Commands::Equivalency { command } => cli::household::equivalency(config, command).await,
        Commands::Inventory { command } => cli::household::inventory(config, command).await,
    }
}
