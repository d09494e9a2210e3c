use clap::Subcommand;
use pantry::Config;
use pantry_db::inventory::{self, NewInventoryItem, NewProduct};
use pantry_db::{NewEquivalency, SqliteEquivalencyStore, SqliteFeedbackStore};
use pantry_matching::FeedbackRecord;

use super::household_matcher;

#[derive(Subcommand)]
pub enum FeedbackCommand {
    /// Mark a suggested product as wrong for an ingredient
    Reject {
        #[arg(long)]
        household: String,
        #[arg(long)]
        ingredient: String,
        #[arg(long)]
        product: String,
        /// The product that should have been suggested
        #[arg(long)]
        correct: Option<String>,
        #[arg(long)]
        recipe: Option<String>,
    },
    /// Mark a suggested product as right for an ingredient
    Confirm {
        #[arg(long)]
        household: String,
        #[arg(long)]
        ingredient: String,
        #[arg(long)]
        product: String,
        #[arg(long)]
        recipe: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum EquivalencyCommand {
    /// Declare two ingredient names equivalent for a household
    Add {
        #[arg(long)]
        household: String,
        #[arg(long)]
        ingredient: String,
        #[arg(long)]
        equivalent: String,
        #[arg(long)]
        bidirectional: bool,
        #[arg(long, default_value_t = 1.0)]
        confidence: f64,
        #[arg(long, default_value_t = 1.0)]
        ratio: f64,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum InventoryCommand {
    /// Add an item to a household's inventory
    Add {
        #[arg(long)]
        household: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        quantity: f64,
        #[arg(long)]
        unit: Option<String>,
    },
}

pub async fn feedback(config: Config, command: FeedbackCommand) -> anyhow::Result<()> {
    let pool = pantry::create_pool(&config.database.url, 1).await?;
    let store = SqliteFeedbackStore::new(pool);

    let record = match command {
        FeedbackCommand::Reject {
            household,
            ingredient,
            product,
            correct,
            recipe,
        } => {
            let record = FeedbackRecord::rejection(household, ingredient, product, correct);
            match recipe {
                Some(recipe) => record.with_recipe(recipe),
                None => record,
            }
        }
        FeedbackCommand::Confirm {
            household,
            ingredient,
            product,
            recipe,
        } => {
            let record = FeedbackRecord::confirmation(household, ingredient, product);
            match recipe {
                Some(recipe) => record.with_recipe(recipe),
                None => record,
            }
        }
    };

    let matcher = household_matcher(&config, &store, &record.household_id).await?;
    matcher.record_feedback(&store, record).await?;

    Ok(())
}

pub async fn equivalency(config: Config, command: EquivalencyCommand) -> anyhow::Result<()> {
    let EquivalencyCommand::Add {
        household,
        ingredient,
        equivalent,
        bidirectional,
        confidence,
        ratio,
        notes,
    } = command;

    let pool = pantry::create_pool(&config.database.url, 1).await?;
    let store = SqliteEquivalencyStore::new(pool);
    let id = store
        .add_equivalency(NewEquivalency {
            confidence_score: confidence,
            substitution_ratio: ratio,
            notes,
            is_bidirectional: bidirectional,
            ..NewEquivalency::new(household, ingredient, equivalent)
        })
        .await?;

    tracing::info!(%id, "equivalency added");
    println!("{id}");

    Ok(())
}

pub async fn inventory(config: Config, command: InventoryCommand) -> anyhow::Result<()> {
    let InventoryCommand::Add {
        household,
        name,
        category,
        brand,
        quantity,
        unit,
    } = command;

    let pool = pantry::create_pool(&config.database.url, 1).await?;

    // A product row only carries information when a category or brand is known
    let product_id = if category.is_some() || brand.is_some() {
        Some(
            inventory::add_product(
                &pool,
                NewProduct {
                    name: name.to_owned(),
                    category,
                    brand,
                },
            )
            .await?,
        )
    } else {
        None
    };

    let id = inventory::add_inventory_item(
        &pool,
        NewInventoryItem {
            household_id: household,
            product_id,
            name: Some(name),
            quantity,
            unit,
        },
    )
    .await?;

    tracing::info!(%id, "inventory item added");
    println!("{id}");

    Ok(())
}
