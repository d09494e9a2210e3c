use pantry::{Config, recipe::RecipeFile};
use pantry_db::{SqliteEquivalencyStore, SqliteFeedbackStore, inventory};
use pantry_matching::IngredientMatcher;

use super::{household_matcher, print_json};

#[tracing::instrument(skip(config))]
pub async fn find_matches(config: Config, ingredient: String, household: String) -> anyhow::Result<()> {
    let pool = pantry::create_pool(&config.database.url, config.database.max_connections).await?;
    let feedback = SqliteFeedbackStore::new(pool.clone());
    let equivalencies = SqliteEquivalencyStore::new(pool.clone());

    let matcher = household_matcher(&config, &feedback, &household).await?;
    let items = inventory::load_inventory(&pool, &household).await?;
    let matches = matcher
        .find_household_matches(&ingredient, &items, &household, &equivalencies)
        .await;

    tracing::info!(matches = matches.len(), "ingredient matched");

    print_json(&matches)
}

#[tracing::instrument(skip(config))]
pub async fn availability(config: Config, household: String, recipe: String) -> anyhow::Result<()> {
    let recipe = RecipeFile::read(&recipe)?;
    let pool = pantry::create_pool(&config.database.url, config.database.max_connections).await?;
    let feedback = SqliteFeedbackStore::new(pool.clone());
    let equivalencies = SqliteEquivalencyStore::new(pool.clone());

    let matcher = household_matcher(&config, &feedback, &household).await?;
    let items = inventory::load_inventory(&pool, &household).await?;
    let availability = matcher
        .check_household_availability(&recipe.ingredients, &items, &household, &equivalencies)
        .await;

    tracing::info!(
        recipe = recipe.name.as_deref().unwrap_or("unnamed"),
        can_make = availability.can_make,
        availability = availability.availability,
        "recipe checked"
    );

    print_json(&availability)
}

pub fn taxonomy(
    config: Config,
    name: String,
    category: Option<String>,
    brand: Option<String>,
) -> anyhow::Result<()> {
    let matcher = IngredientMatcher::embedded(config.matching)?;

    match matcher.match_food_taxonomy(&name, category.as_deref(), brand.as_deref()) {
        Some(food) => print_json(&food),
        None => {
            tracing::warn!(%name, "no taxonomy match");
            print_json(&serde_json::Value::Null)
        }
    }
}
