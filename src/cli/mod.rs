pub mod household;
pub mod matching;
pub mod shelf_life;

use pantry::Config;
use pantry_db::SqliteFeedbackStore;
use pantry_matching::IngredientMatcher;
use serde::Serialize;

/// Matcher with the household's persisted feedback already applied
pub async fn household_matcher(
    config: &Config,
    feedback: &SqliteFeedbackStore,
    household_id: &str,
) -> anyhow::Result<IngredientMatcher> {
    let matcher = IngredientMatcher::embedded(config.matching.clone())?;
    matcher.hydrate_feedback(feedback, household_id).await?;

    Ok(matcher)
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}
