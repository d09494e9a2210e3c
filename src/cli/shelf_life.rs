use chrono::NaiveDate;
use pantry::Config;
use pantry_matching::{IngredientMatcher, ResolvedShelfLife, StorageLocation, StorageOption};
use serde::Serialize;

use super::print_json;

#[derive(Serialize)]
struct ShelfLifeReport<'a> {
    name: &'a str,
    shelf_life: ResolvedShelfLife,
    recommended: StorageLocation,
    options: Vec<StorageOption>,
    purchased: NaiveDate,
    expires: Option<NaiveDate>,
}

pub fn shelf_life(
    config: Config,
    name: String,
    category: Option<String>,
    location: Option<StorageLocation>,
    purchased: Option<NaiveDate>,
    days: Option<i64>,
) -> anyhow::Result<()> {
    let matcher = IngredientMatcher::embedded(config.matching)?;
    let calculator = matcher.shelf_life();
    let category = category.as_deref();
    let purchased = purchased.unwrap_or_else(|| chrono::Local::now().date_naive());

    let report = ShelfLifeReport {
        name: &name,
        shelf_life: calculator.shelf_life_entry(&name, category),
        recommended: calculator.storage_recommendation(&name, category),
        options: calculator.storage_options(&name, category),
        purchased,
        expires: calculator.suggest_expiration_date(&name, category, purchased, location, days),
    };

    print_json(&report)
}
