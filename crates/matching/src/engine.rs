use std::cmp::Ordering;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::availability::{RecipeAvailability, RecipeIngredient};
use crate::cache::{Clock, SystemClock, TtlCache};
use crate::config::MatchingConfig;
use crate::equivalency::{HouseholdEquivalencies, are_equivalent};
use crate::error::{MatchingResult, StoreError};
use crate::exclusions::is_excluded_pair;
use crate::feedback::{FeedbackCache, FeedbackRecord};
use crate::model::{IngredientMatch, InventoryItemView, MatchType};
use crate::normalize::normalize;
use crate::overlap::is_partial_match;
use crate::shelf_life::{ShelfLifeCalculator, StorageLocation};
use crate::store::{EquivalencyStore, FeedbackStore};
use crate::taxonomy::{FoodMatch, FoodTaxonomyMatcher, Taxonomy};

/// Ranking order: confidence descending, then tier precedence
fn by_rank(a: &IngredientMatch, b: &IngredientMatch) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| a.match_type.cmp(&b.match_type))
}

/// The matching service. Build one per process and share it.
pub struct IngredientMatcher {
    config: MatchingConfig,
    taxonomy: FoodTaxonomyMatcher,
    shelf_life: ShelfLifeCalculator,
    feedback: FeedbackCache,
    households: TtlCache<String, Arc<HouseholdEquivalencies>>,
}

impl IngredientMatcher {
    pub fn new(
        config: MatchingConfig,
        taxonomy: Taxonomy,
        shelf_life: ShelfLifeCalculator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            taxonomy: FoodTaxonomyMatcher::new(
                Arc::new(taxonomy),
                config.taxonomy_ttl(),
                clock.clone(),
            ),
            shelf_life,
            feedback: FeedbackCache::new(config.feedback_ttl(), clock.clone()),
            households: TtlCache::new(config.household_ttl(), clock),
            config,
        }
    }

    /// Matcher over the bundled taxonomy and shelf-life tables
    pub fn embedded(config: MatchingConfig) -> MatchingResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: MatchingConfig, clock: Arc<dyn Clock>) -> MatchingResult<Self> {
        Ok(Self::new(
            config,
            Taxonomy::embedded()?,
            ShelfLifeCalculator::embedded()?,
            clock,
        ))
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn taxonomy(&self) -> &FoodTaxonomyMatcher {
        &self.taxonomy
    }

    pub fn shelf_life(&self) -> &ShelfLifeCalculator {
        &self.shelf_life
    }

    pub fn feedback(&self) -> &FeedbackCache {
        &self.feedback
    }

    /// Rank inventory items against a recipe ingredient using the static
    /// equivalency table only.
    pub fn find_ingredient_matches(
        &self,
        ingredient: &str,
        inventory: &[InventoryItemView],
    ) -> Vec<IngredientMatch> {
        self.rank(ingredient, inventory, None)
    }

    /// Same ranking as [`Self::find_ingredient_matches`] with the household's
    /// own equivalencies applied.
    #[tracing::instrument(skip(self, inventory, store), fields(items = inventory.len()))]
    pub async fn find_household_matches(
        &self,
        ingredient: &str,
        inventory: &[InventoryItemView],
        household_id: &str,
        store: &dyn EquivalencyStore,
    ) -> Vec<IngredientMatch> {
        let household = self.household_equivalencies(household_id, store).await;
        self.rank(ingredient, inventory, Some(&household))
    }

    /// Household table, cached. A failed fetch yields an empty table and is
    /// not cached, so the next call retries.
    pub async fn household_equivalencies(
        &self,
        household_id: &str,
        store: &dyn EquivalencyStore,
    ) -> Arc<HouseholdEquivalencies> {
        let key = household_id.to_owned();
        if let Some(table) = self.households.get(&key) {
            return table;
        }

        match store.fetch_household_equivalencies(household_id).await {
            Ok(rows) => {
                let table = Arc::new(HouseholdEquivalencies::from_rows(rows));
                tracing::debug!(household_id, keys = table.len(), "household equivalencies loaded");
                self.households.insert(key, table.clone());
                table
            }
            Err(err) => {
                tracing::warn!(
                    household_id,
                    error = %err,
                    "failed to load household equivalencies, using static table only"
                );
                Arc::new(HouseholdEquivalencies::default())
            }
        }
    }

    /// The ranking algorithm shared by every matching entry point
    pub fn rank(
        &self,
        ingredient: &str,
        inventory: &[InventoryItemView],
        household: Option<&HouseholdEquivalencies>,
    ) -> Vec<IngredientMatch> {
        let wanted = normalize(ingredient);
        if wanted.is_empty() {
            return Vec::new();
        }

        let mut wanted_food: Option<Option<FoodMatch>> = None;
        let mut matches: Vec<IngredientMatch> = Vec::new();
        let mut strong = 0usize;

        for item in inventory {
            if !item.is_available() {
                continue;
            }

            let name = normalize(&item.name);
            if name.is_empty() {
                continue;
            }

            if self.feedback.is_blocked(&wanted, &name) {
                tracing::trace!(ingredient = %wanted, product = %name, "pair blocked by feedback");
                continue;
            }

            if is_excluded_pair(&wanted, &name) {
                tracing::trace!(ingredient = %wanted, product = %name, "pair excluded");
                continue;
            }

            let tier = if are_equivalent(&wanted, &name, household) {
                Some((MatchType::Exact, 1.0, None))
            } else if is_partial_match(&wanted, &name, &self.config) {
                Some((
                    MatchType::Partial,
                    MatchType::Partial.base_confidence(),
                    Some(format!("\"{}\" shares a word with \"{}\"", item.name, ingredient)),
                ))
            } else {
                let wanted_food = wanted_food
                    .get_or_insert_with(|| self.taxonomy.match_food(ingredient, None, None));
                self.category_tier(wanted_food.as_ref(), item)
                    .or_else(|| self.substitute_tier(&wanted, &name, matches.len()))
            };

            let Some((match_type, confidence, notes)) = tier else {
                continue;
            };

            tracing::trace!(product = %name, %match_type, confidence, "inventory item matched");

            if confidence >= self.config.early_exit_confidence {
                strong += 1;
            }

            matches.push(IngredientMatch {
                item: item.clone(),
                match_type,
                confidence,
                notes,
            });

            if strong >= self.config.early_exit_matches {
                tracing::debug!(ingredient = %wanted, strong, "enough strong matches, stopping scan");
                break;
            }
        }

        matches.sort_by(by_rank);
        self.apply_confirmations(&wanted, &mut matches);
        matches
    }

    fn category_tier(
        &self,
        wanted: Option<&FoodMatch>,
        item: &InventoryItemView,
    ) -> Option<(MatchType, f64, Option<String>)> {
        let wanted = wanted?;
        let found =
            self.taxonomy
                .match_food(&item.name, item.category.as_deref(), item.brand.as_deref())?;

        if wanted.same_subcategory(&found) {
            let subcategory = found.subcategory.as_deref().unwrap_or_default();
            Some((
                MatchType::Category,
                0.8,
                Some(format!("Same kind of food: {} / {}", found.category, subcategory)),
            ))
        } else if wanted.same_category(&found) {
            Some((
                MatchType::Category,
                0.5,
                Some(format!("Same food category: {}", found.category)),
            ))
        } else {
            None
        }
    }

    fn substitute_tier(
        &self,
        wanted: &str,
        name: &str,
        collected: usize,
    ) -> Option<(MatchType, f64, Option<String>)> {
        if collected >= self.config.substitute_attempt_limit {
            return None;
        }

        self.taxonomy.can_substitute(wanted, name).then(|| {
            (
                MatchType::Substitute,
                MatchType::Substitute.base_confidence(),
                Some(format!("\"{name}\" can substitute for \"{wanted}\"")),
            )
        })
    }

    /// Boost confirmed pairs, never past 1.0 and never above a stronger-tier
    /// match that already outranks them, then re-sort.
    fn apply_confirmations(&self, wanted: &str, matches: &mut [IngredientMatch]) {
        let ceilings: Vec<f64> = matches
            .iter()
            .map(|m| {
                matches
                    .iter()
                    .filter(|other| {
                        other.match_type < m.match_type && other.confidence >= m.confidence
                    })
                    .map(|other| other.confidence)
                    .fold(1.0, f64::min)
            })
            .collect();

        let mut boosted = false;
        for (m, ceiling) in matches.iter_mut().zip(ceilings) {
            if !self.feedback.is_confirmed(wanted, &m.item.name) {
                continue;
            }

            let raised = (m.confidence * self.config.confirm_boost).min(ceiling);
            if raised > m.confidence {
                m.confidence = raised;
                boosted = true;
            }
        }

        if boosted {
            matches.sort_by(by_rank);
        }
    }

    /// Availability of a recipe against the inventory, static table only
    pub fn check_recipe_availability(
        &self,
        ingredients: &[RecipeIngredient],
        inventory: &[InventoryItemView],
    ) -> RecipeAvailability {
        RecipeAvailability::from_results(
            ingredients
                .iter()
                .map(|ingredient| (ingredient, self.rank(&ingredient.name, inventory, None))),
        )
    }

    #[tracing::instrument(skip(self, ingredients, inventory, store), fields(ingredients = ingredients.len()))]
    pub async fn check_household_availability(
        &self,
        ingredients: &[RecipeIngredient],
        inventory: &[InventoryItemView],
        household_id: &str,
        store: &dyn EquivalencyStore,
    ) -> RecipeAvailability {
        let household = self.household_equivalencies(household_id, store).await;
        RecipeAvailability::from_results(ingredients.iter().map(|ingredient| {
            (
                ingredient,
                self.rank(&ingredient.name, inventory, Some(&household)),
            )
        }))
    }

    /// Block a wrong suggestion, optionally noting the right product
    pub fn apply_ml_feedback(&self, ingredient: &str, incorrect: &str, correct: Option<&str>) {
        tracing::info!(ingredient, product = incorrect, correct = ?correct, "match rejected");
        self.feedback.block(ingredient, incorrect, correct);
    }

    pub fn confirm_ml_match(&self, ingredient: &str, product: &str) {
        tracing::info!(ingredient, product, "match confirmed");
        self.feedback.confirm(ingredient, product);
    }

    pub fn correction_for(&self, ingredient: &str, product: &str) -> Option<String> {
        self.feedback.correction_for(ingredient, product)
    }

    /// Persist a verdict, then apply it in memory
    pub async fn record_feedback(
        &self,
        store: &dyn FeedbackStore,
        record: FeedbackRecord,
    ) -> Result<(), StoreError> {
        store.record_feedback(&record).await?;

        if record.is_correct {
            self.confirm_ml_match(&record.recipe_ingredient, &record.matched_product);
        } else {
            self.apply_ml_feedback(
                &record.recipe_ingredient,
                &record.matched_product,
                record.correct_product_name.as_deref(),
            );
        }

        Ok(())
    }

    /// Replay persisted feedback into the in-memory caches. Returns the
    /// number of records applied.
    #[tracing::instrument(skip(self, store))]
    pub async fn hydrate_feedback(
        &self,
        store: &dyn FeedbackStore,
        household_id: &str,
    ) -> Result<usize, StoreError> {
        let records = store.list_feedback(household_id).await?;
        for record in &records {
            self.feedback.apply(record);
        }

        tracing::debug!(records = records.len(), "feedback hydrated");
        Ok(records.len())
    }

    pub fn invalidate_household(&self, household_id: &str) {
        self.households.remove(&household_id.to_owned());
    }

    /// Drop every cached value. Blocked pairs are kept.
    pub fn clear_caches(&self) {
        self.taxonomy.clear_cache();
        self.households.clear();
    }

    pub fn match_food_taxonomy(
        &self,
        name: &str,
        category: Option<&str>,
        brand: Option<&str>,
    ) -> Option<FoodMatch> {
        self.taxonomy.match_food(name, category, brand)
    }

    pub fn can_substitute(&self, a: &str, b: &str) -> bool {
        self.taxonomy.can_substitute(a, b)
    }

    pub fn default_shelf_life(
        &self,
        name: &str,
        category: Option<&str>,
        location: StorageLocation,
    ) -> Option<u32> {
        self.shelf_life.default_shelf_life(name, category, location)
    }

    pub fn suggest_expiration_date(
        &self,
        name: &str,
        category: Option<&str>,
        purchase_date: NaiveDate,
        location: Option<StorageLocation>,
        explicit_days: Option<i64>,
    ) -> Option<NaiveDate> {
        self.shelf_life
            .suggest_expiration_date(name, category, purchase_date, location, explicit_days)
    }

    pub fn storage_recommendation(&self, name: &str, category: Option<&str>) -> StorageLocation {
        self.shelf_life.storage_recommendation(name, category)
    }
}

impl std::fmt::Debug for IngredientMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngredientMatcher")
            .field("config", &self.config)
            .field("taxonomy", &self.taxonomy)
            .field("feedback", &self.feedback)
            .finish()
    }
}
