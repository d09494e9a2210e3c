use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::{Clock, TtlCache};
use crate::model::MatchType;
use crate::normalize::normalize;

/// A user's verdict on a suggested (ingredient, product) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub household_id: String,
    pub recipe_id: Option<String>,
    pub recipe_ingredient: String,
    pub matched_product: String,
    pub is_correct: bool,
    pub correct_product_name: Option<String>,
    pub match_type: Option<MatchType>,
    pub confidence: Option<f64>,
}

impl FeedbackRecord {
    pub fn rejection(
        household_id: impl Into<String>,
        ingredient: impl Into<String>,
        product: impl Into<String>,
        correct_product: Option<String>,
    ) -> Self {
        Self {
            household_id: household_id.into(),
            recipe_id: None,
            recipe_ingredient: ingredient.into(),
            matched_product: product.into(),
            is_correct: false,
            correct_product_name: correct_product,
            match_type: None,
            confidence: None,
        }
    }

    pub fn confirmation(
        household_id: impl Into<String>,
        ingredient: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        Self {
            household_id: household_id.into(),
            recipe_id: None,
            recipe_ingredient: ingredient.into(),
            matched_product: product.into(),
            is_correct: true,
            correct_product_name: None,
            match_type: None,
            confidence: None,
        }
    }

    pub fn with_recipe(mut self, recipe_id: impl Into<String>) -> Self {
        self.recipe_id = Some(recipe_id.into());
        self
    }

    pub fn with_match(mut self, match_type: MatchType, confidence: f64) -> Self {
        self.match_type = Some(match_type);
        self.confidence = Some(confidence);
        self
    }
}

type PairKey = (String, String);

fn pair(ingredient: &str, product: &str) -> PairKey {
    (normalize(ingredient), normalize(product))
}

/// In-memory effects of match feedback.
///
/// Blocked pairs stay blocked for the life of the process. Confirmations and
/// corrections live in time-bounded caches and are rebuilt from the store.
pub struct FeedbackCache {
    blocked: RwLock<HashSet<PairKey>>,
    confirmed: TtlCache<PairKey, ()>,
    corrections: TtlCache<PairKey, String>,
}

impl FeedbackCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            blocked: RwLock::new(HashSet::new()),
            confirmed: TtlCache::new(ttl, clock.clone()),
            corrections: TtlCache::new(ttl, clock),
        }
    }

    /// Suppress the pair and remember the correct product, if given
    pub fn block(&self, ingredient: &str, product: &str, correct_product: Option<&str>) {
        let key = pair(ingredient, product);

        self.confirmed.remove(&key);
        if let Some(correct) = correct_product.map(normalize).filter(|c| !c.is_empty()) {
            self.corrections.insert(key.clone(), correct);
        }

        self.blocked
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key);
    }

    pub fn confirm(&self, ingredient: &str, product: &str) {
        let key = pair(ingredient, product);

        self.blocked
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&key);
        self.confirmed.insert(key, ());
    }

    pub fn apply(&self, record: &FeedbackRecord) {
        if record.is_correct {
            self.confirm(&record.recipe_ingredient, &record.matched_product);
        } else {
            self.block(
                &record.recipe_ingredient,
                &record.matched_product,
                record.correct_product_name.as_deref(),
            );
        }
    }

    pub fn is_blocked(&self, ingredient: &str, product: &str) -> bool {
        self.blocked
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&pair(ingredient, product))
    }

    pub fn is_confirmed(&self, ingredient: &str, product: &str) -> bool {
        self.confirmed.contains(&pair(ingredient, product))
    }

    pub fn correction_for(&self, ingredient: &str, product: &str) -> Option<String> {
        self.corrections.get(&pair(ingredient, product))
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn clear(&self) {
        self.blocked
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.confirmed.clear();
        self.corrections.clear();
    }
}

impl std::fmt::Debug for FeedbackCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackCache")
            .field("blocked", &self.blocked_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn cache(clock: &Arc<ManualClock>) -> FeedbackCache {
        FeedbackCache::new(Duration::from_secs(600), clock.clone())
    }

    #[test]
    fn test_block_is_normalized_and_permanent() {
        let clock = Arc::new(ManualClock::new());
        let feedback = cache(&clock);

        feedback.block("Butter", "Butter Toffee!", Some("Unsalted Butter"));
        assert!(feedback.is_blocked("butter", "butter toffee"));
        assert_eq!(
            feedback.correction_for("butter", "butter toffee").as_deref(),
            Some("unsalted butter")
        );

        clock.advance(Duration::from_secs(3600));
        assert!(feedback.is_blocked("butter", "butter toffee"));
        assert_eq!(feedback.correction_for("butter", "butter toffee"), None);
    }

    #[test]
    fn test_confirmation_expires_with_window() {
        let clock = Arc::new(ManualClock::new());
        let feedback = cache(&clock);

        feedback.confirm("salt", "sea salt");
        assert!(feedback.is_confirmed("Salt", "Sea Salt"));

        clock.advance(Duration::from_secs(601));
        assert!(!feedback.is_confirmed("salt", "sea salt"));
    }

    #[test]
    fn test_latest_verdict_wins() {
        let clock = Arc::new(ManualClock::new());
        let feedback = cache(&clock);

        feedback.block("milk", "oat milk", None);
        feedback.confirm("milk", "oat milk");
        assert!(!feedback.is_blocked("milk", "oat milk"));
        assert!(feedback.is_confirmed("milk", "oat milk"));

        feedback.apply(&FeedbackRecord::rejection("h1", "milk", "oat milk", None));
        assert!(feedback.is_blocked("milk", "oat milk"));
        assert!(!feedback.is_confirmed("milk", "oat milk"));
    }

    #[test]
    fn test_clear() {
        let clock = Arc::new(ManualClock::new());
        let feedback = cache(&clock);

        feedback.block("a", "b", None);
        feedback.confirm("c", "d");
        feedback.clear();

        assert_eq!(feedback.blocked_count(), 0);
        assert!(!feedback.is_confirmed("c", "d"));
    }
}
