use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pantry_matching::{
    EquivalencyRow, EquivalencyStore, FeedbackRecord, FeedbackStore, IngredientMatcher,
    InventoryItemView, ManualClock, MatchingConfig, StoreError,
};

pub fn matcher() -> (IngredientMatcher, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let matcher = IngredientMatcher::with_clock(MatchingConfig::default(), clock.clone())
        .expect("embedded data is valid");
    (matcher, clock)
}

pub fn item(id: &str, name: &str) -> InventoryItemView {
    InventoryItemView::new(id, name, 1.0)
}

pub fn row(ingredient: &str, equivalent: &str, bidirectional: bool) -> EquivalencyRow {
    EquivalencyRow {
        ingredient_name: ingredient.to_owned(),
        equivalent_name: equivalent.to_owned(),
        confidence_score: 0.95,
        substitution_ratio: 1.0,
        notes: None,
        is_bidirectional: bidirectional,
    }
}

#[derive(Default)]
pub struct FakeEquivalencyStore {
    pub rows: Mutex<Vec<EquivalencyRow>>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl FakeEquivalencyStore {
    pub fn with_rows(rows: Vec<EquivalencyRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EquivalencyStore for FakeEquivalencyStore {
    async fn fetch_household_equivalencies(
        &self,
        _household_id: &str,
    ) -> Result<Vec<EquivalencyRow>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow::anyhow!("connection refused").into());
        }

        Ok(self.rows.lock().expect("rows lock").clone())
    }
}

#[derive(Default)]
pub struct FakeFeedbackStore {
    pub records: Mutex<Vec<FeedbackRecord>>,
}

#[async_trait::async_trait]
impl FeedbackStore for FakeFeedbackStore {
    async fn record_feedback(&self, record: &FeedbackRecord) -> Result<(), StoreError> {
        self.records.lock().expect("records lock").push(record.clone());
        Ok(())
    }

    async fn list_feedback(&self, household_id: &str) -> Result<Vec<FeedbackRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .expect("records lock")
            .iter()
            .filter(|r| r.household_id == household_id)
            .cloned()
            .collect())
    }
}
