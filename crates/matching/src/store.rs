//! Persistence collaborators of the matcher.

use crate::equivalency::EquivalencyRow;
use crate::error::StoreError;
use crate::feedback::FeedbackRecord;

#[async_trait::async_trait]
pub trait EquivalencyStore: Send + Sync {
    /// Raw household rows; bidirectional rows are expanded by the caller
    async fn fetch_household_equivalencies(
        &self,
        household_id: &str,
    ) -> Result<Vec<EquivalencyRow>, StoreError>;
}

#[async_trait::async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn record_feedback(&self, record: &FeedbackRecord) -> Result<(), StoreError>;

    /// Feedback of a household, oldest first
    async fn list_feedback(&self, household_id: &str) -> Result<Vec<FeedbackRecord>, StoreError>;
}
