use std::str::FromStr;

use pantry_matching::{FeedbackRecord, FeedbackStore, MatchType, StoreError};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

use crate::table::MlFeedback;

#[derive(FromRow)]
struct FeedbackRow {
    household_id: String,
    recipe_id: Option<String>,
    recipe_ingredient: String,
    matched_product: String,
    is_correct: bool,
    correct_product_name: Option<String>,
    match_type: Option<String>,
    confidence: Option<f64>,
}

impl TryFrom<FeedbackRow> for FeedbackRecord {
    type Error = StoreError;

    fn try_from(row: FeedbackRow) -> Result<Self, Self::Error> {
        let match_type = row
            .match_type
            .as_deref()
            .map(MatchType::from_str)
            .transpose()
            .map_err(|e| StoreError::InvalidRecord(format!("match_type: {e}")))?;

        Ok(Self {
            household_id: row.household_id,
            recipe_id: row.recipe_id,
            recipe_ingredient: row.recipe_ingredient,
            matched_product: row.matched_product,
            is_correct: row.is_correct,
            correct_product_name: row.correct_product_name,
            match_type,
            confidence: row.confidence,
        })
    }
}

#[derive(Clone)]
pub struct SqliteFeedbackStore {
    pool: SqlitePool,
}

impl SqliteFeedbackStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FeedbackStore for SqliteFeedbackStore {
    async fn record_feedback(&self, record: &FeedbackRecord) -> Result<(), StoreError> {
        let statement = Query::insert()
            .into_table(MlFeedback::Table)
            .columns([
                MlFeedback::HouseholdId,
                MlFeedback::RecipeId,
                MlFeedback::RecipeIngredient,
                MlFeedback::MatchedProduct,
                MlFeedback::IsCorrect,
                MlFeedback::CorrectProductName,
                MlFeedback::MatchType,
                MlFeedback::Confidence,
            ])
            .values_panic([
                record.household_id.to_owned().into(),
                record.recipe_id.to_owned().into(),
                record.recipe_ingredient.to_owned().into(),
                record.matched_product.to_owned().into(),
                record.is_correct.into(),
                record.correct_product_name.to_owned().into(),
                record.match_type.map(|t| t.to_string()).into(),
                record.confidence.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.into()))?;

        Ok(())
    }

    async fn list_feedback(&self, household_id: &str) -> Result<Vec<FeedbackRecord>, StoreError> {
        let statement = Query::select()
            .columns([
                MlFeedback::HouseholdId,
                MlFeedback::RecipeId,
                MlFeedback::RecipeIngredient,
                MlFeedback::MatchedProduct,
                MlFeedback::IsCorrect,
                MlFeedback::CorrectProductName,
                MlFeedback::MatchType,
                MlFeedback::Confidence,
            ])
            .from(MlFeedback::Table)
            .and_where(Expr::col(MlFeedback::HouseholdId).eq(household_id))
            .order_by(MlFeedback::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, FeedbackRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.into()))?;

        rows.into_iter().map(FeedbackRecord::try_from).collect()
    }
}
