use pantry_matching::{EquivalencyRow, EquivalencyStore, StoreError};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

use crate::table::IngredientEquivalency;

#[derive(FromRow)]
struct EquivalencyRecord {
    ingredient_name: String,
    equivalent_name: String,
    confidence_score: f64,
    substitution_ratio: f64,
    notes: Option<String>,
    is_bidirectional: bool,
}

impl From<EquivalencyRecord> for EquivalencyRow {
    fn from(record: EquivalencyRecord) -> Self {
        Self {
            ingredient_name: record.ingredient_name,
            equivalent_name: record.equivalent_name,
            confidence_score: record.confidence_score,
            substitution_ratio: record.substitution_ratio,
            notes: record.notes,
            is_bidirectional: record.is_bidirectional,
        }
    }
}

/// A household-defined equivalency to persist
#[derive(Debug, Clone)]
pub struct NewEquivalency {
    pub household_id: String,
    pub ingredient_name: String,
    pub equivalent_name: String,
    pub confidence_score: f64,
    pub substitution_ratio: f64,
    pub notes: Option<String>,
    pub is_bidirectional: bool,
}

impl NewEquivalency {
    pub fn new(
        household_id: impl Into<String>,
        ingredient_name: impl Into<String>,
        equivalent_name: impl Into<String>,
    ) -> Self {
        Self {
            household_id: household_id.into(),
            ingredient_name: ingredient_name.into(),
            equivalent_name: equivalent_name.into(),
            confidence_score: 1.0,
            substitution_ratio: 1.0,
            notes: None,
            is_bidirectional: false,
        }
    }
}

#[derive(Clone)]
pub struct SqliteEquivalencyStore {
    pool: SqlitePool,
}

impl SqliteEquivalencyStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn add_equivalency(&self, equivalency: NewEquivalency) -> anyhow::Result<String> {
        if equivalency.ingredient_name.trim().is_empty()
            || equivalency.equivalent_name.trim().is_empty()
        {
            anyhow::bail!("ingredient and equivalent names are required");
        }

        if !(0.0..=1.0).contains(&equivalency.confidence_score) {
            anyhow::bail!(
                "confidence score must be within 0..=1, got {}",
                equivalency.confidence_score
            );
        }

        if equivalency.substitution_ratio <= 0.0 {
            anyhow::bail!(
                "substitution ratio must be positive, got {}",
                equivalency.substitution_ratio
            );
        }

        let id = ulid::Ulid::new().to_string();
        let statement = Query::insert()
            .into_table(IngredientEquivalency::Table)
            .columns([
                IngredientEquivalency::Id,
                IngredientEquivalency::HouseholdId,
                IngredientEquivalency::IngredientName,
                IngredientEquivalency::EquivalentName,
                IngredientEquivalency::ConfidenceScore,
                IngredientEquivalency::SubstitutionRatio,
                IngredientEquivalency::Notes,
                IngredientEquivalency::IsBidirectional,
            ])
            .values_panic([
                id.to_owned().into(),
                equivalency.household_id.into(),
                equivalency.ingredient_name.into(),
                equivalency.equivalent_name.into(),
                equivalency.confidence_score.into(),
                equivalency.substitution_ratio.into(),
                equivalency.notes.into(),
                equivalency.is_bidirectional.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(id)
    }
}

#[async_trait::async_trait]
impl EquivalencyStore for SqliteEquivalencyStore {
    async fn fetch_household_equivalencies(
        &self,
        household_id: &str,
    ) -> Result<Vec<EquivalencyRow>, StoreError> {
        let statement = Query::select()
            .columns([
                IngredientEquivalency::IngredientName,
                IngredientEquivalency::EquivalentName,
                IngredientEquivalency::ConfidenceScore,
                IngredientEquivalency::SubstitutionRatio,
                IngredientEquivalency::Notes,
                IngredientEquivalency::IsBidirectional,
            ])
            .from(IngredientEquivalency::Table)
            .and_where(Expr::col(IngredientEquivalency::HouseholdId).eq(household_id))
            .order_by(IngredientEquivalency::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let records = sqlx::query_as_with::<_, EquivalencyRecord, _>(&sql, values)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.into()))?;

        Ok(records.into_iter().map(Into::into).collect())
    }
}
