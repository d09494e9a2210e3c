use sea_query::{ColumnDef, Expr, Table, TableCreateStatement, TableDropStatement};

use crate::table::IngredientEquivalency;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(IngredientEquivalency::Table)
        .col(
            ColumnDef::new(IngredientEquivalency::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(IngredientEquivalency::HouseholdId)
                .string()
                .not_null(),
        )
        .col(
            ColumnDef::new(IngredientEquivalency::IngredientName)
                .string()
                .not_null(),
        )
        .col(
            ColumnDef::new(IngredientEquivalency::EquivalentName)
                .string()
                .not_null(),
        )
        .col(
            ColumnDef::new(IngredientEquivalency::ConfidenceScore)
                .double()
                .not_null()
                .default(1.0),
        )
        .col(
            ColumnDef::new(IngredientEquivalency::SubstitutionRatio)
                .double()
                .not_null()
                .default(1.0),
        )
        .col(ColumnDef::new(IngredientEquivalency::Notes).string())
        .col(
            ColumnDef::new(IngredientEquivalency::IsBidirectional)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(IngredientEquivalency::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(IngredientEquivalency::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
