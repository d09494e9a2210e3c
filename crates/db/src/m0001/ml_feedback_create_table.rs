use sea_query::{ColumnDef, Expr, Table, TableCreateStatement, TableDropStatement};

use crate::table::MlFeedback;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(MlFeedback::Table)
        .col(
            ColumnDef::new(MlFeedback::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(MlFeedback::HouseholdId).string().not_null())
        .col(ColumnDef::new(MlFeedback::RecipeId).string())
        .col(
            ColumnDef::new(MlFeedback::RecipeIngredient)
                .string()
                .not_null(),
        )
        .col(
            ColumnDef::new(MlFeedback::MatchedProduct)
                .string()
                .not_null(),
        )
        .col(ColumnDef::new(MlFeedback::IsCorrect).boolean().not_null())
        .col(ColumnDef::new(MlFeedback::CorrectProductName).string())
        .col(ColumnDef::new(MlFeedback::MatchType).string().string_len(15))
        .col(ColumnDef::new(MlFeedback::Confidence).double())
        .col(
            ColumnDef::new(MlFeedback::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(MlFeedback::Table).to_owned()
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
