use sea_query::{
    ColumnDef, Expr, ForeignKey, ForeignKeyAction, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::{InventoryItem, Product};

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(InventoryItem::Table)
        .col(
            ColumnDef::new(InventoryItem::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(InventoryItem::HouseholdId)
                .string()
                .not_null(),
        )
        .col(ColumnDef::new(InventoryItem::ProductId).string().string_len(26))
        .col(ColumnDef::new(InventoryItem::Name).string())
        .col(
            ColumnDef::new(InventoryItem::Quantity)
                .double()
                .not_null()
                .default(0.0),
        )
        .col(ColumnDef::new(InventoryItem::Unit).string())
        .col(
            ColumnDef::new(InventoryItem::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_inventory_item_product")
                .from(InventoryItem::Table, InventoryItem::ProductId)
                .to(Product::Table, Product::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(InventoryItem::Table).to_owned()
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
