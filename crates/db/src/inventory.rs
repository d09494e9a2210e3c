use std::collections::HashMap;

use pantry_matching::{InventoryItemView, ProductInfo};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

use crate::table::{InventoryItem, Product};

#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub name: String,
    pub category: Option<String>,
    pub brand: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewInventoryItem {
    pub household_id: String,
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub quantity: f64,
    pub unit: Option<String>,
}

#[derive(FromRow)]
struct ItemRow {
    id: String,
    product_id: Option<String>,
    name: Option<String>,
    quantity: f64,
    unit: Option<String>,
}

#[derive(FromRow)]
struct ProductRow {
    id: String,
    name: String,
    category: Option<String>,
    brand: Option<String>,
}

pub async fn add_product(pool: &SqlitePool, product: NewProduct) -> anyhow::Result<String> {
    if product.name.trim().is_empty() {
        anyhow::bail!("product name is required");
    }

    let id = ulid::Ulid::new().to_string();
    let statement = Query::insert()
        .into_table(Product::Table)
        .columns([Product::Id, Product::Name, Product::Category, Product::Brand])
        .values_panic([
            id.to_owned().into(),
            product.name.into(),
            product.category.into(),
            product.brand.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(id)
}

pub async fn add_inventory_item(
    pool: &SqlitePool,
    item: NewInventoryItem,
) -> anyhow::Result<String> {
    let has_name = item.name.as_deref().is_some_and(|n| !n.trim().is_empty());
    if item.product_id.is_none() && !has_name {
        anyhow::bail!("an inventory item needs a product or a name");
    }

    if !item.quantity.is_finite() || item.quantity < 0.0 {
        anyhow::bail!("invalid quantity {}", item.quantity);
    }

    let id = ulid::Ulid::new().to_string();
    let statement = Query::insert()
        .into_table(InventoryItem::Table)
        .columns([
            InventoryItem::Id,
            InventoryItem::HouseholdId,
            InventoryItem::ProductId,
            InventoryItem::Name,
            InventoryItem::Quantity,
            InventoryItem::Unit,
        ])
        .values_panic([
            id.to_owned().into(),
            item.household_id.into(),
            item.product_id.into(),
            item.name.into(),
            item.quantity.into(),
            item.unit.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(id)
}

/// Every inventory row of a household, in insertion order, with product
/// attributes resolved. Depleted rows are included; the matcher skips them.
pub async fn load_inventory(
    pool: &SqlitePool,
    household_id: &str,
) -> anyhow::Result<Vec<InventoryItemView>> {
    let statement = Query::select()
        .columns([
            InventoryItem::Id,
            InventoryItem::ProductId,
            InventoryItem::Name,
            InventoryItem::Quantity,
            InventoryItem::Unit,
        ])
        .from(InventoryItem::Table)
        .and_where(Expr::col(InventoryItem::HouseholdId).eq(household_id))
        .order_by_expr(Expr::cust("rowid"), Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let items = sqlx::query_as_with::<_, ItemRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let product_ids = items
        .iter()
        .filter_map(|item| item.product_id.to_owned())
        .collect::<Vec<_>>();

    let mut products = HashMap::new();
    if !product_ids.is_empty() {
        let statement = Query::select()
            .columns([Product::Id, Product::Name, Product::Category, Product::Brand])
            .from(Product::Table)
            .and_where(Expr::col(Product::Id).is_in(product_ids))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        for row in sqlx::query_as_with::<_, ProductRow, _>(&sql, values)
            .fetch_all(pool)
            .await?
        {
            products.insert(
                row.id,
                ProductInfo {
                    name: row.name,
                    category: row.category,
                    brand: row.brand,
                },
            );
        }
    }

    tracing::debug!(household_id, items = items.len(), "inventory loaded");

    Ok(items
        .into_iter()
        .map(|item| {
            let product = item
                .product_id
                .as_ref()
                .and_then(|id| products.get(id).cloned());
            InventoryItemView::from_row(item.id, item.name, item.quantity, item.unit, product)
        })
        .collect())
}
