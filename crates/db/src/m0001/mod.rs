mod ingredient_equivalency_create_household_idx;
mod ingredient_equivalency_create_table;
mod inventory_item_create_household_idx;
mod inventory_item_create_table;
mod ml_feedback_create_household_idx;
mod ml_feedback_create_table;
mod product_create_table;

use sqlx_migrator::vec_box;

pub struct M0001;

sqlx_migrator::sqlite_migration!(
    M0001,
    "pantry",
    "m0001",
    vec_box![],
    vec_box![
        product_create_table::Operation,
        inventory_item_create_table::Operation,
        inventory_item_create_household_idx::Operation,
        ingredient_equivalency_create_table::Operation,
        ingredient_equivalency_create_household_idx::Operation,
        ml_feedback_create_table::Operation,
        ml_feedback_create_household_idx::Operation
    ]
);
