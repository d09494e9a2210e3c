use pantry_db::inventory::{self, NewInventoryItem, NewProduct};
use pantry_db::{NewEquivalency, SqliteEquivalencyStore, SqliteFeedbackStore};
use pantry_matching::{
    EquivalencyStore, FeedbackRecord, FeedbackStore, IngredientMatcher, MatchType,
    MatchingConfig,
};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_equivalency_store_round_trip() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let pool = helpers::setup_test_pool(path).await?;
    let store = SqliteEquivalencyStore::new(pool);

    store
        .add_equivalency(NewEquivalency {
            substitution_ratio: 2.0,
            is_bidirectional: true,
            notes: Some("half as much".to_owned()),
            ..NewEquivalency::new("h1", "nutritional yeast", "nooch")
        })
        .await?;
    store
        .add_equivalency(NewEquivalency::new("h2", "furikake", "rice seasoning"))
        .await?;

    let rows = store.fetch_household_equivalencies("h1").await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ingredient_name, "nutritional yeast");
    assert_eq!(rows[0].substitution_ratio, 2.0);
    assert!(rows[0].is_bidirectional);
    assert_eq!(rows[0].notes.as_deref(), Some("half as much"));

    assert!(store.fetch_household_equivalencies("h3").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_add_equivalency_rejects_bad_values() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let pool = helpers::setup_test_pool(path).await?;
    let store = SqliteEquivalencyStore::new(pool);

    let bad_ratio = NewEquivalency {
        substitution_ratio: 0.0,
        ..NewEquivalency::new("h1", "a", "b")
    };
    assert!(store.add_equivalency(bad_ratio).await.is_err());

    let bad_confidence = NewEquivalency {
        confidence_score: 1.5,
        ..NewEquivalency::new("h1", "a", "b")
    };
    assert!(store.add_equivalency(bad_confidence).await.is_err());
    assert!(store.add_equivalency(NewEquivalency::new("h1", " ", "b")).await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_feedback_store_keeps_order_and_fields() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let pool = helpers::setup_test_pool(path).await?;
    let store = SqliteFeedbackStore::new(pool);

    let rejected = FeedbackRecord::rejection("h1", "pepper", "black pepper", Some("white pepper".to_owned()))
        .with_recipe("r1")
        .with_match(MatchType::Exact, 1.0);
    let confirmed = FeedbackRecord::confirmation("h1", "pepper", "black pepper");

    store.record_feedback(&rejected).await?;
    store.record_feedback(&confirmed).await?;
    store
        .record_feedback(&FeedbackRecord::confirmation("h2", "salt", "sea salt"))
        .await?;

    let records = store.list_feedback("h1").await?;
    assert_eq!(records, [rejected, confirmed]);

    Ok(())
}

#[tokio::test]
async fn test_load_inventory_resolves_products() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let pool = helpers::setup_test_pool(path).await?;

    let product_id = inventory::add_product(
        &pool,
        NewProduct {
            name: "Black Pepper".to_owned(),
            category: Some("Spices".to_owned()),
            brand: Some("Acme".to_owned()),
        },
    )
    .await?;

    inventory::add_inventory_item(
        &pool,
        NewInventoryItem {
            household_id: "h1".to_owned(),
            product_id: Some(product_id),
            name: Some("pepper jar".to_owned()),
            quantity: 1.0,
            unit: Some("jar".to_owned()),
        },
    )
    .await?;
    inventory::add_inventory_item(
        &pool,
        NewInventoryItem {
            household_id: "h1".to_owned(),
            name: Some("sea salt".to_owned()),
            quantity: 0.0,
            ..Default::default()
        },
    )
    .await?;
    inventory::add_inventory_item(
        &pool,
        NewInventoryItem {
            household_id: "h2".to_owned(),
            name: Some("sugar".to_owned()),
            quantity: 2.0,
            ..Default::default()
        },
    )
    .await?;

    let items = inventory::load_inventory(&pool, "h1").await?;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Black Pepper");
    assert_eq!(items[0].category.as_deref(), Some("Spices"));
    assert_eq!(items[0].brand.as_deref(), Some("Acme"));
    assert_eq!(items[0].unit.as_deref(), Some("jar"));
    assert_eq!(items[1].name, "sea salt");
    assert!(!items[1].is_available());

    assert!(
        inventory::add_inventory_item(
            &pool,
            NewInventoryItem {
                household_id: "h1".to_owned(),
                quantity: 1.0,
                ..Default::default()
            },
        )
        .await
        .is_err()
    );

    Ok(())
}

#[tokio::test]
async fn test_matcher_end_to_end() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let pool = helpers::setup_test_pool(path).await?;
    let equivalencies = SqliteEquivalencyStore::new(pool.clone());
    let feedback = SqliteFeedbackStore::new(pool.clone());

    for name in ["nooch", "black pepper", "white pepper"] {
        inventory::add_inventory_item(
            &pool,
            NewInventoryItem {
                household_id: "h1".to_owned(),
                name: Some(name.to_owned()),
                quantity: 1.0,
                ..Default::default()
            },
        )
        .await?;
    }
    equivalencies
        .add_equivalency(NewEquivalency::new("h1", "nutritional yeast", "nooch"))
        .await?;

    let matcher = IngredientMatcher::embedded(MatchingConfig::default())?;
    let items = inventory::load_inventory(&pool, "h1").await?;

    let matches = matcher
        .find_household_matches("nutritional yeast", &items, "h1", &equivalencies)
        .await;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].item.name, "nooch");
    assert_eq!(matches[0].match_type, MatchType::Exact);

    matcher
        .record_feedback(
            &feedback,
            FeedbackRecord::rejection("h1", "pepper", "black pepper", None),
        )
        .await?;
    let pepper = matcher.find_ingredient_matches("pepper", &items);
    assert_eq!(pepper.len(), 1);
    assert_eq!(pepper[0].item.name, "white pepper");

    let restarted = IngredientMatcher::embedded(MatchingConfig::default())?;
    assert_eq!(restarted.hydrate_feedback(&feedback, "h1").await?, 1);
    assert_eq!(restarted.find_ingredient_matches("pepper", &items).len(), 1);

    Ok(())
}
