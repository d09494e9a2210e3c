use std::time::Duration;

use pantry_matching::{FeedbackRecord, MatchType};

mod helpers;

use helpers::{FakeFeedbackStore, item, matcher};

#[test]
fn test_rejected_pair_is_suppressed() {
    let (matcher, _) = matcher();
    let inventory = vec![item("1", "Black Pepper"), item("2", "white pepper")];

    assert_eq!(matcher.find_ingredient_matches("pepper", &inventory).len(), 2);

    matcher.apply_ml_feedback("Pepper", "black pepper", Some("White Pepper"));
    let matches = matcher.find_ingredient_matches("pepper", &inventory);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].item.id, "2");
    assert_eq!(
        matcher.correction_for("pepper", "Black Pepper").as_deref(),
        Some("white pepper")
    );

    matcher.confirm_ml_match("pepper", "black pepper");
    assert_eq!(matcher.find_ingredient_matches("pepper", &inventory).len(), 2);
}

#[test]
fn test_confirmation_boost_expires() {
    let (matcher, clock) = matcher();
    let inventory = vec![item("1", "mozzarella")];

    let before = matcher.find_ingredient_matches("cheddar", &inventory);
    assert_eq!(before[0].match_type, MatchType::Category);
    assert_eq!(before[0].confidence, 0.8);

    matcher.confirm_ml_match("cheddar", "mozzarella");
    let boosted = matcher.find_ingredient_matches("cheddar", &inventory);
    assert!(boosted[0].confidence > 0.8 && boosted[0].confidence <= 1.0);

    clock.advance(Duration::from_secs(601));
    let after = matcher.find_ingredient_matches("cheddar", &inventory);
    assert_eq!(after[0].confidence, 0.8);
}

#[test]
fn test_confirmation_never_outranks_stronger_tier() {
    let (matcher, _) = matcher();
    let inventory = vec![item("cat", "turkey legs"), item("partial", "chicken wings")];

    matcher.confirm_ml_match("chicken breast", "turkey legs");
    let matches = matcher.find_ingredient_matches("chicken breast", &inventory);

    assert_eq!(matches[0].item.id, "partial");
    assert_eq!(matches[0].match_type, MatchType::Partial);
    assert_eq!(matches[1].item.id, "cat");
    assert!(matches[1].confidence <= matches[0].confidence);
}

#[test]
fn test_confirmation_boosts_match_ranked_above_weaker_tier() {
    let (matcher, _) = matcher();
    let inventory = vec![item("moz", "mozzarella"), item("jack", "cheddarjack")];

    let before = matcher.find_ingredient_matches("cheddar", &inventory);
    assert_eq!(before[0].item.id, "moz");
    assert_eq!(before[0].confidence, 0.8);

    matcher.confirm_ml_match("cheddar", "mozzarella");
    let after = matcher.find_ingredient_matches("cheddar", &inventory);
    assert_eq!(after[0].item.id, "moz");
    assert!((after[0].confidence - 0.96).abs() < 1e-9, "{}", after[0].confidence);
    assert!(after.iter().any(|m| m.item.id == "jack" && m.confidence == 0.5));
}

#[test]
fn test_confirmation_boost_is_capped_at_one() {
    let (matcher, _) = matcher();
    let inventory = vec![item("1", "Black Pepper")];

    matcher.confirm_ml_match("black pepper", "black pepper");
    let matches = matcher.find_ingredient_matches("black pepper", &inventory);
    assert_eq!(matches[0].match_type, MatchType::Exact);
    assert_eq!(matches[0].confidence, 1.0);
}

#[tokio::test]
async fn test_record_feedback_writes_through() -> anyhow::Result<()> {
    let (matcher, _) = matcher();
    let store = FakeFeedbackStore::default();
    let inventory = vec![item("1", "Black Pepper")];

    let record = FeedbackRecord::rejection("h1", "pepper", "Black Pepper", None)
        .with_recipe("r1")
        .with_match(MatchType::Exact, 1.0);
    matcher.record_feedback(&store, record.clone()).await?;

    assert_eq!(*store.records.lock().expect("records lock"), [record]);
    assert!(matcher.find_ingredient_matches("pepper", &inventory).is_empty());

    Ok(())
}

#[tokio::test]
async fn test_hydrate_feedback_restores_state() -> anyhow::Result<()> {
    let store = FakeFeedbackStore::default();
    {
        let (matcher, _) = matcher();
        matcher
            .record_feedback(
                &store,
                FeedbackRecord::rejection("h1", "pepper", "black pepper", None),
            )
            .await?;
        matcher
            .record_feedback(
                &store,
                FeedbackRecord::confirmation("h1", "cheddar", "mozzarella"),
            )
            .await?;
    }

    let (fresh, _) = matcher();
    assert_eq!(fresh.hydrate_feedback(&store, "h2").await?, 0);
    assert!(!fresh.feedback().is_blocked("pepper", "black pepper"));

    assert_eq!(fresh.hydrate_feedback(&store, "h1").await?, 2);
    assert!(fresh.feedback().is_blocked("pepper", "black pepper"));
    assert!(fresh.feedback().is_confirmed("cheddar", "mozzarella"));

    Ok(())
}
