use pantry_matching::{
    MatchType, RecipeIngredient, StorageLocation, are_equivalent, normalize,
};

mod helpers;

use helpers::{item, matcher};

#[test]
fn test_normalize_is_idempotent() {
    for sample in ["Sea-Salt (Fine)", "  2% MILK ", "crème fraîche", "", "a__b  c"] {
        let once = normalize(sample);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn test_soup_is_never_broth() {
    assert!(!are_equivalent("chicken soup", "chicken broth", None));
    assert!(!are_equivalent("Chicken Broth", "chicken noodle soup", None));
}

#[test]
fn test_static_equivalencies() {
    assert!(are_equivalent("salt", "sea salt", None));
    assert!(!are_equivalent("salt", "pepper", None));
}

#[test]
fn test_boneless_chicken_breast_is_poultry() {
    let (matcher, _) = matcher();
    let food = matcher
        .match_food_taxonomy("boneless chicken breast", None, None)
        .expect("taxonomy match");

    assert_eq!(food.category, "poultry");
    assert_eq!(food.subcategory.as_deref(), Some("chicken"));
    assert!(food.confidence >= 0.7);
    assert!(food.metadata.portion.is_some());
}

#[test]
fn test_taxonomy_exact_beats_word_beats_substring() {
    let (matcher, _) = matcher();

    let exact = matcher.match_food_taxonomy("cremini", None, None).expect("match");
    let word = matcher.match_food_taxonomy("sliced cremini", None, None).expect("match");
    let substring = matcher.match_food_taxonomy("creminis", None, None).expect("match");

    for food in [&exact, &word, &substring] {
        assert_eq!(food.category, "produce");
        assert_eq!(food.subcategory.as_deref(), Some("mushrooms"));
    }
    assert_eq!(exact.confidence, 1.0);
    assert_eq!(word.confidence, 0.9);
    assert_eq!(substring.confidence, 0.7);

    let paste = matcher.match_food_taxonomy("tomato paste", None, None).expect("match");
    assert_eq!(paste.category, "canned_goods");
    assert_eq!(paste.subcategory.as_deref(), Some("tomato_products"));
}

#[test]
fn test_pepper_and_tomato_paste_do_not_substitute() {
    let (matcher, _) = matcher();
    assert!(!matcher.can_substitute("pepper", "tomato paste"));
    assert!(matcher.can_substitute("black pepper", "white pepper"));
}

#[test]
fn test_shelf_life_perishable_before_shelf_stable() {
    let (matcher, _) = matcher();
    let milk = matcher
        .default_shelf_life("milk", Some("dairy"), StorageLocation::Refrigerator)
        .expect("milk");
    let rice = matcher
        .default_shelf_life("rice", Some("grains"), StorageLocation::Pantry)
        .expect("rice");

    assert!(milk > 0 && milk < 20);
    assert!(rice >= 100);
    assert!(milk < rice);
}

#[test]
fn test_pepper_never_loosely_matches() {
    let (matcher, _) = matcher();

    let paste = vec![item("1", "Tomato Paste").with_category("Canned Goods")];
    assert!(matcher.find_ingredient_matches("pepper", &paste).is_empty());

    let pepper = vec![item("2", "Black Pepper").with_category("Spices")];
    let matches = matcher.find_ingredient_matches("pepper", &pepper);
    assert!(!matches.is_empty());
    assert_eq!(matches[0].match_type, MatchType::Exact);
    assert_eq!(matches[0].confidence, 1.0);
}

#[test]
fn test_pepper_ignores_pepper_lookalikes() {
    let (matcher, _) = matcher();
    let inventory = vec![item("1", "pepperoni"), item("2", "peppermint tea")];

    let matches = matcher.find_ingredient_matches("pepper", &inventory);
    assert!(matches.is_empty(), "{matches:?}");
}

#[test]
fn test_butter_never_partial_matches_toffee() {
    let (matcher, _) = matcher();
    let inventory = vec![item("1", "Butter Toffee")];

    let matches = matcher.find_ingredient_matches("butter", &inventory);
    assert!(matches.iter().all(|m| m.match_type != MatchType::Partial));
    assert!(matches.is_empty());
}

#[test]
fn test_tiers_and_ordering() {
    let (matcher, _) = matcher();
    let inventory = vec![
        item("sub", "turkey legs"),
        item("partial", "chicken wings"),
        item("exact", "Boneless Chicken Breast"),
    ];

    let matches = matcher.find_ingredient_matches("chicken breast", &inventory);
    let order: Vec<_> = matches.iter().map(|m| (m.item.id.as_str(), m.match_type)).collect();

    assert_eq!(
        order,
        [
            ("exact", MatchType::Exact),
            ("partial", MatchType::Partial),
            ("sub", MatchType::Category),
        ]
    );
    assert_eq!(matches[1].confidence, 0.5);
    assert_eq!(matches[2].confidence, 0.5);
}

#[test]
fn test_same_subcategory_scores_higher_than_same_category() {
    let (matcher, _) = matcher();
    let inventory = vec![item("1", "kale"), item("2", "tomatoes")];

    let matches = matcher.find_ingredient_matches("spinach", &inventory);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].item.id, "1");
    assert_eq!(matches[0].confidence, 0.8);
    assert_eq!(matches[1].confidence, 0.5);
    assert!(matches.iter().all(|m| m.match_type == MatchType::Category));
}

#[test]
fn test_early_exit_returns_same_top_three() {
    let (matcher, _) = matcher();
    let head = vec![item("1", "sea salt"), item("2", "kosher salt"), item("3", "table salt")];
    let tails = [
        vec![item("4", "iodized salt"), item("5", "salt")],
        vec![item("5", "salt"), item("4", "iodized salt"), item("6", "flaky salt")],
        vec![],
    ];

    let mut results = Vec::new();
    for tail in tails {
        let inventory: Vec<_> = head.iter().cloned().chain(tail).collect();
        let ids: Vec<String> = matcher
            .find_ingredient_matches("salt", &inventory)
            .into_iter()
            .map(|m| m.item.id)
            .collect();
        results.push(ids);
    }

    assert_eq!(results[0], ["1", "2", "3"]);
    assert!(results.iter().all(|ids| ids == &results[0]));
}

#[test]
fn test_substitutes_only_while_few_matches() {
    let (matcher, _) = matcher();

    let matches = matcher.find_ingredient_matches("butter", &[item("1", "ghee")]);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].match_type, MatchType::Substitute);
    assert_eq!(matches[0].confidence, 0.4);

    let dairy = [item("2", "whole milk"), item("3", "cheddar"), item("4", "greek yogurt")];

    let ghee_last: Vec<_> = dairy.iter().cloned().chain([item("1", "ghee")]).collect();
    let matches = matcher.find_ingredient_matches("butter", &ghee_last);
    assert_eq!(matches.len(), 3);
    assert!(matches.iter().all(|m| m.match_type == MatchType::Category));

    let ghee_first: Vec<_> = [item("1", "ghee")].into_iter().chain(dairy).collect();
    let matches = matcher.find_ingredient_matches("butter", &ghee_first);
    assert_eq!(matches.len(), 4);
    assert_eq!(matches[3].match_type, MatchType::Substitute);
}

#[test]
fn test_shared_category_onion_and_shallots() {
    let (matcher, _) = matcher();
    let matches = matcher.find_ingredient_matches("onion", &[item("1", "shallots")]);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].match_type, MatchType::Category);
    assert_eq!(matches[0].confidence, 0.8);
}

#[test]
fn test_recipe_availability() {
    let (matcher, _) = matcher();
    let inventory = vec![
        item("1", "All-Purpose Flour"),
        item("2", "granulated sugar"),
        item("3", "Large Eggs"),
    ];
    let recipe = [
        RecipeIngredient::required("flour"),
        RecipeIngredient::required("sugar"),
        RecipeIngredient::required("eggs"),
        RecipeIngredient::optional("chocolate chips"),
    ];

    let availability = matcher.check_recipe_availability(&recipe, &inventory);
    assert!(availability.can_make);
    assert_eq!(availability.availability, 100);
    assert!(availability.missing_required.is_empty());

    let recipe = [
        RecipeIngredient::required("flour"),
        RecipeIngredient::required("sugar"),
        RecipeIngredient::required("eggs"),
        RecipeIngredient::required("saffron"),
    ];
    let availability = matcher.check_recipe_availability(&recipe, &inventory);
    assert!(!availability.can_make);
    assert_eq!(availability.availability, 75);
    assert_eq!(availability.missing_required, ["saffron"]);
    assert_eq!(availability.matches.len(), 3);
}
