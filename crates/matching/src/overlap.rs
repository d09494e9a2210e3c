//! Word overlap heuristic behind the partial match tier.

use crate::config::MatchingConfig;
use crate::exclusions::{canonical_pepper, is_excluded_pair, pepper_conflict};
use crate::normalize::{same_word, tokens};

/// Words that describe preparation, size or colour rather than the food
const DESCRIPTORS: &[&str] = &[
    "fresh", "frozen", "dried", "chopped", "diced", "sliced", "minced", "ground", "whole", "large",
    "small", "medium", "organic", "raw", "cooked", "boneless", "skinless", "unsalted", "salted",
    "low", "fat", "free", "reduced", "extra", "light", "dark", "red", "green", "white", "black",
    "yellow", "sweet", "hot", "mild", "plain",
];

/// Tokens that never count as overlap on their own
const NON_OVERLAP: &[&str] = &["soup", "soups", "broth", "broths"];

fn meaningful_tokens<'a>(normalized: &'a str, config: &MatchingConfig) -> Vec<&'a str> {
    tokens(normalized)
        .into_iter()
        .filter(|t| t.chars().count() >= config.min_token_len)
        .filter(|t| !DESCRIPTORS.contains(t) && !NON_OVERLAP.contains(t))
        .map(canonical_pepper)
        .collect()
}

fn contains_token(longer: &str, shorter: &str, config: &MatchingConfig) -> bool {
    shorter.chars().count() >= config.min_substring_token_len && longer.contains(shorter)
}

/// Whether the normalized ingredient and product share a meaningful word.
///
/// Short ingredients need an exact token match (plural suffixes tolerated);
/// longer ones also accept one token containing another when the contained
/// token is long enough.
pub fn has_word_overlap(ingredient: &str, product: &str, config: &MatchingConfig) -> bool {
    let ingredient_tokens = meaningful_tokens(ingredient, config);
    let product_tokens = meaningful_tokens(product, config);

    if ingredient_tokens.is_empty() || product_tokens.is_empty() {
        return false;
    }

    let short = ingredient.chars().count() <= config.short_ingredient_max_len;

    ingredient_tokens.iter().any(|i| {
        product_tokens.iter().any(|p| {
            if same_word(i, p) {
                return true;
            }
            !short && (contains_token(p, i, config) || contains_token(i, p, config))
        })
    })
}

/// Partial tier check over normalized names: no exclusion applies and the
/// names overlap.
pub fn is_partial_match(ingredient: &str, product: &str, config: &MatchingConfig) -> bool {
    if is_excluded_pair(ingredient, product) || pepper_conflict(ingredient, product) {
        return false;
    }

    has_word_overlap(ingredient, product, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(ingredient: &str, product: &str) -> bool {
        is_partial_match(ingredient, product, &MatchingConfig::default())
    }

    #[test]
    fn test_short_ingredients_need_exact_tokens() {
        assert!(partial("onion", "yellow onions"));
        assert!(!partial("oats", "goats cheese"));
        assert!(!partial("pepper", "tomato paste"));
    }

    #[test]
    fn test_long_ingredients_allow_token_containment() {
        assert!(partial("cheddar cheese", "cheddarcheese slices"));
        assert!(partial("blueberry muffins", "blueberry jam"));
        assert!(!partial("mozzarella sticks", "ice cream"));
    }

    #[test]
    fn test_soup_and_broth_never_count() {
        assert!(!partial("tomato soup", "chicken soup"));
        assert!(!partial("vegetable broth", "beef broth"));
        assert!(!partial("chicken soup", "chicken broth"));
    }

    #[test]
    fn test_descriptors_are_ignored() {
        assert!(!partial("fresh basil", "fresh mozzarella"));
        assert!(!partial("red onion", "red lentils"));
    }

    #[test]
    fn test_pepper_only_matches_pepper_words() {
        assert!(partial("pepper", "black pepper"));
        assert!(partial("pepper", "whole peppercorns"));
        assert!(!partial("pepper", "pepperoni pizza"));
        assert!(!partial("peppermint", "pepper"));
    }

    #[test]
    fn test_butter_compounds_are_not_partial() {
        assert!(!partial("butter", "butter toffee"));
        assert!(!partial("butter", "butter crackers"));
        assert!(partial("butter", "salted butter"));
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let strict = MatchingConfig {
            min_substring_token_len: 6,
            ..Default::default()
        };
        assert!(has_word_overlap("blueberries", "berries", &MatchingConfig::default()));
        assert!(has_word_overlap("blueberries", "berries", &strict));
        assert!(has_word_overlap("strawberry jam", "berry", &MatchingConfig::default()));
        assert!(!has_word_overlap("strawberry jam", "berry", &strict));
    }
}
