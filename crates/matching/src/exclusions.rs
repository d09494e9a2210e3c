//! Known false-positive pairs.
//!
//! These rules are consulted before any equivalency table or match tier and
//! always win: a pair rejected here never matches.

use crate::normalize::{contains_phrase, tokens};

/// A base ingredient that must not match compound products built on it,
/// e.g. "butter" against "butter toffee".
struct CompoundRule {
    base: &'static str,
    markers: &'static [&'static str],
}

const COMPOUND_RULES: &[CompoundRule] = &[
    CompoundRule {
        base: "butter",
        markers: &[
            "chip", "chips", "cracker", "crackers", "cookie", "cookies", "popcorn", "toffee",
            "candy", "pretzel", "pretzels", "peanut", "almond", "cashew", "biscuit", "biscuits",
            "cup", "cups",
        ],
    },
    CompoundRule {
        base: "cheese",
        markers: &[
            "cracker", "crackers", "puffs", "curls", "chips", "popcorn", "crisps", "dip",
        ],
    },
];

/// Words that denote the pepper spice. Anything else starting with "pepper"
/// (peppermint, pepperoni, pepperjack) is a different food.
const PEPPER_WORDS: &[&str] = &["pepper", "peppers", "peppercorn", "peppercorns"];

/// Whether the pair is a known false positive. Inputs must be normalized.
pub fn is_excluded_pair(a: &str, b: &str) -> bool {
    soup_broth_conflict(a, b) || compound_conflict(a, b)
}

/// A soup is never a broth, whatever the tables say.
pub fn soup_broth_conflict(a: &str, b: &str) -> bool {
    (a.contains("soup") && b.contains("broth")) || (a.contains("broth") && b.contains("soup"))
}

fn compound_conflict(a: &str, b: &str) -> bool {
    COMPOUND_RULES.iter().any(|rule| {
        if !contains_phrase(a, rule.base) || !contains_phrase(b, rule.base) {
            return false;
        }

        let a_tokens = tokens(a);
        let b_tokens = tokens(b);
        rule.markers
            .iter()
            .any(|marker| a_tokens.contains(marker) != b_tokens.contains(marker))
    })
}

/// "pepper" only ever word-matches pepper or peppercorn.
///
/// When either side mentions a pepper-family word, both sides must mention
/// exactly the same pepper-family words, with pepper/peppercorn treated as one.
pub fn pepper_conflict(a: &str, b: &str) -> bool {
    let a_words = pepper_family(a);
    let b_words = pepper_family(b);

    if a_words.is_empty() && b_words.is_empty() {
        return false;
    }

    a_words != b_words
}

/// Fold peppercorn(s) and peppers into "pepper"; other tokens pass through
pub fn canonical_pepper(token: &str) -> &str {
    if PEPPER_WORDS.contains(&token) {
        "pepper"
    } else {
        token
    }
}

fn pepper_family(normalized: &str) -> Vec<&str> {
    let mut words: Vec<&str> = tokens(normalized)
        .into_iter()
        .filter(|t| t.starts_with("pepper"))
        .map(canonical_pepper)
        .collect();
    words.sort_unstable();
    words.dedup();
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soup_never_matches_broth() {
        assert!(is_excluded_pair("chicken soup", "chicken broth"));
        assert!(is_excluded_pair("beef broth", "french onion soup"));
        assert!(!is_excluded_pair("chicken broth", "chicken stock"));
    }

    #[test]
    fn test_butter_compounds_are_excluded() {
        assert!(is_excluded_pair("butter", "butter toffee"));
        assert!(is_excluded_pair("butter", "butter cookies"));
        assert!(is_excluded_pair("butter", "peanut butter"));
        assert!(is_excluded_pair("peanut butter", "peanut butter cups"));
        assert!(!is_excluded_pair("butter", "unsalted butter"));
        assert!(!is_excluded_pair("peanut butter", "creamy peanut butter"));
    }

    #[test]
    fn test_cheese_snacks_are_excluded() {
        assert!(is_excluded_pair("cheddar cheese", "cheese crackers"));
        assert!(!is_excluded_pair("cheese", "cheddar cheese"));
    }

    #[test]
    fn test_unrelated_pairs_are_not_excluded() {
        assert!(!is_excluded_pair("salt", "pepper"));
        assert!(!is_excluded_pair("flour", "sugar"));
    }

    #[test]
    fn test_pepper_conflict() {
        assert!(!pepper_conflict("pepper", "black pepper"));
        assert!(!pepper_conflict("pepper", "whole peppercorns"));
        assert!(pepper_conflict("pepper", "pepperoni"));
        assert!(pepper_conflict("peppermint extract", "black pepper"));
        assert!(pepper_conflict("pepper", "tomato paste"));
        assert!(!pepper_conflict("tomato paste", "tomato sauce"));
    }
}
