use crate::normalize::contains_words;

/// Scores at or below this never count when the term is a keyword
pub const KEYWORD_MIN_SCORE: f64 = 0.3;

const FUZZY_MIN_SIMILARITY: f64 = 0.7;

/// Confidence that `term` describes the product.
///
/// `name` is the normalized product name, `search` the normalized
/// name + category + brand text. All inputs must be normalized.
///
/// | rule                              | score          |
/// |-----------------------------------|----------------|
/// | term equals name                  | 1.0            |
/// | term is a whole word run of name  | 0.9            |
/// | term is a substring of name       | 0.7            |
/// | term is a whole word run of search| 0.5            |
/// | term is a substring of search     | 0.3            |
/// | Levenshtein similarity > 0.7      | similarity/2   |
pub fn score_term(term: &str, name: &str, search: &str) -> f64 {
    if term.is_empty() {
        return 0.0;
    }

    if term == name {
        return 1.0;
    }

    if contains_words(name, term) {
        return 0.9;
    }

    if name.contains(term) {
        return 0.7;
    }

    if contains_words(search, term) {
        return 0.5;
    }

    if search.contains(term) {
        return 0.3;
    }

    let similarity = strsim::normalized_levenshtein(name, term);
    if similarity > FUZZY_MIN_SIMILARITY {
        similarity * 0.5
    } else {
        0.0
    }
}
