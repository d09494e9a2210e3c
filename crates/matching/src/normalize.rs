/// Canonicalize a free-text ingredient or product name for comparison
///
/// Lowercases, replaces every character that is neither a word character nor
/// whitespace with a space, collapses whitespace runs and trims.
///
/// ```
/// use pantry_matching::normalize;
///
/// assert_eq!(normalize("  All-Purpose   Flour! "), "all purpose flour");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(name: &str) -> String {
    let replaced: String = name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split an already normalized string into tokens
pub fn tokens(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|t| !t.is_empty()).collect()
}

/// Whole-word containment: `needle` appears in `haystack` as a contiguous run
/// of complete tokens. Both inputs must be normalized.
pub fn contains_words(haystack: &str, needle: &str) -> bool {
    window_match(haystack, needle, |h, n| h == n)
}

/// Whole-word containment that tolerates simple plural suffixes ("s", "es")
/// on either side, so "tomato" is found in "canned tomatoes".
pub fn contains_phrase(haystack: &str, needle: &str) -> bool {
    window_match(haystack, needle, same_word)
}

/// Token equality up to a trailing "s" / "es"
pub fn same_word(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }

    let (short, long) = if a.len() < b.len() { (a, b) } else { (b, a) };
    match long.strip_prefix(short) {
        Some("s") | Some("es") => !short.is_empty(),
        _ => false,
    }
}

fn window_match(haystack: &str, needle: &str, eq: impl Fn(&str, &str) -> bool) -> bool {
    let needle = tokens(needle);
    if needle.is_empty() {
        return false;
    }

    let haystack = tokens(haystack);
    if needle.len() > haystack.len() {
        return false;
    }

    haystack
        .windows(needle.len())
        .any(|window| window.iter().zip(&needle).all(|(h, n)| eq(h, n)))
}
