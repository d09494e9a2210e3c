use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables of the ingredient matcher.
///
/// Cache windows are expressed in seconds. The word-overlap thresholds of the
/// partial tier were tuned empirically and are kept configurable so they can
/// be revisited without code changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default = "default_taxonomy_cache_ttl_secs")]
    pub taxonomy_cache_ttl_secs: u64,
    #[serde(default = "default_household_cache_ttl_secs")]
    pub household_cache_ttl_secs: u64,
    #[serde(default = "default_feedback_cache_ttl_secs")]
    pub feedback_cache_ttl_secs: u64,
    /// Multiplier applied to confirmed pairs
    #[serde(default = "default_confirm_boost")]
    pub confirm_boost: f64,
    #[serde(default = "default_early_exit_matches")]
    pub early_exit_matches: usize,
    #[serde(default = "default_early_exit_confidence")]
    pub early_exit_confidence: f64,
    /// Substitutes are only considered while fewer matches than this exist
    #[serde(default = "default_substitute_attempt_limit")]
    pub substitute_attempt_limit: usize,
    /// Shortest token that counts towards partial overlap
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    /// Ingredients up to this many characters need an exact token match
    #[serde(default = "default_short_ingredient_max_len")]
    pub short_ingredient_max_len: usize,
    /// Shortest token allowed to match by containment
    #[serde(default = "default_min_substring_token_len")]
    pub min_substring_token_len: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            taxonomy_cache_ttl_secs: default_taxonomy_cache_ttl_secs(),
            household_cache_ttl_secs: default_household_cache_ttl_secs(),
            feedback_cache_ttl_secs: default_feedback_cache_ttl_secs(),
            confirm_boost: default_confirm_boost(),
            early_exit_matches: default_early_exit_matches(),
            early_exit_confidence: default_early_exit_confidence(),
            substitute_attempt_limit: default_substitute_attempt_limit(),
            min_token_len: default_min_token_len(),
            short_ingredient_max_len: default_short_ingredient_max_len(),
            min_substring_token_len: default_min_substring_token_len(),
        }
    }
}

impl MatchingConfig {
    pub fn taxonomy_ttl(&self) -> Duration {
        Duration::from_secs(self.taxonomy_cache_ttl_secs)
    }

    pub fn household_ttl(&self) -> Duration {
        Duration::from_secs(self.household_cache_ttl_secs)
    }

    pub fn feedback_ttl(&self) -> Duration {
        Duration::from_secs(self.feedback_cache_ttl_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.taxonomy_cache_ttl_secs == 0
            || self.household_cache_ttl_secs == 0
            || self.feedback_cache_ttl_secs == 0
        {
            return Err("Cache TTLs must be greater than zero".to_string());
        }

        if self.confirm_boost.is_nan() || self.confirm_boost < 1.0 {
            return Err(format!(
                "confirm_boost must be at least 1.0, got {}",
                self.confirm_boost
            ));
        }

        if self.early_exit_matches == 0 {
            return Err("early_exit_matches must be greater than zero".to_string());
        }

        if !(0.0..=1.0).contains(&self.early_exit_confidence) {
            return Err("early_exit_confidence must be within [0, 1]".to_string());
        }

        if self.min_token_len == 0
            || self.min_token_len > self.min_substring_token_len
            || self.min_substring_token_len > self.short_ingredient_max_len
        {
            return Err(
                "Token thresholds must satisfy 0 < min_token_len <= min_substring_token_len <= short_ingredient_max_len"
                    .to_string(),
            );
        }

        Ok(())
    }
}

fn default_taxonomy_cache_ttl_secs() -> u64 {
    600
}

fn default_household_cache_ttl_secs() -> u64 {
    300
}

fn default_feedback_cache_ttl_secs() -> u64 {
    600
}

fn default_confirm_boost() -> f64 {
    1.2
}

fn default_early_exit_matches() -> usize {
    3
}

fn default_early_exit_confidence() -> f64 {
    0.8
}

fn default_substitute_attempt_limit() -> usize {
    3
}

fn default_min_token_len() -> usize {
    3
}

fn default_short_ingredient_max_len() -> usize {
    6
}

fn default_min_substring_token_len() -> usize {
    4
}
