use std::sync::Arc;

use serde::Serialize;
use strum::{AsRefStr, Display};

use super::score::{KEYWORD_MIN_SCORE, score_term};
use super::tree::{NodeKind, NodeMetadata, PortionInfo, Taxonomy, TaxonomyNode};
use crate::cache::{Clock, TtlCache};
use crate::error::MatchingResult;
use crate::normalize::{contains_phrase, normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TermKind {
    Item,
    Cut,
    Keyword,
}

/// Best taxonomy match for a product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodMatch {
    pub category: String,
    pub subcategory: Option<String>,
    pub matched_term: String,
    pub term_kind: TermKind,
    pub confidence: f64,
    pub metadata: NodeMetadata,
}

impl FoodMatch {
    pub fn same_category(&self, other: &FoodMatch) -> bool {
        self.category == other.category
    }

    pub fn same_subcategory(&self, other: &FoodMatch) -> bool {
        self.same_category(other)
            && self.subcategory.is_some()
            && self.subcategory == other.subcategory
    }
}

type CacheKey = (String, Option<String>, Option<String>);

struct Candidate<'a> {
    category: &'a str,
    subcategory: Option<&'a str>,
    term: &'a str,
    kind: TermKind,
    confidence: f64,
    metadata: &'a NodeMetadata,
}

struct Walk<'a> {
    name: &'a str,
    search: &'a str,
    best: Option<Candidate<'a>>,
}

impl<'a> Walk<'a> {
    fn consider(
        &mut self,
        node: &'a TaxonomyNode,
        category: &'a str,
        subcategory: Option<&'a str>,
        terms: &'a [String],
        kind: TermKind,
    ) {
        for term in terms {
            let confidence = score_term(term, self.name, self.search);
            if kind == TermKind::Keyword && confidence <= KEYWORD_MIN_SCORE {
                continue;
            }

            let better = match &self.best {
                Some(best) => confidence > best.confidence,
                None => confidence > 0.0,
            };

            if better {
                tracing::trace!(term = %term, confidence, category, "taxonomy candidate");
                self.best = Some(Candidate {
                    category,
                    subcategory,
                    term,
                    kind,
                    confidence,
                    metadata: &node.metadata,
                });
            }
        }
    }

    /// Items and cuts first, then subcategories, then the node's own
    /// keywords, so the most specific node wins a tie.
    fn visit(&mut self, node: &'a TaxonomyNode, category: &'a str, subcategory: Option<&'a str>) {
        match &node.kind {
            NodeKind::Leaf { items, cuts } => {
                self.consider(node, category, subcategory, items, TermKind::Item);
                self.consider(node, category, subcategory, cuts, TermKind::Cut);
            }
            NodeKind::Branch { children } => {
                for child in children {
                    let child_subcategory = subcategory.or(Some(child.name.as_str()));
                    self.visit(child, category, child_subcategory);
                }
            }
        }

        self.consider(node, category, subcategory, &node.keywords, TermKind::Keyword);
    }
}

/// Score a product against the whole taxonomy, uncached
pub fn best_match(
    taxonomy: &Taxonomy,
    name: &str,
    category: Option<&str>,
    brand: Option<&str>,
) -> Option<FoodMatch> {
    let name = normalize(name);
    if name.is_empty() {
        return None;
    }

    let search = [Some(name.as_str()), category, brand]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let search = normalize(&search);

    let mut walk = Walk {
        name: &name,
        search: &search,
        best: None,
    };

    for node in &taxonomy.categories {
        walk.visit(node, &node.name, None);
    }

    walk.best.map(|best| FoodMatch {
        category: best.category.to_owned(),
        subcategory: best.subcategory.map(str::to_owned),
        matched_term: best.term.to_owned(),
        term_kind: best.kind,
        confidence: best.confidence,
        metadata: best.metadata.clone(),
    })
}

/// Taxonomy lookups with a time-bounded result cache
pub struct FoodTaxonomyMatcher {
    taxonomy: Arc<Taxonomy>,
    cache: TtlCache<CacheKey, Option<FoodMatch>>,
}

impl FoodTaxonomyMatcher {
    pub fn new(taxonomy: Arc<Taxonomy>, ttl: std::time::Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            taxonomy,
            cache: TtlCache::new(ttl, clock),
        }
    }

    /// Matcher over the taxonomy bundled with the crate
    pub fn embedded(ttl: std::time::Duration, clock: Arc<dyn Clock>) -> MatchingResult<Self> {
        Ok(Self::new(Arc::new(Taxonomy::embedded()?), ttl, clock))
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn match_food(
        &self,
        name: &str,
        category: Option<&str>,
        brand: Option<&str>,
    ) -> Option<FoodMatch> {
        let key = (
            normalize(name),
            category.map(normalize).filter(|c| !c.is_empty()),
            brand.map(normalize).filter(|b| !b.is_empty()),
        );

        self.cache.get_or_insert_with(key, || {
            best_match(&self.taxonomy, name, category, brand)
        })
    }

    pub fn recipe_matches(&self, name: &str) -> Vec<String> {
        self.match_food(name, None, None)
            .map(|m| m.metadata.recipe_matches().to_vec())
            .unwrap_or_default()
    }

    pub fn substitutions(&self, name: &str) -> Vec<String> {
        self.match_food(name, None, None)
            .map(|m| m.metadata.substitutions().to_vec())
            .unwrap_or_default()
    }

    pub fn portion_info(&self, name: &str) -> Option<PortionInfo> {
        self.match_food(name, None, None)
            .and_then(|m| m.metadata.portion)
    }

    /// Two foods can stand in for each other when they share a category and
    /// subcategory, or when either one's substitution list names the other.
    pub fn can_substitute(&self, a: &str, b: &str) -> bool {
        let a_norm = normalize(a);
        let b_norm = normalize(b);
        if a_norm.is_empty() || b_norm.is_empty() {
            return false;
        }

        let a_match = self.match_food(a, None, None);
        let b_match = self.match_food(b, None, None);

        if let (Some(a_match), Some(b_match)) = (&a_match, &b_match) {
            if a_match.same_subcategory(b_match) {
                return true;
            }
        }

        let names = |food: &Option<FoodMatch>, other: &str| {
            food.as_ref().is_some_and(|m| {
                m.metadata
                    .substitutions()
                    .iter()
                    .any(|s| contains_phrase(s, other) || contains_phrase(other, s))
            })
        };

        names(&a_match, &b_norm) || names(&b_match, &a_norm)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl std::fmt::Debug for FoodTaxonomyMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoodTaxonomyMatcher")
            .field("categories", &self.taxonomy.categories.len())
            .field("cache", &self.cache)
            .finish()
    }
}
