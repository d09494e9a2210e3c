use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MatchingError, MatchingResult};
use crate::normalize::normalize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortionInfo {
    pub standard_portion: String,
    #[serde(default)]
    pub servings_per_pound: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeftoverInfo {
    pub storage_days: u32,
    #[serde(default)]
    pub ideas: Vec<String>,
}

/// Metadata attached to a taxonomy node.
///
/// Values are inherited by descendants field by field; a deeper node only
/// replaces the fields it declares.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeMetadata {
    pub recipe_matches: Option<Vec<String>>,
    pub substitutions: Option<Vec<String>>,
    pub portion: Option<PortionInfo>,
    pub leftovers: Option<LeftoverInfo>,
}

impl NodeMetadata {
    fn inherit(self, parent: &NodeMetadata) -> NodeMetadata {
        NodeMetadata {
            recipe_matches: self.recipe_matches.or_else(|| parent.recipe_matches.clone()),
            substitutions: self.substitutions.or_else(|| parent.substitutions.clone()),
            portion: self.portion.or_else(|| parent.portion.clone()),
            leftovers: self.leftovers.or_else(|| parent.leftovers.clone()),
        }
    }

    pub fn recipe_matches(&self) -> &[String] {
        self.recipe_matches.as_deref().unwrap_or_default()
    }

    pub fn substitutions(&self) -> &[String] {
        self.substitutions.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Leaf { items: Vec<String>, cuts: Vec<String> },
    Branch { children: Vec<TaxonomyNode> },
}

/// A validated taxonomy node. Terms are stored normalized and metadata is
/// already merged with everything inherited from ancestors.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonomyNode {
    pub name: String,
    pub keywords: Vec<String>,
    pub metadata: NodeMetadata,
    pub kind: NodeKind,
}

/// Parsed food taxonomy; top-level nodes are categories in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    pub categories: Vec<TaxonomyNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawNode {
    #[serde(default)]
    keywords: Vec<String>,
    items: Option<Vec<String>>,
    cuts: Option<Vec<String>>,
    subcategories: Option<Map<String, Value>>,
    recipe_matches: Option<Vec<String>>,
    substitutions: Option<Vec<String>>,
    portion_management: Option<PortionInfo>,
    leftover_uses: Option<LeftoverInfo>,
}

#[derive(Deserialize)]
struct RawTaxonomy {
    categories: Map<String, Value>,
}

fn invalid(path: &str, reason: impl Into<String>) -> MatchingError {
    MatchingError::InvalidTaxonomy {
        path: path.to_owned(),
        reason: reason.into(),
    }
}

fn normalized_terms(terms: Vec<String>) -> Vec<String> {
    terms
        .iter()
        .map(|t| normalize(t))
        .filter(|t| !t.is_empty())
        .collect()
}

impl Taxonomy {
    pub fn from_json(bytes: &[u8]) -> MatchingResult<Self> {
        let raw: RawTaxonomy = serde_json::from_slice(bytes)?;
        let root = NodeMetadata::default();

        let categories = raw
            .categories
            .into_iter()
            .map(|(name, value)| parse_node(&name, name.clone(), value, &root))
            .collect::<MatchingResult<Vec<_>>>()?;

        if categories.is_empty() {
            return Err(invalid("categories", "taxonomy has no categories"));
        }

        Ok(Self { categories })
    }

    /// The taxonomy bundled with the crate
    pub fn embedded() -> MatchingResult<Self> {
        Self::from_json(&crate::data::load(crate::data::TAXONOMY_FILE)?)
    }

    pub fn category(&self, name: &str) -> Option<&TaxonomyNode> {
        self.categories.iter().find(|c| c.name == name)
    }
}

fn parse_node(
    path: &str,
    name: String,
    value: Value,
    inherited: &NodeMetadata,
) -> MatchingResult<TaxonomyNode> {
    let raw: RawNode =
        serde_json::from_value(value).map_err(|e| invalid(path, e.to_string()))?;

    let metadata = NodeMetadata {
        recipe_matches: raw.recipe_matches,
        substitutions: raw.substitutions.map(normalized_terms),
        portion: raw.portion_management,
        leftovers: raw.leftover_uses,
    }
    .inherit(inherited);

    let keywords = normalized_terms(raw.keywords);
    let has_terms = raw.items.is_some() || raw.cuts.is_some();

    let kind = match (has_terms, raw.subcategories) {
        (true, Some(_)) => {
            return Err(invalid(path, "node has both items/cuts and subcategories"));
        }
        (false, Some(subcategories)) => {
            if subcategories.is_empty() {
                return Err(invalid(path, "subcategories is empty"));
            }

            let children = subcategories
                .into_iter()
                .map(|(child, value)| {
                    let child_path = format!("{path}.{child}");
                    parse_node(&child_path, child, value, &metadata)
                })
                .collect::<MatchingResult<Vec<_>>>()?;

            NodeKind::Branch { children }
        }
        (true, None) => NodeKind::Leaf {
            items: normalized_terms(raw.items.unwrap_or_default()),
            cuts: normalized_terms(raw.cuts.unwrap_or_default()),
        },
        (false, None) => {
            if keywords.is_empty() {
                return Err(invalid(path, "node has no items, cuts, subcategories or keywords"));
            }
            NodeKind::Leaf {
                items: Vec::new(),
                cuts: Vec::new(),
            }
        }
    };

    Ok(TaxonomyNode {
        name,
        keywords,
        metadata,
        kind,
    })
}
