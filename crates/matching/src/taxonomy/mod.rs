//! Hierarchical food taxonomy: category, subcategory, then items or cuts.

mod matcher;
pub mod score;
mod tree;

pub use matcher::{FoodMatch, FoodTaxonomyMatcher, TermKind, best_match};
pub use tree::{LeftoverInfo, NodeKind, NodeMetadata, PortionInfo, Taxonomy, TaxonomyNode};
