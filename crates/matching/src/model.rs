use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Product attributes joined onto an inventory row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    pub category: Option<String>,
    pub brand: Option<String>,
}

/// Canonical, read-only view of an inventory row as seen by the matcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItemView {
    pub id: String,
    /// Product name when a product is linked, otherwise the raw item name
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
}

impl InventoryItemView {
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            unit: None,
            category: None,
            brand: None,
        }
    }

    /// Build the view from a raw inventory row, preferring the linked product's name
    pub fn from_row(
        id: impl Into<String>,
        raw_name: Option<String>,
        quantity: f64,
        unit: Option<String>,
        product: Option<ProductInfo>,
    ) -> Self {
        let (name, category, brand) = match product {
            Some(product) => (product.name, product.category, product.brand),
            None => (raw_name.unwrap_or_default(), None, None),
        };

        Self {
            id: id.into(),
            name,
            quantity,
            unit,
            category,
            brand,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn is_available(&self) -> bool {
        self.quantity > 0.0
    }
}

/// Match tiers, declared strongest first
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchType {
    Exact,
    Partial,
    Category,
    Substitute,
}

impl MatchType {
    pub fn base_confidence(self) -> f64 {
        match self {
            MatchType::Exact => 1.0,
            MatchType::Partial => 0.5,
            MatchType::Category => 0.5,
            MatchType::Substitute => 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientMatch {
    pub item: InventoryItemView,
    pub match_type: MatchType,
    pub confidence: f64,
    pub notes: Option<String>,
}
