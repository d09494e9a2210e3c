use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{MatchingError, MatchingResult};
use crate::normalize::{contains_phrase, normalize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageLocation {
    Pantry,
    Refrigerator,
    Freezer,
}

/// Day counts per storage location; `None` means the location is not suitable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShelfLifeEntry {
    pub pantry: Option<u32>,
    pub refrigerator: Option<u32>,
    pub freezer: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ShelfLifeEntry {
    pub fn days(&self, location: StorageLocation) -> Option<u32> {
        match location {
            StorageLocation::Pantry => self.pantry,
            StorageLocation::Refrigerator => self.refrigerator,
            StorageLocation::Freezer => self.freezer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShelfLifeSource {
    Specific,
    Category,
    Default,
}

/// An entry together with where it was found
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedShelfLife {
    pub source: ShelfLifeSource,
    /// Table key that matched; `None` for the unknown-product default
    pub key: Option<String>,
    pub entry: ShelfLifeEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageOption {
    pub location: StorageLocation,
    pub days: Option<u32>,
    pub recommended: bool,
}

const DAY_FIELDS: [&str; 3] = ["pantry", "refrigerator", "freezer"];

const FREEZER_WORDS: &[&str] = &["frozen", "ice cream", "popsicle", "popsicles"];

const SHELF_STABLE_WORDS: &[&str] = &[
    "canned", "jarred", "dried", "dry", "shelf stable", "powder", "uht", "peanut butter",
    "nut butter",
];

const REFRIGERATOR_WORDS: &[&str] = &[
    "meat", "poultry", "chicken", "beef", "pork", "turkey", "lamb", "steak", "bacon", "sausage",
    "ham", "deli", "fish", "seafood", "salmon", "shrimp", "dairy", "milk", "cheese", "yogurt",
    "butter", "cream", "egg", "produce", "fresh", "lettuce", "spinach", "berry", "berries", "herbs",
];

const PANTRY_WORDS: &[&str] = &[
    "grain", "grains", "rice", "pasta", "flour", "sugar", "cereal", "oats", "snack", "snacks",
    "chips", "crackers", "cookies", "spice", "spices", "seasoning", "salt", "pepper", "oil",
    "vinegar", "beans", "lentils", "baking", "bread", "honey", "syrup", "nuts", "coffee", "tea",
    "potato", "potatoes", "onion", "onions", "garlic", "banana", "bananas",
];

fn mentions(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| contains_phrase(text, w))
}

/// Shelf-life lookups over the specific-item, category and default tables
#[derive(Debug, Clone)]
pub struct ShelfLifeCalculator {
    /// Specific entries flattened in declared order, keys normalized
    specific: Vec<(String, ShelfLifeEntry)>,
    categories: Vec<(String, ShelfLifeEntry)>,
    unknown: ShelfLifeEntry,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTable {
    specific_items: Map<String, Value>,
    categories: Map<String, Value>,
    default_rules: RawDefaultRules,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDefaultRules {
    unknown_product: ShelfLifeEntry,
}

fn invalid(path: &str, reason: impl Into<String>) -> MatchingError {
    MatchingError::InvalidShelfLife {
        path: path.to_owned(),
        reason: reason.into(),
    }
}

fn parse_entry(path: &str, value: Value) -> MatchingResult<ShelfLifeEntry> {
    serde_json::from_value(value).map_err(|e| invalid(path, e.to_string()))
}

fn is_entry(object: &Map<String, Value>) -> bool {
    DAY_FIELDS.iter().any(|field| object.contains_key(*field))
}

fn flatten(
    path: &str,
    node: Map<String, Value>,
    out: &mut Vec<(String, ShelfLifeEntry)>,
) -> MatchingResult<()> {
    for (key, value) in node {
        let child_path = format!("{path}.{key}");
        let Value::Object(object) = value else {
            return Err(invalid(&child_path, "expected an object"));
        };

        if is_entry(&object) {
            let entry = parse_entry(&child_path, Value::Object(object))?;
            out.push((normalize(&key), entry));
        } else {
            flatten(&child_path, object, out)?;
        }
    }

    Ok(())
}

impl ShelfLifeCalculator {
    pub fn from_json(bytes: &[u8]) -> MatchingResult<Self> {
        let raw: RawTable = serde_json::from_slice(bytes)?;

        let mut specific = Vec::new();
        flatten("specificItems", raw.specific_items, &mut specific)?;

        let categories = raw
            .categories
            .into_iter()
            .map(|(key, value)| {
                let entry = parse_entry(&format!("categories.{key}"), value)?;
                Ok((normalize(&key), entry))
            })
            .collect::<MatchingResult<Vec<_>>>()?;

        Ok(Self {
            specific,
            categories,
            unknown: raw.default_rules.unknown_product,
        })
    }

    /// Calculator over the table bundled with the crate
    pub fn embedded() -> MatchingResult<Self> {
        Self::from_json(&crate::data::load(crate::data::SHELF_LIFE_FILE)?)
    }

    /// Specific entry for a normalized name.
    ///
    /// An exact key wins. Otherwise the longest key found inside the name,
    /// then the shortest key that contains the name.
    fn specific_entry(&self, name: &str) -> Option<&(String, ShelfLifeEntry)> {
        if name.is_empty() {
            return None;
        }

        if let Some(exact) = self.specific.iter().find(|(key, _)| key == name) {
            return Some(exact);
        }

        let mut inside: Option<&(String, ShelfLifeEntry)> = None;
        let mut around: Option<&(String, ShelfLifeEntry)> = None;

        for candidate in &self.specific {
            let key = candidate.0.as_str();
            if contains_phrase(name, key) {
                if inside.is_none_or(|(best, _)| key.len() > best.len()) {
                    inside = Some(candidate);
                }
            } else if contains_phrase(key, name)
                && around.is_none_or(|(best, _)| key.len() < best.len())
            {
                around = Some(candidate);
            }
        }

        inside.or(around)
    }

    fn category_entry(&self, text: &str) -> Option<&(String, ShelfLifeEntry)> {
        if text.is_empty() {
            return None;
        }

        self.categories.iter().find(|(term, _)| text.contains(term.as_str()))
    }

    /// Resolve the table entry for a product, falling back to the unknown
    /// product default.
    pub fn shelf_life_entry(&self, name: &str, category: Option<&str>) -> ResolvedShelfLife {
        let name = normalize(name);

        if let Some((key, entry)) = self.specific_entry(&name) {
            return ResolvedShelfLife {
                source: ShelfLifeSource::Specific,
                key: Some(key.clone()),
                entry: entry.clone(),
            };
        }

        let category = category.map(normalize).unwrap_or_default();
        let by_category = self
            .category_entry(&category)
            .or_else(|| self.category_entry(&name));

        if let Some((key, entry)) = by_category {
            return ResolvedShelfLife {
                source: ShelfLifeSource::Category,
                key: Some(key.clone()),
                entry: entry.clone(),
            };
        }

        ResolvedShelfLife {
            source: ShelfLifeSource::Default,
            key: None,
            entry: self.unknown.clone(),
        }
    }

    /// Expected days in `location`, or `None` when the location is unsuitable
    pub fn default_shelf_life(
        &self,
        name: &str,
        category: Option<&str>,
        location: StorageLocation,
    ) -> Option<u32> {
        self.shelf_life_entry(name, category).entry.days(location)
    }

    /// Purchase date plus the explicit day count when positive, otherwise the
    /// table value for `location` (or the recommended location).
    pub fn suggest_expiration_date(
        &self,
        name: &str,
        category: Option<&str>,
        purchase_date: NaiveDate,
        location: Option<StorageLocation>,
        explicit_days: Option<i64>,
    ) -> Option<NaiveDate> {
        let days = match explicit_days.and_then(|d| u64::try_from(d).ok()).filter(|d| *d > 0) {
            Some(days) => days,
            None => {
                let location =
                    location.unwrap_or_else(|| self.storage_recommendation(name, category));
                u64::from(self.default_shelf_life(name, category, location)?)
            }
        };

        purchase_date.checked_add_days(Days::new(days))
    }

    pub fn storage_recommendation(&self, name: &str, category: Option<&str>) -> StorageLocation {
        let text = normalize(&format!("{name} {}", category.unwrap_or_default()));

        if mentions(&text, FREEZER_WORDS) {
            StorageLocation::Freezer
        } else if mentions(&text, SHELF_STABLE_WORDS) {
            StorageLocation::Pantry
        } else if mentions(&text, REFRIGERATOR_WORDS) {
            StorageLocation::Refrigerator
        } else if mentions(&text, PANTRY_WORDS) {
            StorageLocation::Pantry
        } else {
            StorageLocation::Refrigerator
        }
    }

    /// Every location with its day count: recommended first, then longest
    /// shelf life, unsuitable locations last.
    pub fn storage_options(&self, name: &str, category: Option<&str>) -> Vec<StorageOption> {
        let recommended = self.storage_recommendation(name, category);
        let entry = self.shelf_life_entry(name, category).entry;

        let mut options: Vec<StorageOption> = StorageLocation::iter()
            .map(|location| StorageOption {
                location,
                days: entry.days(location),
                recommended: location == recommended,
            })
            .collect();

        options.sort_by(|a, b| {
            b.recommended
                .cmp(&a.recommended)
                .then_with(|| b.days.cmp(&a.days))
        });

        options
    }
}
