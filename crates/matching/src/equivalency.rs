use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::exclusions::is_excluded_pair;
use crate::normalize::{contains_phrase, normalize};

/// Built-in equivalency group: a canonical name and alternate names that
/// denote the same ingredient. All terms are stored normalized.
#[derive(Debug, Clone, Copy)]
pub struct EquivalencyGroup {
    pub canonical: &'static str,
    pub alternates: &'static [&'static str],
}

impl EquivalencyGroup {
    /// Canonical name followed by every alternate
    pub fn terms(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.canonical).chain(self.alternates.iter().copied())
    }

    fn represents(&self, normalized: &str) -> bool {
        self.terms().any(|term| contains_phrase(normalized, term))
    }
}

macro_rules! group {
    ($canonical:literal => [$($alt:literal),* $(,)?]) => {
        EquivalencyGroup { canonical: $canonical, alternates: &[$($alt),*] }
    };
}

/// Process-wide, read-only equivalency table
pub static STATIC_EQUIVALENCIES: &[EquivalencyGroup] = &[
    // Produce
    group!("scallion" => ["green onion", "spring onion"]),
    group!("cilantro" => ["coriander leaves", "fresh coriander", "chinese parsley"]),
    group!("zucchini" => ["courgette"]),
    group!("eggplant" => ["aubergine"]),
    group!("arugula" => ["rocket", "roquette"]),
    group!("bell pepper" => ["sweet pepper", "capsicum"]),
    group!("chili pepper" => ["chile pepper", "hot pepper", "chilli"]),
    group!("garlic cloves" => ["fresh garlic", "minced garlic", "garlic bulb"]),
    group!("fresh ginger" => ["ginger root", "gingerroot"]),
    group!("green beans" => ["string beans", "snap beans", "french beans"]),
    group!("snow peas" => ["mangetout", "sugar snap peas"]),
    group!("romaine lettuce" => ["romaine", "cos lettuce"]),
    group!("sweet corn" => ["corn kernels", "maize"]),
    group!("russet potatoes" => ["baking potatoes", "idaho potatoes"]),
    group!("sweet potato" => ["yam", "kumara"]),
    group!("lemon juice" => ["fresh lemon juice", "juice of lemon"]),
    group!("lime juice" => ["fresh lime juice", "juice of lime"]),
    // Legumes and grains
    group!("garbanzo beans" => ["chickpeas", "chick peas", "ceci beans"]),
    group!("white rice" => ["long grain rice", "jasmine rice", "basmati rice"]),
    group!("rolled oats" => ["old fashioned oats", "porridge oats", "oatmeal"]),
    group!("spaghetti" => ["spaghetti noodles", "spaghettini"]),
    group!("breadcrumbs" => ["bread crumbs", "panko"]),
    // Baking
    group!("all purpose flour" => ["plain flour", "ap flour", "all purpose white flour"]),
    group!("powdered sugar" => ["confectioners sugar", "icing sugar"]),
    group!("granulated sugar" => ["white sugar", "cane sugar", "caster sugar"]),
    group!("brown sugar" => ["light brown sugar", "dark brown sugar"]),
    group!("cornstarch" => ["corn starch", "cornflour"]),
    group!("baking soda" => ["bicarbonate of soda", "sodium bicarbonate", "bicarb"]),
    group!("baking powder" => ["double acting baking powder"]),
    group!("vanilla extract" => ["vanilla essence", "pure vanilla extract"]),
    group!("cocoa powder" => ["unsweetened cocoa", "cacao powder"]),
    group!("maple syrup" => ["pure maple syrup"]),
    group!("honey" => ["raw honey", "clover honey"]),
    // Dairy and eggs
    group!("whole milk" => ["2 milk", "skim milk", "reduced fat milk", "low fat milk"]),
    group!("heavy cream" => ["heavy whipping cream", "double cream", "whipping cream"]),
    group!("half and half" => ["half n half"]),
    group!("unsalted butter" => ["salted butter", "sweet cream butter"]),
    group!("yogurt" => ["yoghurt", "yogourt"]),
    group!("greek yogurt" => ["strained yogurt", "greek yoghurt"]),
    group!("sour cream" => ["soured cream", "crema"]),
    group!("cream cheese" => ["neufchatel"]),
    group!("parmesan" => ["parmigiano reggiano", "parmigiano"]),
    group!("mozzarella" => ["fresh mozzarella", "mozz"]),
    group!("cheddar" => ["sharp cheddar", "mild cheddar"]),
    group!("egg" => ["large eggs", "whole eggs"]),
    // Meat and seafood
    group!("shrimp" => ["prawn", "prawns"]),
    group!("ground beef" => ["minced beef", "beef mince", "hamburger meat"]),
    group!("ground turkey" => ["minced turkey", "turkey mince"]),
    group!("ground pork" => ["minced pork", "pork mince"]),
    group!("bacon" => ["streaky bacon", "bacon rashers"]),
    group!("chicken breast" => ["boneless chicken breast", "skinless chicken breast", "chicken breast fillets"]),
    group!("chicken thighs" => ["boneless chicken thighs", "chicken thigh fillets"]),
    // Stocks, sauces and condiments
    group!("chicken broth" => ["chicken stock", "chicken bouillon"]),
    group!("beef broth" => ["beef stock", "beef bouillon"]),
    group!("vegetable broth" => ["vegetable stock", "veggie broth"]),
    group!("soy sauce" => ["shoyu", "tamari"]),
    group!("tomato paste" => ["tomato puree", "tomato concentrate"]),
    group!("crushed tomatoes" => ["tomato passata", "passata"]),
    group!("canned tomatoes" => ["diced tomatoes", "tinned tomatoes", "whole peeled tomatoes"]),
    group!("ketchup" => ["catsup", "tomato ketchup"]),
    group!("olive oil" => ["extra virgin olive oil", "evoo"]),
    group!("vegetable oil" => ["canola oil", "rapeseed oil", "sunflower oil", "corn oil"]),
    group!("apple cider vinegar" => ["cider vinegar", "acv"]),
    group!("white vinegar" => ["distilled vinegar", "distilled white vinegar"]),
    group!("balsamic vinegar" => ["balsamic", "aceto balsamico"]),
    // Seasonings
    group!("salt" => ["sea salt", "kosher salt", "table salt", "iodized salt"]),
    group!("black pepper" => ["ground pepper", "cracked pepper", "peppercorns", "ground black pepper"]),
];

/// A household equivalency row as persisted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalencyRow {
    pub ingredient_name: String,
    pub equivalent_name: String,
    pub confidence_score: f64,
    pub substitution_ratio: f64,
    pub notes: Option<String>,
    pub is_bidirectional: bool,
}

/// One equivalent of a household key, normalized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseholdEquivalent {
    pub name: String,
    pub confidence: f64,
    pub substitution_ratio: f64,
    pub notes: Option<String>,
}

/// Per-household equivalency table
///
/// Keys and equivalents are normalized on construction. Bidirectional rows
/// are expanded here, so lookups never have to consider reverse mappings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HouseholdEquivalencies {
    entries: HashMap<String, Vec<HouseholdEquivalent>>,
}

impl HouseholdEquivalencies {
    pub fn from_rows(rows: impl IntoIterator<Item = EquivalencyRow>) -> Self {
        let mut table = Self::default();

        for row in rows {
            let ingredient = normalize(&row.ingredient_name);
            let equivalent = normalize(&row.equivalent_name);
            if ingredient.is_empty() || equivalent.is_empty() || ingredient == equivalent {
                continue;
            }

            if row.is_bidirectional {
                let ratio = if row.substitution_ratio > 0.0 {
                    1.0 / row.substitution_ratio
                } else {
                    row.substitution_ratio
                };
                table.push(
                    equivalent.clone(),
                    HouseholdEquivalent {
                        name: ingredient.clone(),
                        confidence: row.confidence_score,
                        substitution_ratio: ratio,
                        notes: row.notes.clone(),
                    },
                );
            }

            table.push(
                ingredient,
                HouseholdEquivalent {
                    name: equivalent,
                    confidence: row.confidence_score,
                    substitution_ratio: row.substitution_ratio,
                    notes: row.notes,
                },
            );
        }

        table
    }

    fn push(&mut self, key: String, equivalent: HouseholdEquivalent) {
        let list = self.entries.entry(key).or_default();
        if !list.iter().any(|e| e.name == equivalent.name) {
            list.push(equivalent);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys, reverse mappings included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn equivalents_of(&self, name: &str) -> &[HouseholdEquivalent] {
        self.entries
            .get(&normalize(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn links(&self, a: &str, b: &str) -> bool {
        let check = |key: &str, other: &str| {
            self.entries.get(key).is_some_and(|equivalents| {
                equivalents
                    .iter()
                    .any(|e| contains_phrase(other, &e.name) || contains_phrase(&e.name, other))
            })
        };

        check(a, b) || check(b, a)
    }
}

/// Decide whether two ingredient names denote the same thing
///
/// Rules, in order, first decisive one wins:
/// 1. equal after normalization
/// 2. known false-positive pair (never equivalent)
/// 3. one name contained in the other, on word boundaries
/// 4. household table links them
/// 5. both names belong to the same static group
///
/// Containment and group membership compare whole words, not raw substrings.
pub fn are_equivalent(a: &str, b: &str, household: Option<&HouseholdEquivalencies>) -> bool {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return false;
    }

    if a == b {
        return true;
    }

    if is_excluded_pair(&a, &b) {
        return false;
    }

    if contains_phrase(&a, &b) || contains_phrase(&b, &a) {
        return true;
    }

    if household.is_some_and(|table| table.links(&a, &b)) {
        return true;
    }

    STATIC_EQUIVALENCIES
        .iter()
        .any(|group| group.represents(&a) && group.represents(&b))
}
