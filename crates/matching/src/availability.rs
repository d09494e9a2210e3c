use serde::{Deserialize, Serialize};

use crate::model::IngredientMatch;

/// One line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl RecipeIngredient {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            quantity: None,
            unit: None,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::required(name)
        }
    }
}

/// The best inventory match found for one recipe line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientAvailability {
    pub ingredient: String,
    pub optional: bool,
    pub best_match: IngredientMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeAvailability {
    pub can_make: bool,
    /// Percentage of required ingredients available, rounded
    pub availability: u8,
    pub missing_required: Vec<String>,
    pub missing_optional: Vec<String>,
    pub matches: Vec<IngredientAvailability>,
}

impl RecipeAvailability {
    /// Aggregate ranked matches per recipe line. Only the first (best) match
    /// of each line is kept.
    pub fn from_results<'a>(
        results: impl IntoIterator<Item = (&'a RecipeIngredient, Vec<IngredientMatch>)>,
    ) -> Self {
        let mut required = 0usize;
        let mut matched_required = 0usize;
        let mut missing_required = Vec::new();
        let mut missing_optional = Vec::new();
        let mut matches = Vec::new();

        for (ingredient, found) in results {
            if !ingredient.optional {
                required += 1;
            }

            match found.into_iter().next() {
                Some(best_match) => {
                    if !ingredient.optional {
                        matched_required += 1;
                    }
                    matches.push(IngredientAvailability {
                        ingredient: ingredient.name.clone(),
                        optional: ingredient.optional,
                        best_match,
                    });
                }
                None if ingredient.optional => missing_optional.push(ingredient.name.clone()),
                None => missing_required.push(ingredient.name.clone()),
            }
        }

        let availability = if required == 0 {
            100
        } else {
            ((matched_required as f64 / required as f64) * 100.0).round() as u8
        };

        Self {
            can_make: missing_required.is_empty(),
            availability,
            missing_required,
            missing_optional,
            matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InventoryItemView, MatchType};

    fn found(name: &str) -> Vec<IngredientMatch> {
        vec![IngredientMatch {
            item: InventoryItemView::new("1", name, 1.0),
            match_type: MatchType::Exact,
            confidence: 1.0,
            notes: None,
        }]
    }

    #[test]
    fn test_all_required_present() {
        let flour = RecipeIngredient::required("flour");
        let sugar = RecipeIngredient::required("sugar");
        let nuts = RecipeIngredient::optional("walnuts");

        let result = RecipeAvailability::from_results([
            (&flour, found("flour")),
            (&sugar, found("sugar")),
            (&nuts, Vec::new()),
        ]);

        assert!(result.can_make);
        assert_eq!(result.availability, 100);
        assert!(result.missing_required.is_empty());
        assert_eq!(result.missing_optional, ["walnuts"]);
        assert_eq!(result.matches.len(), 2);
    }

    #[test]
    fn test_partial_availability_is_rounded() {
        let a = RecipeIngredient::required("a");
        let b = RecipeIngredient::required("b");
        let c = RecipeIngredient::required("c");

        let result =
            RecipeAvailability::from_results([(&a, found("a")), (&b, Vec::new()), (&c, Vec::new())]);

        assert!(!result.can_make);
        assert_eq!(result.availability, 33);
        assert_eq!(result.missing_required, ["b", "c"]);
    }

    #[test]
    fn test_no_required_ingredients() {
        let garnish = RecipeIngredient::optional("parsley");
        let result = RecipeAvailability::from_results([(&garnish, Vec::new())]);
        assert!(result.can_make);
        assert_eq!(result.availability, 100);

        let empty = RecipeAvailability::from_results(std::iter::empty());
        assert!(empty.can_make);
        assert_eq!(empty.availability, 100);
    }

    #[test]
    fn test_recipe_json_defaults() {
        let ingredient: RecipeIngredient =
            serde_json::from_str(r#"{"name": "eggs"}"#).expect("valid ingredient");
        assert!(!ingredient.optional);
        assert_eq!(ingredient.quantity, None);
    }
}
