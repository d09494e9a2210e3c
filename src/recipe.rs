use std::path::Path;

use pantry_matching::RecipeIngredient;
use serde::Deserialize;

/// Recipe file accepted by the `availability` command
///
/// ```json
/// {"ingredients": [{"name": "flour"}, {"name": "chocolate chips", "optional": true}]}
/// ```
#[derive(Debug, Deserialize)]
pub struct RecipeFile {
    #[serde(default)]
    pub name: Option<String>,
    pub ingredients: Vec<RecipeIngredient>,
}

impl RecipeFile {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let recipe: Self = serde_json::from_str(json)?;
        if recipe.ingredients.is_empty() {
            anyhow::bail!("recipe has no ingredients");
        }

        Ok(recipe)
    }

    pub fn read(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;

        Self::from_json(&json)
    }
}
