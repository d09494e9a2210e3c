use rust_embed::RustEmbed;

use crate::error::{MatchingError, MatchingResult};

#[derive(RustEmbed)]
#[folder = "data/"]
struct Assets;

pub(crate) const TAXONOMY_FILE: &str = "food_taxonomy.json";
pub(crate) const SHELF_LIFE_FILE: &str = "shelf_life.json";

pub(crate) fn load(file: &str) -> MatchingResult<Vec<u8>> {
    Assets::get(file)
        .map(|asset| asset.data.into_owned())
        .ok_or_else(|| MatchingError::MissingData(file.to_owned()))
}
