pub mod availability;
pub mod cache;
pub mod config;
mod data;
pub mod engine;
pub mod equivalency;
pub mod error;
pub mod exclusions;
pub mod feedback;
pub mod model;
pub mod normalize;
pub mod overlap;
pub mod shelf_life;
pub mod store;
pub mod taxonomy;

pub use availability::{IngredientAvailability, RecipeAvailability, RecipeIngredient};
pub use cache::{Clock, ManualClock, SystemClock, TtlCache};
pub use config::MatchingConfig;
pub use engine::IngredientMatcher;
pub use equivalency::{EquivalencyRow, HouseholdEquivalencies, are_equivalent};
pub use error::{MatchingError, StoreError};
pub use feedback::{FeedbackCache, FeedbackRecord};
pub use model::{IngredientMatch, InventoryItemView, MatchType, ProductInfo};
pub use normalize::normalize;
pub use shelf_life::{
    ResolvedShelfLife, ShelfLifeCalculator, ShelfLifeEntry, ShelfLifeSource, StorageLocation,
    StorageOption,
};
pub use store::{EquivalencyStore, FeedbackStore};
pub use taxonomy::{FoodMatch, FoodTaxonomyMatcher, NodeMetadata, PortionInfo, Taxonomy};
