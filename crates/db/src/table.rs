use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Product {
    Table,
    Id,
    Name,
    Category,
    Brand,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum InventoryItem {
    Table,
    Id,
    HouseholdId,
    ProductId,
    Name,
    Quantity,
    Unit,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum IngredientEquivalency {
    Table,
    Id,
    HouseholdId,
    IngredientName,
    EquivalentName,
    ConfidenceScore,
    SubstitutionRatio,
    Notes,
    IsBidirectional,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum MlFeedback {
    Table,
    Id,
    HouseholdId,
    RecipeId,
    RecipeIngredient,
    MatchedProduct,
    IsCorrect,
    CorrectProductName,
    MatchType,
    Confidence,
    CreatedAt,
}
