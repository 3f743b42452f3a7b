use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ShoppingItem;

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub amount: Option<String>,
    /// Inferred from the name when omitted.
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FromRecipeRequest {
    pub recipe_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ShoppingListResponse {
    pub items: Vec<ShoppingItem>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item: ShoppingItem,
}

/// What a from-recipe bulk add did: `skipped` counts ingredients already on
/// the list unchecked.
#[derive(Debug, Serialize)]
pub struct AddedResponse {
    pub added: Vec<ShoppingItem>,
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub removed: u64,
}
