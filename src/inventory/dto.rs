use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{InventoryItem, Nutrition};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryRequest {
    pub name: String,
    pub quantity: i32,
    pub unit: String,
    pub category: String,
    /// RFC 3339; defaults to now.
    pub prepared_at: Option<String>,
    pub expires_at: String,
    pub nutrition: Option<Nutrition>,
    pub recipe_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryRequest {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub expires_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub include_expired: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ExpiringQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ConsumeRequest {
    pub portions: Option<i32>,
}

/// Inventory item plus the freshness fields the list and detail views add.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub days_left: i64,
    pub is_expired: bool,
    pub is_expiring_soon: bool,
}

#[derive(Debug, Serialize)]
pub struct InventoryListResponse {
    pub inventory: Vec<InventoryItemView>,
}

#[derive(Debug, Serialize)]
pub struct ItemViewResponse {
    pub item: InventoryItemView,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item: InventoryItem,
}

#[derive(Debug, Serialize)]
pub struct ConsumeResponse {
    pub message: String,
    pub consumed: i32,
    pub remaining: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<InventoryItem>,
}
