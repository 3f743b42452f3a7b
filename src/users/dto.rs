use serde::Serialize;
use time::OffsetDateTime;

use crate::auth::PublicUser;
use crate::models::{InventoryItem, Meal, RecommendationLog, ShoppingItem, Workout};

/// Everything the service knows about one account, bundled for download.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    #[serde(with = "time::serde::rfc3339")]
    pub exported_at: OffsetDateTime,
    pub user: PublicUser,
    pub workouts: Vec<Workout>,
    pub meals: Vec<Meal>,
    pub inventory: Vec<InventoryItem>,
    pub shopping_items: Vec<ShoppingItem>,
    pub recommendations: Vec<RecommendationLog>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub message: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub deleted_at: OffsetDateTime,
}
