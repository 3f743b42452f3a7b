use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Recipe;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub context: Option<String>,
    pub limit: Option<i64>,
    /// Ids already shown; a refresh sends these to avoid repeats.
    pub exclude_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub context: String,
    pub recipes: Vec<Recipe>,
    pub disclaimer: &'static str,
}
