use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::Difficulty,
    recipes::dto::{ListQuery, RecipeResponse, RecipesResponse},
    state::AppState,
    store::{RecipeQuery, StoreError},
};

/// The catalog is readable without a session.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/:id", get(get_recipe))
}

#[instrument(skip(state))]
async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<RecipesResponse>, ApiError> {
    let difficulty: Option<Difficulty> = query
        .difficulty
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let search = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let limit = query.limit.unwrap_or(20).clamp(1, 50);
    let offset = query.offset.unwrap_or(0).max(0);

    let (recipes, total) = state
        .store
        .list_recipes(RecipeQuery {
            search,
            difficulty,
            prep_friendly: query.prep_friendly,
            limit,
            offset,
        })
        .await?;

    Ok(Json(RecipesResponse {
        recipes,
        total,
        limit,
        offset,
    }))
}

#[instrument(skip(state))]
async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeResponse>, ApiError> {
    match state.store.get_recipe(id).await {
        Ok(recipe) => Ok(Json(RecipeResponse { recipe })),
        Err(StoreError::NotFound) => Err(ApiError::not_found("Recipe not found")),
        Err(e) => Err(e.into()),
    }
}
