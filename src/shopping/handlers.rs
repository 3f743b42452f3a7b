use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::NewShoppingItem,
    shopping::{
        dto::{
            AddedResponse, ClearedResponse, CreateItemRequest, FromRecipeRequest, ItemResponse,
            ShoppingListResponse,
        },
        services,
    },
    state::AppState,
    store::StoreError,
};

pub fn list_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shopping",
            get(list_items).post(create_item).delete(clear_all),
        )
        .route("/shopping/from-recipe", post(add_from_recipe))
        .route("/shopping/checked", delete(clear_checked))
}

pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/shopping/:id", delete(delete_item))
        .route("/shopping/:id/toggle", post(toggle_item))
}

#[instrument(skip(state))]
async fn list_items(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ShoppingListResponse>, ApiError> {
    let items = state.store.list_shopping_items(user.id).await?;
    Ok(Json(ShoppingListResponse { items }))
}

#[instrument(skip(state, payload))]
async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateItemRequest>,
) -> Result<Json<ItemResponse>, ApiError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }
    let category = match payload.category.as_deref() {
        Some(raw) => raw.parse().map_err(ApiError::BadRequest)?,
        None => services::infer_category(&name),
    };

    let mut items = state
        .store
        .create_shopping_items(vec![NewShoppingItem {
            user_id: user.id,
            name,
            amount: payload.amount.unwrap_or_default(),
            category,
            recipe_id: None,
            recipe_name: None,
        }])
        .await?;
    let item = items.remove(0);

    info!(user_id = %user.id, item_id = %item.id, "shopping item added");
    Ok(Json(ItemResponse { item }))
}

#[instrument(skip(state, payload))]
async fn add_from_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<FromRecipeRequest>,
) -> Result<Json<AddedResponse>, ApiError> {
    let Some(recipe_id) = payload.recipe_id else {
        return Err(ApiError::bad_request("RecipeId is required"));
    };
    let details = match state.store.get_recipe(recipe_id).await {
        Ok(details) => details,
        Err(StoreError::NotFound) => return Err(ApiError::not_found("Recipe not found")),
        Err(e) => return Err(e.into()),
    };

    let existing = state.store.list_shopping_items(user.id).await?;
    let planned = services::plan_additions(
        user.id,
        details.recipe.id,
        &details.recipe.title,
        &details.ingredients,
        &existing,
    );
    let skipped = details.ingredients.len() - planned.len();
    let added = if planned.is_empty() {
        Vec::new()
    } else {
        state.store.create_shopping_items(planned).await?
    };

    info!(
        user_id = %user.id,
        recipe_id = %recipe_id,
        added = added.len(),
        skipped,
        "recipe ingredients added to shopping list"
    );
    Ok(Json(AddedResponse { added, skipped }))
}

#[instrument(skip(state))]
async fn toggle_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemResponse>, ApiError> {
    match state.store.toggle_shopping_item(user.id, id).await {
        Ok(item) => Ok(Json(ItemResponse { item })),
        Err(StoreError::NotFound) => Err(ApiError::not_found("Item not found")),
        Err(e) => Err(e.into()),
    }
}

#[instrument(skip(state))]
async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.store.delete_shopping_item(user.id, id).await? {
        return Err(ApiError::not_found("Item not found"));
    }
    Ok(Json(json!({ "message": "Item deleted" })))
}

#[instrument(skip(state))]
async fn clear_checked(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ClearedResponse>, ApiError> {
    let removed = state.store.clear_checked_shopping_items(user.id).await?;
    info!(user_id = %user.id, removed, "checked shopping items cleared");
    Ok(Json(ClearedResponse { removed }))
}

#[instrument(skip(state))]
async fn clear_all(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ClearedResponse>, ApiError> {
    let removed = state.store.clear_shopping_items(user.id).await?;
    info!(user_id = %user.id, removed, "shopping list cleared");
    Ok(Json(ClearedResponse { removed }))
}
