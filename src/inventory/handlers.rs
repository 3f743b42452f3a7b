use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    inventory::{
        dto::{
            ConsumeRequest, ConsumeResponse, CreateInventoryRequest, ExpiringQuery,
            InventoryListResponse, ItemResponse, ItemViewResponse, ListQuery,
            UpdateInventoryRequest,
        },
        services,
    },
    models::{parse_timestamp, InventoryCategory, InventoryUpdate, NewInventoryItem},
    state::AppState,
    store::StoreError,
};

pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(list_inventory).post(create_item))
        .route("/inventory/expiring", get(expiring_soon))
        .route("/inventory/expired", get(expired))
}

pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/inventory/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/inventory/:id/consume", post(consume_item))
}

#[instrument(skip(state))]
async fn list_inventory(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<InventoryListResponse>, ApiError> {
    let now = OffsetDateTime::now_utc();
    let include_expired = query.include_expired.unwrap_or(false);
    let inventory = state
        .store
        .list_inventory(user.id)
        .await?
        .into_iter()
        .filter(|i| include_expired || i.expires_at >= now)
        .map(|i| services::decorate(i, now))
        .collect();
    Ok(Json(InventoryListResponse { inventory }))
}

#[instrument(skip(state, payload))]
async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateInventoryRequest>,
) -> Result<Json<ItemResponse>, ApiError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }
    if payload.quantity < 0 {
        return Err(ApiError::bad_request("Quantity cannot be negative"));
    }
    if payload.unit.trim().is_empty() {
        return Err(ApiError::bad_request("Unit is required"));
    }
    let category: InventoryCategory = payload.category.parse().map_err(ApiError::BadRequest)?;

    let prepared_at = match payload.prepared_at.as_deref() {
        Some(raw) => parse_timestamp(raw).map_err(ApiError::BadRequest)?,
        None => OffsetDateTime::now_utc(),
    };
    let expires_at = parse_timestamp(&payload.expires_at).map_err(ApiError::BadRequest)?;
    if expires_at <= prepared_at {
        return Err(ApiError::bad_request("expiresAt must be after preparedAt"));
    }

    let item = state
        .store
        .create_inventory_item(NewInventoryItem {
            user_id: user.id,
            name,
            quantity: payload.quantity,
            unit: payload.unit,
            category,
            prepared_at,
            expires_at,
            nutrition: payload.nutrition,
            recipe_id: payload.recipe_id,
        })
        .await?;

    info!(item_id = %item.id, quantity = item.quantity, "inventory item added");
    Ok(Json(ItemResponse { item }))
}

#[instrument(skip(state))]
async fn expiring_soon(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ExpiringQuery>,
) -> Result<Json<InventoryListResponse>, ApiError> {
    let now = OffsetDateTime::now_utc();
    let days = query.days.unwrap_or(3).max(0);
    let items = state.store.list_inventory(user.id).await?;
    let inventory = services::expiring_soon(items, days, now)
        .into_iter()
        .map(|i| services::decorate(i, now))
        .collect();
    Ok(Json(InventoryListResponse { inventory }))
}

#[instrument(skip(state))]
async fn expired(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<InventoryListResponse>, ApiError> {
    let now = OffsetDateTime::now_utc();
    let items = state.store.list_inventory(user.id).await?;
    let inventory = services::expired(items, now)
        .into_iter()
        .map(|i| services::decorate(i, now))
        .collect();
    Ok(Json(InventoryListResponse { inventory }))
}

#[instrument(skip(state))]
async fn get_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemViewResponse>, ApiError> {
    let item = match state.store.get_inventory_item(user.id, id).await {
        Ok(i) => i,
        Err(StoreError::NotFound) => return Err(ApiError::not_found("Item not found")),
        Err(e) => return Err(e.into()),
    };
    Ok(Json(ItemViewResponse {
        item: services::decorate(item, OffsetDateTime::now_utc()),
    }))
}

#[instrument(skip(state, payload))]
async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInventoryRequest>,
) -> Result<Json<ItemResponse>, ApiError> {
    let update = InventoryUpdate {
        name: payload.name,
        quantity: payload.quantity,
        unit: payload.unit,
        category: payload
            .category
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ApiError::BadRequest)?,
        expires_at: payload
            .expires_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()
            .map_err(ApiError::BadRequest)?,
    };

    let item = match state.store.update_inventory_item(user.id, id, update).await {
        Ok(i) => i,
        Err(StoreError::NotFound) => return Err(ApiError::not_found("Item not found")),
        Err(e) => return Err(e.into()),
    };
    info!(item_id = %item.id, "inventory item updated");
    Ok(Json(ItemResponse { item }))
}

#[instrument(skip(state))]
async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.store.delete_inventory_item(user.id, id).await? {
        return Err(ApiError::not_found("Item not found"));
    }
    info!(item_id = %id, "inventory item deleted");
    Ok(Json(json!({ "message": "Item deleted" })))
}

#[instrument(skip(state, payload))]
async fn consume_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    payload: Option<Json<ConsumeRequest>>,
) -> Result<Json<ConsumeResponse>, ApiError> {
    let portions = payload.and_then(|Json(p)| p.portions).unwrap_or(1);
    if portions < 1 {
        return Err(ApiError::bad_request("Portions must be at least 1"));
    }

    let outcome = match state
        .store
        .consume_inventory_item(user.id, id, portions)
        .await
    {
        Ok(o) => o,
        Err(StoreError::NotFound) => return Err(ApiError::not_found("Item not found")),
        Err(e) => return Err(e.into()),
    };

    let message = if outcome.removed {
        "All portions consumed, item removed from inventory".to_string()
    } else {
        format!("Consumed {} portion(s)", outcome.consumed)
    };
    info!(
        item_id = %id,
        consumed = outcome.consumed,
        remaining = outcome.remaining,
        removed = outcome.removed,
        "inventory consumed"
    );
    Ok(Json(ConsumeResponse {
        message,
        consumed: outcome.consumed,
        remaining: outcome.remaining,
        item: outcome.item,
    }))
}
