use axum::{
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{
    auth::{services, AuthUser},
    error::ApiError,
    state::AppState,
    store::MealQuery,
    users::dto::{DeletedResponse, ExportResponse},
};

pub fn data_routes() -> Router<AppState> {
    Router::new().route("/user/data", get(export_data).delete(delete_data))
}

#[instrument(skip(state))]
async fn export_data(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let account = state
        .store
        .find_user(user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let workouts = state.store.list_workouts(user.id, None).await?;
    let meals = state.store.list_meals(user.id, MealQuery::default()).await?;
    let inventory = state.store.list_inventory(user.id).await?;
    let shopping_items = state.store.list_shopping_items(user.id).await?;
    let recommendations = state.store.list_recommendation_logs(user.id).await?;

    info!(
        user_id = %user.id,
        workouts = workouts.len(),
        meals = meals.len(),
        inventory = inventory.len(),
        "user data exported"
    );

    let disposition = format!("attachment; filename=\"fitmeal-data-{}.json\"", user.id);
    Ok((
        AppendHeaders([(header::CONTENT_DISPOSITION, disposition)]),
        Json(ExportResponse {
            exported_at: OffsetDateTime::now_utc(),
            user: account.into(),
            workouts,
            meals,
            inventory,
            shopping_items,
            recommendations,
        }),
    ))
}

#[instrument(skip(state))]
async fn delete_data(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete_user(user.id).await?;
    info!(user_id = %user.id, "user account and all owned records deleted");

    let cookie = services::clear_session_cookie(state.config.is_production());
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(DeletedResponse {
            message: "All user data has been deleted",
            deleted_at: OffsetDateTime::now_utc(),
        }),
    ))
}
