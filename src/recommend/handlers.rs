use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::NewRecommendationLog,
    recommend::{
        dto::{RecommendRequest, RecommendResponse},
        services,
    },
    state::AppState,
};

const DISCLAIMER: &str =
    "Dietary suggestions are for reference only. Adjust them to your own needs.";

pub fn recommend_routes() -> Router<AppState> {
    Router::new().route("/recommend", post(recommend))
}

/// Works without a session; only authenticated calls leave an audit entry.
#[instrument(skip(state, payload))]
async fn recommend(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Json(payload): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let Some(context) = payload.context.filter(|c| !c.trim().is_empty()) else {
        return Err(ApiError::bad_request("Context is required"));
    };
    let limit = payload
        .limit
        .unwrap_or(services::DEFAULT_LIMIT as i64)
        .clamp(1, services::MAX_LIMIT as i64) as usize;
    let exclude = payload.exclude_ids.unwrap_or_default();

    let catalog = state.store.all_recipes().await?;
    let recipes = {
        let mut rng = rand::thread_rng();
        services::recommend(&catalog, &context, &exclude, limit, &mut rng)
    };

    if let Some(user) = &user {
        let ids: Vec<Uuid> = recipes.iter().map(|r| r.id).collect();
        state
            .store
            .log_recommendation(NewRecommendationLog {
                user_id: user.id,
                context: context.clone(),
                recommended_recipes: ids,
            })
            .await?;
    }

    info!(
        context = %context,
        returned = recipes.len(),
        logged = user.is_some(),
        "recommendations served"
    );
    Ok(Json(RecommendResponse {
        context,
        recipes,
        disclaimer: DISCLAIMER,
    }))
}
