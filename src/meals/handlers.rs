use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::AuthUser,
    error::ApiError,
    meals::{
        dto::{CreateMealRequest, ListQuery, MealResponse, MealsResponse},
        services,
    },
    models::{parse_date, MealSource, MealType, NewMeal},
    state::AppState,
    store::MealQuery,
};

pub fn meal_routes() -> Router<AppState> {
    Router::new().route("/meals", get(list_meals).post(create_meal))
}

#[instrument(skip(state))]
async fn list_meals(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<MealsResponse>, ApiError> {
    let date = query
        .date
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let start_date = query
        .start_date
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let end_date = query
        .end_date
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let limit = query.limit.unwrap_or(30).max(0);

    if date.is_some() {
        // Totals cover the whole day even when the page clips.
        let mut meals = state
            .store
            .list_meals(
                user.id,
                MealQuery {
                    date,
                    start_date,
                    end_date,
                    limit: None,
                },
            )
            .await?;
        let daily_totals = Some(services::daily_totals(&meals));
        meals.truncate(limit as usize);
        Ok(Json(MealsResponse { meals, daily_totals }))
    } else {
        let meals = state
            .store
            .list_meals(
                user.id,
                MealQuery {
                    date: None,
                    start_date,
                    end_date,
                    limit: Some(limit),
                },
            )
            .await?;
        Ok(Json(MealsResponse {
            meals,
            daily_totals: None,
        }))
    }
}

#[instrument(skip(state, payload))]
async fn create_meal(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateMealRequest>,
) -> Result<Json<MealResponse>, ApiError> {
    let (Some(raw_type), Some(raw_date)) = (payload.meal_type, payload.meal_date) else {
        return Err(ApiError::bad_request("MealType and mealDate are required"));
    };
    let meal_type: MealType = raw_type.parse().map_err(ApiError::BadRequest)?;
    let source = match payload.source.as_deref() {
        Some(raw) => raw.parse().map_err(ApiError::BadRequest)?,
        None => MealSource::Homemade,
    };
    let meal_date = parse_date(&raw_date).map_err(ApiError::BadRequest)?;
    let name = payload
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| services::default_meal_name(meal_type));

    let meal = state
        .store
        .create_meal(NewMeal {
            user_id: user.id,
            name,
            meal_type,
            source,
            meal_date,
            nutrition: payload.nutrition,
            recipe_id: payload.recipe_id,
            notes: payload.notes,
        })
        .await?;

    info!(user_id = %user.id, meal_id = %meal.id, meal_type = meal_type.as_str(), "meal logged");
    Ok(Json(MealResponse { meal }))
}
