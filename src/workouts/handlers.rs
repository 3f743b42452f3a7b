use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use time::{Duration, OffsetDateTime};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::{parse_date, Intensity, NewWorkout, WorkoutType, WorkoutUpdate},
    state::AppState,
    store::StoreError,
    workouts::{
        dto::{
            CreateWorkoutRequest, ListQuery, StatsQuery, StatsResponse, UpdateWorkoutRequest,
            WorkoutResponse, WorkoutsResponse,
        },
        services,
    },
};

pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", get(list_workouts).post(create_workout))
        .route("/workouts/stats", get(workout_stats))
}

pub fn item_routes() -> Router<AppState> {
    Router::new().route(
        "/workouts/:id",
        get(get_workout).put(update_workout).delete(delete_workout),
    )
}

fn window_start(days: i64) -> time::Date {
    OffsetDateTime::now_utc().date() - Duration::days(days.max(0))
}

#[instrument(skip(state))]
async fn list_workouts(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<WorkoutsResponse>, ApiError> {
    let since = query.days.map(window_start);
    let workouts = state.store.list_workouts(user.id, since).await?;
    Ok(Json(WorkoutsResponse { workouts }))
}

#[instrument(skip(state, payload))]
async fn create_workout(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateWorkoutRequest>,
) -> Result<Json<WorkoutResponse>, ApiError> {
    let workout_type: WorkoutType = payload.workout_type.parse().map_err(ApiError::BadRequest)?;
    let intensity: Intensity = payload.intensity.parse().map_err(ApiError::BadRequest)?;
    if payload.duration < 1 {
        return Err(ApiError::bad_request("Duration must be at least 1 minute"));
    }
    let workout_date = match payload.workout_date.as_deref() {
        Some(raw) => parse_date(raw).map_err(ApiError::BadRequest)?,
        None => OffsetDateTime::now_utc().date(),
    };

    let calories_burned = services::calories_burned(workout_type, payload.duration, intensity);
    let workout = state
        .store
        .create_workout(NewWorkout {
            user_id: user.id,
            workout_type,
            duration: payload.duration,
            intensity,
            calories_burned,
            workout_date,
            name: payload.name,
            notes: payload.notes,
        })
        .await?;

    info!(workout_id = %workout.id, calories = calories_burned, "workout logged");
    Ok(Json(WorkoutResponse { workout }))
}

#[instrument(skip(state))]
async fn workout_stats(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, ApiError> {
    let days = query.days.unwrap_or(7);
    let recent = state
        .store
        .list_workouts(user.id, Some(window_start(days)))
        .await?;
    // the streak looks at the whole log, not just the stats window
    let all = state.store.list_workouts(user.id, None).await?;
    let dates: Vec<time::Date> = all.iter().map(|w| w.workout_date).collect();

    Ok(Json(StatsResponse {
        streak: services::workout_streak(&dates, OffsetDateTime::now_utc().date()),
        total_calories_burned: services::total_calories(&recent),
        total_workouts: recent.len(),
        total_duration: services::total_duration(&recent),
    }))
}

#[instrument(skip(state))]
async fn get_workout(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkoutResponse>, ApiError> {
    let workout = match state.store.get_workout(user.id, id).await {
        Ok(w) => w,
        Err(StoreError::NotFound) => return Err(ApiError::not_found("Workout not found")),
        Err(e) => return Err(e.into()),
    };
    Ok(Json(WorkoutResponse { workout }))
}

#[instrument(skip(state, payload))]
async fn update_workout(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateWorkoutRequest>,
) -> Result<Json<WorkoutResponse>, ApiError> {
    let existing = match state.store.get_workout(user.id, id).await {
        Ok(w) => w,
        Err(StoreError::NotFound) => return Err(ApiError::not_found("Workout not found")),
        Err(e) => return Err(e.into()),
    };

    let workout_type: WorkoutType = match payload.workout_type.as_deref() {
        Some(raw) => raw.parse().map_err(ApiError::BadRequest)?,
        None => existing.workout_type,
    };
    let intensity: Intensity = match payload.intensity.as_deref() {
        Some(raw) => raw.parse().map_err(ApiError::BadRequest)?,
        None => existing.intensity,
    };
    let duration = payload.duration.unwrap_or(existing.duration);
    if duration < 1 {
        return Err(ApiError::bad_request("Duration must be at least 1 minute"));
    }
    let workout_date = match payload.workout_date.as_deref() {
        Some(raw) => parse_date(raw).map_err(ApiError::BadRequest)?,
        None => existing.workout_date,
    };

    let update = WorkoutUpdate {
        workout_type,
        duration,
        intensity,
        calories_burned: services::calories_burned(workout_type, duration, intensity),
        workout_date,
        name: payload.name.or(existing.name),
        notes: payload.notes.or(existing.notes),
    };

    let workout = match state.store.update_workout(user.id, id, update).await {
        Ok(w) => w,
        Err(StoreError::NotFound) => return Err(ApiError::not_found("Workout not found")),
        Err(e) => return Err(e.into()),
    };
    info!(workout_id = %workout.id, "workout updated");
    Ok(Json(WorkoutResponse { workout }))
}

#[instrument(skip(state))]
async fn delete_workout(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.store.delete_workout(user.id, id).await? {
        return Err(ApiError::not_found("Workout not found"));
    }
    info!(workout_id = %id, "workout deleted");
    Ok(Json(serde_json::json!({ "message": "Workout deleted" })))
}
