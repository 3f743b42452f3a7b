use serde::{Deserialize, Serialize};

use crate::models::Workout;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequest {
    #[serde(rename = "type")]
    pub workout_type: String,
    pub duration: i32,
    pub intensity: String,
    /// `YYYY-MM-DD`; defaults to today.
    pub workout_date: Option<String>,
    pub name: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; omitted fields keep their stored values. Calories are
/// recomputed from the merged record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutRequest {
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub duration: Option<i32>,
    pub intensity: Option<String>,
    pub workout_date: Option<String>,
    pub name: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutsResponse {
    pub workouts: Vec<Workout>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutResponse {
    pub workout: Workout,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub streak: i32,
    pub total_calories_burned: i64,
    pub total_workouts: usize,
    pub total_duration: i64,
}
