use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Meal, Nutrition};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    /// Defaults to a label derived from the meal type ("Breakfast", ...).
    pub name: Option<String>,
    pub meal_type: Option<String>,
    pub source: Option<String>,
    /// `YYYY-MM-DD`.
    pub meal_date: Option<String>,
    pub nutrition: Option<Nutrition>,
    pub recipe_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
}

/// Summed nutrition for one day. Only returned for exact-date queries.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    pub total_calories: i64,
    pub total_protein: i64,
    pub total_carbs: i64,
    pub total_fat: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealsResponse {
    pub meals: Vec<Meal>,
    /// `null` unless the request filtered on an exact date.
    pub daily_totals: Option<DailyTotals>,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal: Meal,
}
