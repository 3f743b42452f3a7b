//! Domain entities shared by the REST layer and both store backends.
//!
//! Enum-like fields travel as strings over the wire and in the database;
//! each enum carries `as_str`/`FromStr` so handlers can turn bad input into
//! a 400 instead of a generic deserialization failure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    MuscleGain,
    FatLoss,
    Maintain,
    Healthy,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::MuscleGain => "muscle_gain",
            Goal::FatLoss => "fat_loss",
            Goal::Maintain => "maintain",
            Goal::Healthy => "healthy",
        }
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "muscle_gain" => Ok(Goal::MuscleGain),
            "fat_loss" => Ok(Goal::FatLoss),
            "maintain" => Ok(Goal::Maintain),
            "healthy" => Ok(Goal::Healthy),
            other => Err(format!("Invalid goal: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusyLevel {
    Relaxed,
    Normal,
    VeryBusy,
}

impl BusyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusyLevel::Relaxed => "relaxed",
            BusyLevel::Normal => "normal",
            BusyLevel::VeryBusy => "very_busy",
        }
    }
}

impl FromStr for BusyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relaxed" => Ok(BusyLevel::Relaxed),
            "normal" => Ok(BusyLevel::Normal),
            "very_busy" => Ok(BusyLevel::VeryBusy),
            other => Err(format!("Invalid busy level: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl CookingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CookingLevel::Beginner => "beginner",
            CookingLevel::Intermediate => "intermediate",
            CookingLevel::Expert => "expert",
        }
    }
}

impl FromStr for CookingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(CookingLevel::Beginner),
            "intermediate" => Ok(CookingLevel::Intermediate),
            "expert" => Ok(CookingLevel::Expert),
            other => Err(format!("Invalid cooking level: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Easy,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Easy => "easy",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "easy" => Ok(Difficulty::Easy),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("Invalid difficulty: {other}")),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Strength,
    Cardio,
    Hiit,
    Yoga,
    Swimming,
    Running,
    Cycling,
    Other,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Strength => "strength",
            WorkoutType::Cardio => "cardio",
            WorkoutType::Hiit => "hiit",
            WorkoutType::Yoga => "yoga",
            WorkoutType::Swimming => "swimming",
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
            WorkoutType::Other => "other",
        }
    }
}

impl FromStr for WorkoutType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(WorkoutType::Strength),
            "cardio" => Ok(WorkoutType::Cardio),
            "hiit" => Ok(WorkoutType::Hiit),
            "yoga" => Ok(WorkoutType::Yoga),
            "swimming" => Ok(WorkoutType::Swimming),
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            "other" => Ok(WorkoutType::Other),
            other => Err(format!("Invalid workout type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

impl FromStr for Intensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Intensity::Low),
            "medium" => Ok(Intensity::Medium),
            "high" => Ok(Intensity::High),
            other => Err(format!("Invalid intensity: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InventoryCategory {
    Protein,
    Carbs,
    Vegetable,
    CompleteMeal,
    Snack,
}

impl InventoryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryCategory::Protein => "protein",
            InventoryCategory::Carbs => "carbs",
            InventoryCategory::Vegetable => "vegetable",
            InventoryCategory::CompleteMeal => "complete-meal",
            InventoryCategory::Snack => "snack",
        }
    }
}

impl FromStr for InventoryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "protein" => Ok(InventoryCategory::Protein),
            "carbs" => Ok(InventoryCategory::Carbs),
            "vegetable" => Ok(InventoryCategory::Vegetable),
            "complete-meal" => Ok(InventoryCategory::CompleteMeal),
            "snack" => Ok(InventoryCategory::Snack),
            other => Err(format!("Invalid inventory category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShoppingCategory {
    Protein,
    Vegetable,
    Staple,
    Seasoning,
    Other,
}

impl ShoppingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShoppingCategory::Protein => "protein",
            ShoppingCategory::Vegetable => "vegetable",
            ShoppingCategory::Staple => "staple",
            ShoppingCategory::Seasoning => "seasoning",
            ShoppingCategory::Other => "other",
        }
    }
}

impl FromStr for ShoppingCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "protein" => Ok(ShoppingCategory::Protein),
            "vegetable" => Ok(ShoppingCategory::Vegetable),
            "staple" => Ok(ShoppingCategory::Staple),
            "seasoning" => Ok(ShoppingCategory::Seasoning),
            "other" => Ok(ShoppingCategory::Other),
            other => Err(format!("Invalid shopping category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(format!("Invalid meal type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSource {
    Homemade,
    Prepped,
    Restaurant,
    Delivery,
}

impl MealSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSource::Homemade => "homemade",
            MealSource::Prepped => "prepped",
            MealSource::Restaurant => "restaurant",
            MealSource::Delivery => "delivery",
        }
    }
}

impl FromStr for MealSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "homemade" => Ok(MealSource::Homemade),
            "prepped" => Ok(MealSource::Prepped),
            "restaurant" => Ok(MealSource::Restaurant),
            "delivery" => Ok(MealSource::Delivery),
            other => Err(format!("Invalid meal source: {other}")),
        }
    }
}

/// Per-serving macros. Attached whole or not at all; no partial snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
}

/// Never serialized as-is; the hash stays server-side. Responses use
/// `auth::dto::PublicUser`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub goal: Goal,
    pub busy_level: BusyLevel,
    pub cooking_level: CookingLevel,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub source: String,
    pub source_url: String,
    pub cook_time: i32,
    pub difficulty: Difficulty,
    pub servings: i32,
    pub prep_friendly: bool,
    pub nutrition: Nutrition,
    pub tags: Vec<String>,
    pub contexts: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub name: String,
    pub amount: String,
    pub optional: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub step_order: i32,
    pub description: String,
    pub duration: Option<i32>,
}

/// A recipe with its ordered ingredients and steps, as served by
/// `GET /api/recipes/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<RecipeStep>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub duration: i32,
    pub intensity: Intensity,
    pub calories_burned: i32,
    pub workout_date: Date,
    pub name: Option<String>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub unit: String,
    pub category: InventoryCategory,
    #[serde(with = "time::serde::rfc3339")]
    pub prepared_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    pub nutrition: Option<Nutrition>,
    pub recipe_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub meal_type: MealType,
    pub source: MealSource,
    pub meal_date: Date,
    pub nutrition: Option<Nutrition>,
    pub recipe_id: Option<Uuid>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub amount: String,
    pub category: ShoppingCategory,
    pub checked: bool,
    pub recipe_id: Option<Uuid>,
    pub recipe_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub context: String,
    pub recommended_recipes: Vec<Uuid>,
    pub selected_recipe_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

// Store inputs. Ids and created-at stamps are assigned by the store.

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub goal: Goal,
    pub busy_level: BusyLevel,
    pub cooking_level: CookingLevel,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub goal: Option<Goal>,
    pub busy_level: Option<BusyLevel>,
    pub cooking_level: Option<CookingLevel>,
}

#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub user_id: Uuid,
    pub workout_type: WorkoutType,
    pub duration: i32,
    pub intensity: Intensity,
    pub calories_burned: i32,
    pub workout_date: Date,
    pub name: Option<String>,
    pub notes: Option<String>,
}

/// Full replacement payload for a workout; handlers merge the incoming
/// patch over the stored record and recompute calories before calling in.
#[derive(Debug, Clone)]
pub struct WorkoutUpdate {
    pub workout_type: WorkoutType,
    pub duration: i32,
    pub intensity: Intensity,
    pub calories_burned: i32,
    pub workout_date: Date,
    pub name: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub user_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub unit: String,
    pub category: InventoryCategory,
    pub prepared_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
    pub nutrition: Option<Nutrition>,
    pub recipe_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct InventoryUpdate {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub unit: Option<String>,
    pub category: Option<InventoryCategory>,
    pub expires_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewMeal {
    pub user_id: Uuid,
    pub name: String,
    pub meal_type: MealType,
    pub source: MealSource,
    pub meal_date: Date,
    pub nutrition: Option<Nutrition>,
    pub recipe_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewShoppingItem {
    pub user_id: Uuid,
    pub name: String,
    pub amount: String,
    pub category: ShoppingCategory,
    pub recipe_id: Option<Uuid>,
    pub recipe_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewRecommendationLog {
    pub user_id: Uuid,
    pub context: String,
    pub recommended_recipes: Vec<Uuid>,
}

/// Parses a plain calendar date in the `YYYY-MM-DD` wire format.
pub fn parse_date(raw: &str) -> Result<Date, String> {
    Date::parse(raw, &time::macros::format_description!("[year]-[month]-[day]"))
        .map_err(|_| format!("Invalid date: {raw}"))
}

/// Parses an RFC 3339 timestamp such as `2024-06-10T18:30:00Z`.
pub fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(raw, &time::format_description::well_known::Rfc3339)
        .map_err(|_| format!("Invalid timestamp: {raw}"))
}
