//! Data access behind a single trait so the backend is picked once at
//! startup: Postgres when `DATABASE_URL` is set, the in-memory fixture
//! store otherwise. Handlers only ever see `Arc<dyn Store>`.

pub mod fixtures;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use time::Date;
use uuid::Uuid;

use crate::models::{
    Difficulty, InventoryItem, InventoryUpdate, Meal, NewInventoryItem, NewMeal,
    NewRecommendationLog, NewShoppingItem, NewUser, NewWorkout, ProfileUpdate, Recipe,
    RecipeDetails, RecommendationLog, ShoppingItem, User, Workout, WorkoutUpdate,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("email already registered")]
    DuplicateEmail,
    #[error("only {available} portion(s) available")]
    InsufficientQuantity { available: i32 },
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                // users.email is the only unique constraint in the schema
                StoreError::DuplicateEmail
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    pub search: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub prep_friendly: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Default)]
pub struct MealQuery {
    pub date: Option<Date>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// `None` fetches every matching row, which the daily-totals path relies on.
    pub limit: Option<i64>,
}

/// Result of a consume call. `item` is `None` once the row was removed.
#[derive(Debug, Clone)]
pub struct ConsumeOutcome {
    pub consumed: i32,
    pub remaining: i32,
    pub removed: bool,
    pub item: Option<InventoryItem>,
}

#[async_trait]
pub trait Store: Send + Sync {
    // users
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<User, StoreError>;
    /// Removes the user and, through ownership, every record they own.
    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError>;

    // workouts
    async fn create_workout(&self, new: NewWorkout) -> Result<Workout, StoreError>;
    async fn list_workouts(
        &self,
        user_id: Uuid,
        since: Option<Date>,
    ) -> Result<Vec<Workout>, StoreError>;
    async fn get_workout(&self, user_id: Uuid, id: Uuid) -> Result<Workout, StoreError>;
    async fn update_workout(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: WorkoutUpdate,
    ) -> Result<Workout, StoreError>;
    async fn delete_workout(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError>;

    // inventory
    async fn create_inventory_item(
        &self,
        new: NewInventoryItem,
    ) -> Result<InventoryItem, StoreError>;
    /// All items for the user, ordered by expiry (soonest first).
    async fn list_inventory(&self, user_id: Uuid) -> Result<Vec<InventoryItem>, StoreError>;
    async fn get_inventory_item(&self, user_id: Uuid, id: Uuid)
        -> Result<InventoryItem, StoreError>;
    async fn update_inventory_item(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: InventoryUpdate,
    ) -> Result<InventoryItem, StoreError>;
    async fn delete_inventory_item(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError>;
    /// Transactional read-check-write; deletes the row when it reaches zero.
    async fn consume_inventory_item(
        &self,
        user_id: Uuid,
        id: Uuid,
        portions: i32,
    ) -> Result<ConsumeOutcome, StoreError>;

    // meals
    async fn create_meal(&self, new: NewMeal) -> Result<Meal, StoreError>;
    async fn list_meals(&self, user_id: Uuid, query: MealQuery) -> Result<Vec<Meal>, StoreError>;

    // recipe catalog (global, read-only)
    async fn list_recipes(&self, query: RecipeQuery) -> Result<(Vec<Recipe>, i64), StoreError>;
    async fn get_recipe(&self, id: Uuid) -> Result<RecipeDetails, StoreError>;
    async fn all_recipes(&self) -> Result<Vec<Recipe>, StoreError>;

    // shopping list
    async fn create_shopping_items(
        &self,
        items: Vec<NewShoppingItem>,
    ) -> Result<Vec<ShoppingItem>, StoreError>;
    async fn list_shopping_items(&self, user_id: Uuid) -> Result<Vec<ShoppingItem>, StoreError>;
    async fn toggle_shopping_item(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<ShoppingItem, StoreError>;
    async fn delete_shopping_item(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError>;
    async fn clear_checked_shopping_items(&self, user_id: Uuid) -> Result<u64, StoreError>;
    async fn clear_shopping_items(&self, user_id: Uuid) -> Result<u64, StoreError>;

    // recommendation audit trail
    async fn log_recommendation(
        &self,
        new: NewRecommendationLog,
    ) -> Result<RecommendationLog, StoreError>;
    async fn list_recommendation_logs(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RecommendationLog>, StoreError>;
}
