//! Postgres-backed store. Runs migrations on connect and seeds the recipe
//! catalog the first time it sees an empty table. Enum-ish fields are kept
//! as text columns and parsed back at the row boundary.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use time::{Date, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use super::{fixtures, ConsumeOutcome, MealQuery, RecipeQuery, Store, StoreError};
use crate::models::{
    InventoryItem, InventoryUpdate, Meal, NewInventoryItem, NewMeal, NewRecommendationLog,
    NewShoppingItem, NewUser, NewWorkout, Nutrition, ProfileUpdate, Recipe, RecipeDetails,
    RecipeIngredient, RecipeStep, RecommendationLog, ShoppingItem, User, Workout, WorkoutUpdate,
};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects, migrates, and seeds the catalog when it is empty.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        let store = Self { pool };
        store.seed_catalog_if_empty().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn seed_catalog_if_empty(&self) -> anyhow::Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        let catalog = fixtures::recipe_catalog();
        let total = catalog.len();
        let mut tx = self.pool.begin().await?;
        for seed in catalog {
            let r = &seed.recipe;
            sqlx::query(
                r#"
                INSERT INTO recipes
                    (id, title, description, source, source_url, cook_time, difficulty,
                     servings, prep_friendly, calories, protein, carbs, fat, tags,
                     contexts, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
                "#,
            )
            .bind(r.id)
            .bind(&r.title)
            .bind(&r.description)
            .bind(&r.source)
            .bind(&r.source_url)
            .bind(r.cook_time)
            .bind(r.difficulty.as_str())
            .bind(r.servings)
            .bind(r.prep_friendly)
            .bind(r.nutrition.calories)
            .bind(r.nutrition.protein)
            .bind(r.nutrition.carbs)
            .bind(r.nutrition.fat)
            .bind(&r.tags)
            .bind(&r.contexts)
            .bind(r.created_at)
            .execute(&mut *tx)
            .await?;

            for ing in &seed.ingredients {
                sqlx::query(
                    r#"
                    INSERT INTO recipe_ingredients
                        (id, recipe_id, name, amount, optional, sort_order)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(ing.id)
                .bind(ing.recipe_id)
                .bind(&ing.name)
                .bind(&ing.amount)
                .bind(ing.optional)
                .bind(ing.sort_order)
                .execute(&mut *tx)
                .await?;
            }

            for step in &seed.steps {
                sqlx::query(
                    r#"
                    INSERT INTO recipe_steps (id, recipe_id, step_order, description, duration)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(step.id)
                .bind(step.recipe_id)
                .bind(step.step_order)
                .bind(&step.description)
                .bind(step.duration)
                .execute(&mut *tx)
                .await?;
            }
        }
        tx.commit().await?;
        info!(recipes = total, "seeded recipe catalog");
        Ok(())
    }
}

fn parse_enum<T>(value: &str) -> Result<T, StoreError>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(StoreError::Database)
}

fn nutrition_from(
    calories: Option<i32>,
    protein: Option<i32>,
    carbs: Option<i32>,
    fat: Option<i32>,
) -> Option<Nutrition> {
    match (calories, protein, carbs, fat) {
        (Some(calories), Some(protein), Some(carbs), Some(fat)) => Some(Nutrition {
            calories,
            protein,
            carbs,
            fat,
        }),
        _ => None,
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    goal: String,
    busy_level: String,
    cooking_level: String,
    created_at: OffsetDateTime,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            goal: parse_enum(&row.goal)?,
            busy_level: parse_enum(&row.busy_level)?,
            cooking_level: parse_enum(&row.cooking_level)?,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: Uuid,
    title: String,
    description: String,
    source: String,
    source_url: String,
    cook_time: i32,
    difficulty: String,
    servings: i32,
    prep_friendly: bool,
    calories: i32,
    protein: i32,
    carbs: i32,
    fat: i32,
    tags: Vec<String>,
    contexts: Vec<String>,
    created_at: OffsetDateTime,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = StoreError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        Ok(Recipe {
            id: row.id,
            title: row.title,
            description: row.description,
            source: row.source,
            source_url: row.source_url,
            cook_time: row.cook_time,
            difficulty: parse_enum(&row.difficulty)?,
            servings: row.servings,
            prep_friendly: row.prep_friendly,
            nutrition: Nutrition {
                calories: row.calories,
                protein: row.protein,
                carbs: row.carbs,
                fat: row.fat,
            },
            tags: row.tags,
            contexts: row.contexts,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct IngredientRow {
    id: Uuid,
    recipe_id: Uuid,
    name: String,
    amount: String,
    optional: bool,
    sort_order: i32,
}

impl From<IngredientRow> for RecipeIngredient {
    fn from(row: IngredientRow) -> Self {
        RecipeIngredient {
            id: row.id,
            recipe_id: row.recipe_id,
            name: row.name,
            amount: row.amount,
            optional: row.optional,
            sort_order: row.sort_order,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StepRow {
    id: Uuid,
    recipe_id: Uuid,
    step_order: i32,
    description: String,
    duration: Option<i32>,
}

impl From<StepRow> for RecipeStep {
    fn from(row: StepRow) -> Self {
        RecipeStep {
            id: row.id,
            recipe_id: row.recipe_id,
            step_order: row.step_order,
            description: row.description,
            duration: row.duration,
        }
    }
}

#[derive(sqlx::FromRow)]
struct WorkoutRow {
    id: Uuid,
    user_id: Uuid,
    workout_type: String,
    duration: i32,
    intensity: String,
    calories_burned: i32,
    workout_date: Date,
    name: Option<String>,
    notes: Option<String>,
    created_at: OffsetDateTime,
}

impl TryFrom<WorkoutRow> for Workout {
    type Error = StoreError;

    fn try_from(row: WorkoutRow) -> Result<Self, Self::Error> {
        Ok(Workout {
            id: row.id,
            user_id: row.user_id,
            workout_type: parse_enum(&row.workout_type)?,
            duration: row.duration,
            intensity: parse_enum(&row.intensity)?,
            calories_burned: row.calories_burned,
            workout_date: row.workout_date,
            name: row.name,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct InventoryRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    quantity: i32,
    unit: String,
    category: String,
    prepared_at: OffsetDateTime,
    expires_at: OffsetDateTime,
    calories: Option<i32>,
    protein: Option<i32>,
    carbs: Option<i32>,
    fat: Option<i32>,
    recipe_id: Option<Uuid>,
    created_at: OffsetDateTime,
}

impl TryFrom<InventoryRow> for InventoryItem {
    type Error = StoreError;

    fn try_from(row: InventoryRow) -> Result<Self, Self::Error> {
        Ok(InventoryItem {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
            category: parse_enum(&row.category)?,
            prepared_at: row.prepared_at,
            expires_at: row.expires_at,
            nutrition: nutrition_from(row.calories, row.protein, row.carbs, row.fat),
            recipe_id: row.recipe_id,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MealRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    meal_type: String,
    source: String,
    meal_date: Date,
    calories: Option<i32>,
    protein: Option<i32>,
    carbs: Option<i32>,
    fat: Option<i32>,
    recipe_id: Option<Uuid>,
    notes: Option<String>,
    created_at: OffsetDateTime,
}

impl TryFrom<MealRow> for Meal {
    type Error = StoreError;

    fn try_from(row: MealRow) -> Result<Self, Self::Error> {
        Ok(Meal {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            meal_type: parse_enum(&row.meal_type)?,
            source: parse_enum(&row.source)?,
            meal_date: row.meal_date,
            nutrition: nutrition_from(row.calories, row.protein, row.carbs, row.fat),
            recipe_id: row.recipe_id,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ShoppingRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    amount: String,
    category: String,
    checked: bool,
    recipe_id: Option<Uuid>,
    recipe_name: Option<String>,
    created_at: OffsetDateTime,
}

impl TryFrom<ShoppingRow> for ShoppingItem {
    type Error = StoreError;

    fn try_from(row: ShoppingRow) -> Result<Self, Self::Error> {
        Ok(ShoppingItem {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            amount: row.amount,
            category: parse_enum(&row.category)?,
            checked: row.checked,
            recipe_id: row.recipe_id,
            recipe_name: row.recipe_name,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LogRow {
    id: Uuid,
    user_id: Uuid,
    context: String,
    recommended_recipes: Vec<Uuid>,
    selected_recipe_id: Option<Uuid>,
    created_at: OffsetDateTime,
}

impl From<LogRow> for RecommendationLog {
    fn from(row: LogRow) -> Self {
        RecommendationLog {
            id: row.id,
            user_id: row.user_id,
            context: row.context,
            recommended_recipes: row.recommended_recipes,
            selected_recipe_id: row.selected_recipe_id,
            created_at: row.created_at,
        }
    }
}

const USER_COLS: &str = "id, email, name, password_hash, goal, busy_level, cooking_level, created_at";
const RECIPE_COLS: &str = "id, title, description, source, source_url, cook_time, difficulty, \
                           servings, prep_friendly, calories, protein, carbs, fat, tags, \
                           contexts, created_at";
const WORKOUT_COLS: &str = "id, user_id, workout_type, duration, intensity, calories_burned, \
                            workout_date, name, notes, created_at";
const INVENTORY_COLS: &str = "id, user_id, name, quantity, unit, category, prepared_at, \
                              expires_at, calories, protein, carbs, fat, recipe_id, created_at";
const MEAL_COLS: &str = "id, user_id, name, meal_type, source, meal_date, calories, protein, \
                         carbs, fat, recipe_id, notes, created_at";
const SHOPPING_COLS: &str = "id, user_id, name, amount, category, checked, recipe_id, \
                             recipe_name, created_at";
const LOG_COLS: &str = "id, user_id, context, recommended_recipes, selected_recipe_id, created_at";

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, email, name, password_hash, goal, busy_level,
                               cooking_level, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.email)
        .bind(&new.name)
        .bind(&new.password_hash)
        .bind(new.goal.as_str())
        .bind(new.busy_level.as_str())
        .bind(new.cooking_level.as_str())
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row =
            sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(User::try_from).transpose()
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                goal = COALESCE($3, goal),
                busy_level = COALESCE($4, busy_level),
                cooking_level = COALESCE($5, cooking_level)
            WHERE id = $1
            RETURNING {USER_COLS}
            "#
        ))
        .bind(id)
        .bind(update.name)
        .bind(update.goal.map(|g| g.as_str()))
        .bind(update.busy_level.map(|b| b.as_str()))
        .bind(update.cooking_level.map(|c| c.as_str()))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;
        row.try_into()
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError> {
        // owned rows go with the user via ON DELETE CASCADE
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn create_workout(&self, new: NewWorkout) -> Result<Workout, StoreError> {
        let row = sqlx::query_as::<_, WorkoutRow>(&format!(
            r#"
            INSERT INTO workouts (id, user_id, workout_type, duration, intensity,
                                  calories_burned, workout_date, name, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {WORKOUT_COLS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.workout_type.as_str())
        .bind(new.duration)
        .bind(new.intensity.as_str())
        .bind(new.calories_burned)
        .bind(new.workout_date)
        .bind(new.name)
        .bind(new.notes)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn list_workouts(
        &self,
        user_id: Uuid,
        since: Option<Date>,
    ) -> Result<Vec<Workout>, StoreError> {
        let rows = sqlx::query_as::<_, WorkoutRow>(&format!(
            r#"
            SELECT {WORKOUT_COLS} FROM workouts
            WHERE user_id = $1 AND ($2::date IS NULL OR workout_date >= $2)
            ORDER BY workout_date DESC, created_at DESC
            "#
        ))
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Workout::try_from).collect()
    }

    async fn get_workout(&self, user_id: Uuid, id: Uuid) -> Result<Workout, StoreError> {
        let row = sqlx::query_as::<_, WorkoutRow>(&format!(
            "SELECT {WORKOUT_COLS} FROM workouts WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;
        row.try_into()
    }

    async fn update_workout(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: WorkoutUpdate,
    ) -> Result<Workout, StoreError> {
        let row = sqlx::query_as::<_, WorkoutRow>(&format!(
            r#"
            UPDATE workouts SET
                workout_type = $3, duration = $4, intensity = $5, calories_burned = $6,
                workout_date = $7, name = $8, notes = $9
            WHERE id = $1 AND user_id = $2
            RETURNING {WORKOUT_COLS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(update.workout_type.as_str())
        .bind(update.duration)
        .bind(update.intensity.as_str())
        .bind(update.calories_burned)
        .bind(update.workout_date)
        .bind(update.name)
        .bind(update.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;
        row.try_into()
    }

    async fn delete_workout(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_inventory_item(
        &self,
        new: NewInventoryItem,
    ) -> Result<InventoryItem, StoreError> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            INSERT INTO inventory_items
                (id, user_id, name, quantity, unit, category, prepared_at, expires_at,
                 calories, protein, carbs, fat, recipe_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {INVENTORY_COLS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.name)
        .bind(new.quantity)
        .bind(&new.unit)
        .bind(new.category.as_str())
        .bind(new.prepared_at)
        .bind(new.expires_at)
        .bind(new.nutrition.map(|n| n.calories))
        .bind(new.nutrition.map(|n| n.protein))
        .bind(new.nutrition.map(|n| n.carbs))
        .bind(new.nutrition.map(|n| n.fat))
        .bind(new.recipe_id)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn list_inventory(&self, user_id: Uuid) -> Result<Vec<InventoryItem>, StoreError> {
        let rows = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            SELECT {INVENTORY_COLS} FROM inventory_items
            WHERE user_id = $1
            ORDER BY expires_at ASC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(InventoryItem::try_from).collect()
    }

    async fn get_inventory_item(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<InventoryItem, StoreError> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            "SELECT {INVENTORY_COLS} FROM inventory_items WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;
        row.try_into()
    }

    async fn update_inventory_item(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: InventoryUpdate,
    ) -> Result<InventoryItem, StoreError> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            UPDATE inventory_items SET
                name = COALESCE($3, name),
                quantity = GREATEST(COALESCE($4, quantity), 0),
                unit = COALESCE($5, unit),
                category = COALESCE($6, category),
                expires_at = COALESCE($7, expires_at)
            WHERE id = $1 AND user_id = $2
            RETURNING {INVENTORY_COLS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(update.name)
        .bind(update.quantity)
        .bind(update.unit)
        .bind(update.category.map(|c| c.as_str()))
        .bind(update.expires_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;
        row.try_into()
    }

    async fn delete_inventory_item(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn consume_inventory_item(
        &self,
        user_id: Uuid,
        id: Uuid,
        portions: i32,
    ) -> Result<ConsumeOutcome, StoreError> {
        // read-check-write under one transaction so concurrent consumes of
        // the same item cannot lose updates
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            "SELECT {INVENTORY_COLS} FROM inventory_items WHERE id = $1 AND user_id = $2 FOR UPDATE"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        let available = row.quantity;
        if portions > available {
            return Err(StoreError::InsufficientQuantity { available });
        }

        let remaining = available - portions;
        if remaining == 0 {
            sqlx::query("DELETE FROM inventory_items WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            Ok(ConsumeOutcome {
                consumed: portions,
                remaining: 0,
                removed: true,
                item: None,
            })
        } else {
            let updated = sqlx::query_as::<_, InventoryRow>(&format!(
                "UPDATE inventory_items SET quantity = $2 WHERE id = $1 RETURNING {INVENTORY_COLS}"
            ))
            .bind(id)
            .bind(remaining)
            .fetch_one(&mut *tx)
            .await?;
            tx.commit().await?;
            Ok(ConsumeOutcome {
                consumed: portions,
                remaining,
                removed: false,
                item: Some(updated.try_into()?),
            })
        }
    }

    async fn create_meal(&self, new: NewMeal) -> Result<Meal, StoreError> {
        let row = sqlx::query_as::<_, MealRow>(&format!(
            r#"
            INSERT INTO meals (id, user_id, name, meal_type, source, meal_date,
                               calories, protein, carbs, fat, recipe_id, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {MEAL_COLS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.name)
        .bind(new.meal_type.as_str())
        .bind(new.source.as_str())
        .bind(new.meal_date)
        .bind(new.nutrition.map(|n| n.calories))
        .bind(new.nutrition.map(|n| n.protein))
        .bind(new.nutrition.map(|n| n.carbs))
        .bind(new.nutrition.map(|n| n.fat))
        .bind(new.recipe_id)
        .bind(new.notes)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn list_meals(&self, user_id: Uuid, query: MealQuery) -> Result<Vec<Meal>, StoreError> {
        let rows = sqlx::query_as::<_, MealRow>(&format!(
            r#"
            SELECT {MEAL_COLS} FROM meals
            WHERE user_id = $1
              AND ($2::date IS NULL OR meal_date = $2)
              AND ($3::date IS NULL OR meal_date >= $3)
              AND ($4::date IS NULL OR meal_date <= $4)
            ORDER BY meal_date DESC, created_at DESC
            LIMIT $5
            "#
        ))
        .bind(user_id)
        .bind(query.date)
        .bind(query.start_date)
        .bind(query.end_date)
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Meal::try_from).collect()
    }

    async fn list_recipes(&self, query: RecipeQuery) -> Result<(Vec<Recipe>, i64), StoreError> {
        let filter = r#"
            WHERE ($1::text IS NULL
                   OR title ILIKE '%' || $1 || '%'
                   OR description ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR difficulty = $2)
              AND ($3::boolean IS NULL OR prep_friendly = $3)
        "#;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM recipes {filter}"))
                .bind(query.search.as_deref())
                .bind(query.difficulty.map(|d| d.as_str()))
                .bind(query.prep_friendly)
                .fetch_one(&self.pool)
                .await?;

        let rows = sqlx::query_as::<_, RecipeRow>(&format!(
            r#"
            SELECT {RECIPE_COLS} FROM recipes
            {filter}
            ORDER BY title ASC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(query.search.as_deref())
        .bind(query.difficulty.map(|d| d.as_str()))
        .bind(query.prep_friendly)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await?;

        let recipes = rows
            .into_iter()
            .map(Recipe::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((recipes, total))
    }

    async fn get_recipe(&self, id: Uuid) -> Result<RecipeDetails, StoreError> {
        let recipe: Recipe = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLS} FROM recipes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?
        .try_into()?;

        let ingredients = sqlx::query_as::<_, IngredientRow>(
            r#"
            SELECT id, recipe_id, name, amount, optional, sort_order
            FROM recipe_ingredients
            WHERE recipe_id = $1
            ORDER BY sort_order ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(RecipeIngredient::from)
        .collect();

        let steps = sqlx::query_as::<_, StepRow>(
            r#"
            SELECT id, recipe_id, step_order, description, duration
            FROM recipe_steps
            WHERE recipe_id = $1
            ORDER BY step_order ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(RecipeStep::from)
        .collect();

        Ok(RecipeDetails {
            recipe,
            ingredients,
            steps,
        })
    }

    async fn all_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        let rows = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLS} FROM recipes ORDER BY title ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Recipe::try_from).collect()
    }

    async fn create_shopping_items(
        &self,
        items: Vec<NewShoppingItem>,
    ) -> Result<Vec<ShoppingItem>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(items.len());
        for new in items {
            let row = sqlx::query_as::<_, ShoppingRow>(&format!(
                r#"
                INSERT INTO shopping_items
                    (id, user_id, name, amount, category, checked, recipe_id,
                     recipe_name, created_at)
                VALUES ($1, $2, $3, $4, $5, FALSE, $6, $7, $8)
                RETURNING {SHOPPING_COLS}
                "#
            ))
            .bind(Uuid::new_v4())
            .bind(new.user_id)
            .bind(&new.name)
            .bind(&new.amount)
            .bind(new.category.as_str())
            .bind(new.recipe_id)
            .bind(new.recipe_name)
            .bind(OffsetDateTime::now_utc())
            .fetch_one(&mut *tx)
            .await?;
            created.push(row.try_into()?);
        }
        tx.commit().await?;
        Ok(created)
    }

    async fn list_shopping_items(&self, user_id: Uuid) -> Result<Vec<ShoppingItem>, StoreError> {
        let rows = sqlx::query_as::<_, ShoppingRow>(&format!(
            "SELECT {SHOPPING_COLS} FROM shopping_items WHERE user_id = $1 ORDER BY created_at ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ShoppingItem::try_from).collect()
    }

    async fn toggle_shopping_item(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<ShoppingItem, StoreError> {
        let row = sqlx::query_as::<_, ShoppingRow>(&format!(
            r#"
            UPDATE shopping_items SET checked = NOT checked
            WHERE id = $1 AND user_id = $2
            RETURNING {SHOPPING_COLS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;
        row.try_into()
    }

    async fn delete_shopping_item(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM shopping_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear_checked_shopping_items(&self, user_id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM shopping_items WHERE user_id = $1 AND checked")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn clear_shopping_items(&self, user_id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM shopping_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn log_recommendation(
        &self,
        new: NewRecommendationLog,
    ) -> Result<RecommendationLog, StoreError> {
        let row = sqlx::query_as::<_, LogRow>(&format!(
            r#"
            INSERT INTO recommendation_logs
                (id, user_id, context, recommended_recipes, selected_recipe_id, created_at)
            VALUES ($1, $2, $3, $4, NULL, $5)
            RETURNING {LOG_COLS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.context)
        .bind(&new.recommended_recipes)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn list_recommendation_logs(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RecommendationLog>, StoreError> {
        let rows = sqlx::query_as::<_, LogRow>(&format!(
            r#"
            SELECT {LOG_COLS} FROM recommendation_logs
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(RecommendationLog::from).collect())
    }
}
