//! In-memory store. Selected at startup when no `DATABASE_URL` is
//! configured; also backs the black-box API tests. All state lives behind
//! one mutex, so read-check-write sequences (consume) are atomic.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{fixtures, ConsumeOutcome, MealQuery, RecipeQuery, Store, StoreError};
use crate::models::{
    InventoryItem, InventoryUpdate, Meal, NewInventoryItem, NewMeal, NewRecommendationLog,
    NewShoppingItem, NewUser, NewWorkout, ProfileUpdate, Recipe, RecipeDetails, RecipeIngredient,
    RecipeStep, RecommendationLog, ShoppingItem, User, Workout, WorkoutUpdate,
};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    workouts: Vec<Workout>,
    inventory: Vec<InventoryItem>,
    meals: Vec<Meal>,
    recipes: Vec<Recipe>,
    ingredients: Vec<RecipeIngredient>,
    steps: Vec<RecipeStep>,
    shopping: Vec<ShoppingItem>,
    logs: Vec<RecommendationLog>,
}

pub struct MemStore {
    inner: Mutex<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Empty per-user state with the built-in recipe catalog loaded.
    pub fn with_fixtures() -> Self {
        let store = Self::new();
        {
            let mut inner = store
                .inner
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            for seed in fixtures::recipe_catalog() {
                inner.recipes.push(seed.recipe);
                inner.ingredients.extend(seed.ingredients);
                inner.steps.extend(seed.steps);
            }
        }
        store
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Database("store lock poisoned".into()))
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut inner = self.lock()?;
        if inner.users.iter().any(|u| u.email == new.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new.email,
            name: new.name,
            password_hash: new.password_hash,
            goal: new.goal,
            busy_level: new.busy_level,
            cooking_level: new.cooking_level,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<User, StoreError> {
        let mut inner = self.lock()?;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(goal) = update.goal {
            user.goal = goal;
        }
        if let Some(busy) = update.busy_level {
            user.busy_level = busy;
        }
        if let Some(cooking) = update.cooking_level {
            user.cooking_level = cooking;
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.users.retain(|u| u.id != id);
        inner.workouts.retain(|w| w.user_id != id);
        inner.inventory.retain(|i| i.user_id != id);
        inner.meals.retain(|m| m.user_id != id);
        inner.shopping.retain(|s| s.user_id != id);
        inner.logs.retain(|l| l.user_id != id);
        Ok(())
    }

    async fn create_workout(&self, new: NewWorkout) -> Result<Workout, StoreError> {
        let mut inner = self.lock()?;
        let workout = Workout {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            workout_type: new.workout_type,
            duration: new.duration,
            intensity: new.intensity,
            calories_burned: new.calories_burned,
            workout_date: new.workout_date,
            name: new.name,
            notes: new.notes,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.workouts.push(workout.clone());
        Ok(workout)
    }

    async fn list_workouts(
        &self,
        user_id: Uuid,
        since: Option<time::Date>,
    ) -> Result<Vec<Workout>, StoreError> {
        let inner = self.lock()?;
        let mut workouts: Vec<Workout> = inner
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id)
            .filter(|w| since.map_or(true, |d| w.workout_date >= d))
            .cloned()
            .collect();
        workouts.sort_by(|a, b| {
            b.workout_date
                .cmp(&a.workout_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(workouts)
    }

    async fn get_workout(&self, user_id: Uuid, id: Uuid) -> Result<Workout, StoreError> {
        let inner = self.lock()?;
        inner
            .workouts
            .iter()
            .find(|w| w.id == id && w.user_id == user_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_workout(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: WorkoutUpdate,
    ) -> Result<Workout, StoreError> {
        let mut inner = self.lock()?;
        let workout = inner
            .workouts
            .iter_mut()
            .find(|w| w.id == id && w.user_id == user_id)
            .ok_or(StoreError::NotFound)?;
        workout.workout_type = update.workout_type;
        workout.duration = update.duration;
        workout.intensity = update.intensity;
        workout.calories_burned = update.calories_burned;
        workout.workout_date = update.workout_date;
        workout.name = update.name;
        workout.notes = update.notes;
        Ok(workout.clone())
    }

    async fn delete_workout(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        let before = inner.workouts.len();
        inner
            .workouts
            .retain(|w| !(w.id == id && w.user_id == user_id));
        Ok(inner.workouts.len() < before)
    }

    async fn create_inventory_item(
        &self,
        new: NewInventoryItem,
    ) -> Result<InventoryItem, StoreError> {
        let mut inner = self.lock()?;
        let item = InventoryItem {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            name: new.name,
            quantity: new.quantity,
            unit: new.unit,
            category: new.category,
            prepared_at: new.prepared_at,
            expires_at: new.expires_at,
            nutrition: new.nutrition,
            recipe_id: new.recipe_id,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.inventory.push(item.clone());
        Ok(item)
    }

    async fn list_inventory(&self, user_id: Uuid) -> Result<Vec<InventoryItem>, StoreError> {
        let inner = self.lock()?;
        let mut items: Vec<InventoryItem> = inner
            .inventory
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.expires_at.cmp(&b.expires_at));
        Ok(items)
    }

    async fn get_inventory_item(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<InventoryItem, StoreError> {
        let inner = self.lock()?;
        inner
            .inventory
            .iter()
            .find(|i| i.id == id && i.user_id == user_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_inventory_item(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: InventoryUpdate,
    ) -> Result<InventoryItem, StoreError> {
        let mut inner = self.lock()?;
        let item = inner
            .inventory
            .iter_mut()
            .find(|i| i.id == id && i.user_id == user_id)
            .ok_or(StoreError::NotFound)?;
        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(quantity) = update.quantity {
            // absolute set, clamped so the ledger never goes negative
            item.quantity = quantity.max(0);
        }
        if let Some(unit) = update.unit {
            item.unit = unit;
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(expires_at) = update.expires_at {
            item.expires_at = expires_at;
        }
        Ok(item.clone())
    }

    async fn delete_inventory_item(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        let before = inner.inventory.len();
        inner
            .inventory
            .retain(|i| !(i.id == id && i.user_id == user_id));
        Ok(inner.inventory.len() < before)
    }

    async fn consume_inventory_item(
        &self,
        user_id: Uuid,
        id: Uuid,
        portions: i32,
    ) -> Result<ConsumeOutcome, StoreError> {
        let mut inner = self.lock()?;
        let idx = inner
            .inventory
            .iter()
            .position(|i| i.id == id && i.user_id == user_id)
            .ok_or(StoreError::NotFound)?;
        let available = inner.inventory[idx].quantity;
        if portions > available {
            return Err(StoreError::InsufficientQuantity { available });
        }
        let remaining = available - portions;
        if remaining == 0 {
            inner.inventory.remove(idx);
            Ok(ConsumeOutcome {
                consumed: portions,
                remaining: 0,
                removed: true,
                item: None,
            })
        } else {
            inner.inventory[idx].quantity = remaining;
            Ok(ConsumeOutcome {
                consumed: portions,
                remaining,
                removed: false,
                item: Some(inner.inventory[idx].clone()),
            })
        }
    }

    async fn create_meal(&self, new: NewMeal) -> Result<Meal, StoreError> {
        let mut inner = self.lock()?;
        let meal = Meal {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            name: new.name,
            meal_type: new.meal_type,
            source: new.source,
            meal_date: new.meal_date,
            nutrition: new.nutrition,
            recipe_id: new.recipe_id,
            notes: new.notes,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.meals.push(meal.clone());
        Ok(meal)
    }

    async fn list_meals(&self, user_id: Uuid, query: MealQuery) -> Result<Vec<Meal>, StoreError> {
        let inner = self.lock()?;
        let mut meals: Vec<Meal> = inner
            .meals
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter(|m| query.date.map_or(true, |d| m.meal_date == d))
            .filter(|m| query.start_date.map_or(true, |d| m.meal_date >= d))
            .filter(|m| query.end_date.map_or(true, |d| m.meal_date <= d))
            .cloned()
            .collect();
        meals.sort_by(|a, b| {
            b.meal_date
                .cmp(&a.meal_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        if let Some(limit) = query.limit {
            meals.truncate(limit.max(0) as usize);
        }
        Ok(meals)
    }

    async fn list_recipes(&self, query: RecipeQuery) -> Result<(Vec<Recipe>, i64), StoreError> {
        let inner = self.lock()?;
        let needle = query.search.as_deref().map(str::to_lowercase);
        let mut matched: Vec<Recipe> = inner
            .recipes
            .iter()
            .filter(|r| {
                needle.as_deref().map_or(true, |n| {
                    r.title.to_lowercase().contains(n) || r.description.to_lowercase().contains(n)
                })
            })
            .filter(|r| query.difficulty.map_or(true, |d| r.difficulty == d))
            .filter(|r| query.prep_friendly.map_or(true, |p| r.prep_friendly == p))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.title.cmp(&b.title));
        let total = matched.len() as i64;
        let page: Vec<Recipe> = matched
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn get_recipe(&self, id: Uuid) -> Result<RecipeDetails, StoreError> {
        let inner = self.lock()?;
        let recipe = inner
            .recipes
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)?;
        let mut ingredients: Vec<RecipeIngredient> = inner
            .ingredients
            .iter()
            .filter(|i| i.recipe_id == id)
            .cloned()
            .collect();
        ingredients.sort_by_key(|i| i.sort_order);
        let mut steps: Vec<RecipeStep> = inner
            .steps
            .iter()
            .filter(|s| s.recipe_id == id)
            .cloned()
            .collect();
        steps.sort_by_key(|s| s.step_order);
        Ok(RecipeDetails {
            recipe,
            ingredients,
            steps,
        })
    }

    async fn all_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        let inner = self.lock()?;
        let mut recipes = inner.recipes.clone();
        recipes.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(recipes)
    }

    async fn create_shopping_items(
        &self,
        items: Vec<NewShoppingItem>,
    ) -> Result<Vec<ShoppingItem>, StoreError> {
        let mut inner = self.lock()?;
        let mut created = Vec::with_capacity(items.len());
        for new in items {
            let item = ShoppingItem {
                id: Uuid::new_v4(),
                user_id: new.user_id,
                name: new.name,
                amount: new.amount,
                category: new.category,
                checked: false,
                recipe_id: new.recipe_id,
                recipe_name: new.recipe_name,
                created_at: OffsetDateTime::now_utc(),
            };
            inner.shopping.push(item.clone());
            created.push(item);
        }
        Ok(created)
    }

    async fn list_shopping_items(&self, user_id: Uuid) -> Result<Vec<ShoppingItem>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .shopping
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn toggle_shopping_item(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<ShoppingItem, StoreError> {
        let mut inner = self.lock()?;
        let item = inner
            .shopping
            .iter_mut()
            .find(|i| i.id == id && i.user_id == user_id)
            .ok_or(StoreError::NotFound)?;
        item.checked = !item.checked;
        Ok(item.clone())
    }

    async fn delete_shopping_item(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        let before = inner.shopping.len();
        inner
            .shopping
            .retain(|i| !(i.id == id && i.user_id == user_id));
        Ok(inner.shopping.len() < before)
    }

    async fn clear_checked_shopping_items(&self, user_id: Uuid) -> Result<u64, StoreError> {
        let mut inner = self.lock()?;
        let before = inner.shopping.len();
        inner
            .shopping
            .retain(|i| !(i.user_id == user_id && i.checked));
        Ok((before - inner.shopping.len()) as u64)
    }

    async fn clear_shopping_items(&self, user_id: Uuid) -> Result<u64, StoreError> {
        let mut inner = self.lock()?;
        let before = inner.shopping.len();
        inner.shopping.retain(|i| i.user_id != user_id);
        Ok((before - inner.shopping.len()) as u64)
    }

    async fn log_recommendation(
        &self,
        new: NewRecommendationLog,
    ) -> Result<RecommendationLog, StoreError> {
        let mut inner = self.lock()?;
        let log = RecommendationLog {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            context: new.context,
            recommended_recipes: new.recommended_recipes,
            selected_recipe_id: None,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.logs.push(log.clone());
        Ok(log)
    }

    async fn list_recommendation_logs(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RecommendationLog>, StoreError> {
        let inner = self.lock()?;
        let mut logs: Vec<RecommendationLog> = inner
            .logs
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(logs)
    }
}
