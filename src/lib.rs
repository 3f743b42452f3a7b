//! FitMeal: a diet and fitness tracking backend. Workout logging with
//! derived calories, a meal-prep inventory with expiry views, a seeded
//! recipe catalog, context-based recommendations, a shopping list, and
//! cookie-session auth, all under `/api`.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod health;
pub mod inventory;
pub mod meals;
pub mod models;
pub mod recipes;
pub mod recommend;
pub mod shopping;
pub mod state;
pub mod store;
pub mod users;
pub mod workouts;
