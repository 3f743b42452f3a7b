//! Black-box tests driving the full router over an in-memory store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use time::macros::format_description;
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;

use fitmeal::{app::build_app, state::AppState};

fn test_app() -> Router {
    build_app(AppState::fake())
}

fn request(method: &str, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> Response {
    app.clone()
        .oneshot(request(method, uri, body, cookie))
        .await
        .expect("request failed")
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

/// The `auth_token=...` pair from the Set-Cookie header, ready to send back.
fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .expect("ascii cookie")
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

async fn register(app: &Router, email: &str) -> String {
    let response = send(
        app,
        "POST",
        "/api/auth/register",
        Some(json!({
            "name": "Test User",
            "email": email,
            "password": "password123"
        })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    session_cookie(&response)
}

fn date_string(offset_days: i64) -> String {
    (OffsetDateTime::now_utc().date() + Duration::days(offset_days))
        .format(&format_description!("[year]-[month]-[day]"))
        .expect("format date")
}

fn timestamp_string(offset_days: i64) -> String {
    (OffsetDateTime::now_utc() + Duration::days(offset_days))
        .format(&time::format_description::well_known::Rfc3339)
        .expect("format timestamp")
}

// --- health ---

#[tokio::test]
async fn health_reports_service_metadata() {
    let app = test_app();
    let response = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "test");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
}

// --- auth ---

#[tokio::test]
async fn register_sets_session_and_returns_public_user() {
    let app = test_app();
    let response = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({
            "name": "  Ada  ",
            "email": "Ada@Example.COM",
            "password": "password123"
        })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie")
        .to_str()
        .expect("ascii");
    assert!(set_cookie.starts_with("auth_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(!set_cookie.contains("Secure"));

    let body = json_body(response).await;
    assert_eq!(body["message"], "Registration successful");
    assert_eq!(body["user"]["name"], "Ada");
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["goal"], "healthy");
    assert_eq!(body["user"]["busyLevel"], "normal");
    assert_eq!(body["user"]["cookingLevel"], "beginner");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn register_validates_its_input() {
    let app = test_app();

    let response = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({"name": "", "email": "a@b.co", "password": "password123"})),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Name, email, and password are required");

    let response = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({"name": "Ada", "email": "not-an-email", "password": "password123"})),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid email");

    let response = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({"name": "Ada", "email": "a@b.co", "password": "short"})),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Password must be at least 8 characters");
}

#[tokio::test]
async fn duplicate_email_conflicts_case_insensitively() {
    let app = test_app();
    register(&app, "dup@example.com").await;

    let response = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({"name": "Other", "email": "DUP@example.com", "password": "password123"})),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Email already registered");
}

#[tokio::test]
async fn login_succeeds_and_rejections_stay_generic() {
    let app = test_app();
    register(&app, "login@example.com").await;

    let response = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "login@example.com", "password": "password123"})),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).len() > "auth_token=".len());
    let body = json_body(response).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], "login@example.com");

    // wrong password and unknown account read identically
    let response = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "login@example.com", "password": "wrong-password"})),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid email or password");

    let response = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "nobody@example.com", "password": "password123"})),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn me_works_with_cookie_and_bearer_header() {
    let app = test_app();
    let cookie = register(&app, "me@example.com").await;

    let response = send(&app, "GET", "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["user"]["email"], "me@example.com");

    let token = cookie.trim_start_matches("auth_token=").to_string();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let app = test_app();
    for uri in ["/api/workouts", "/api/inventory", "/api/meals", "/api/shopping", "/api/user/data"] {
        let response = send(&app, "GET", uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let body = json_body(response).await;
        assert_eq!(body["error"], "Authentication required");
    }
}

#[tokio::test]
async fn logout_clears_the_cookie_unconditionally() {
    let app = test_app();
    let response = send(&app, "POST", "/api/auth/logout", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie")
        .to_str()
        .expect("ascii");
    assert!(set_cookie.starts_with("auth_token=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    let body = json_body(response).await;
    assert_eq!(body["message"], "Logout successful");
}

#[tokio::test]
async fn profile_update_changes_only_sent_fields() {
    let app = test_app();
    let cookie = register(&app, "profile@example.com").await;

    let response = send(
        &app,
        "PUT",
        "/api/auth/me",
        Some(json!({"goal": "muscle_gain", "cookingLevel": "expert"})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["user"]["goal"], "muscle_gain");
    assert_eq!(body["user"]["cookingLevel"], "expert");
    assert_eq!(body["user"]["name"], "Test User");
    assert_eq!(body["user"]["busyLevel"], "normal");

    let response = send(
        &app,
        "PUT",
        "/api/auth/me",
        Some(json!({"goal": "world-domination"})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// --- workouts ---

#[tokio::test]
async fn workout_calories_are_derived_server_side() {
    let app = test_app();
    let cookie = register(&app, "hiit@example.com").await;

    let response = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({
            "type": "hiit",
            "duration": 25,
            "intensity": "high",
            "caloriesBurned": 1
        })),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    // 12 kcal/min * 25 min * 1.3
    assert_eq!(body["workout"]["caloriesBurned"], 390);
    assert_eq!(body["workout"]["type"], "hiit");
}

#[tokio::test]
async fn workout_validation_rejects_bad_duration_and_type() {
    let app = test_app();
    let cookie = register(&app, "validate@example.com").await;

    let response = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"type": "hiit", "duration": 0, "intensity": "high"})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Duration must be at least 1 minute");

    let response = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"type": "parkour", "duration": 30, "intensity": "high"})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn workout_stats_combine_streak_and_totals() {
    let app = test_app();
    let cookie = register(&app, "stats@example.com").await;

    send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({
            "type": "strength",
            "duration": 30,
            "intensity": "medium",
            "workoutDate": date_string(0)
        })),
        Some(&cookie),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({
            "type": "hiit",
            "duration": 25,
            "intensity": "high",
            "workoutDate": date_string(-1)
        })),
        Some(&cookie),
    )
    .await;

    let response = send(&app, "GET", "/api/workouts/stats", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["streak"], 2);
    assert_eq!(body["totalWorkouts"], 2);
    assert_eq!(body["totalCaloriesBurned"], 150 + 390);
    assert_eq!(body["totalDuration"], 55);
}

#[tokio::test]
async fn workout_update_recomputes_calories() {
    let app = test_app();
    let cookie = register(&app, "update@example.com").await;

    let response = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"type": "strength", "duration": 30, "intensity": "medium"})),
        Some(&cookie),
    )
    .await;
    let body = json_body(response).await;
    assert_eq!(body["workout"]["caloriesBurned"], 150);
    let id = body["workout"]["id"].as_str().expect("id").to_string();

    let response = send(
        &app,
        "PUT",
        &format!("/api/workouts/{id}"),
        Some(json!({"duration": 60})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["workout"]["caloriesBurned"], 300);
    assert_eq!(body["workout"]["intensity"], "medium");
}

#[tokio::test]
async fn deleted_workout_stays_gone() {
    let app = test_app();
    let cookie = register(&app, "gone@example.com").await;

    let response = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"type": "yoga", "duration": 45, "intensity": "low"})),
        Some(&cookie),
    )
    .await;
    let body = json_body(response).await;
    let id = body["workout"]["id"].as_str().expect("id").to_string();

    let response = send(&app, "DELETE", &format!("/api/workouts/{id}"), None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Workout deleted");

    let response = send(&app, "GET", &format!("/api/workouts/{id}"), None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = send(&app, "DELETE", &format!("/api/workouts/{id}"), None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// --- inventory ---

async fn add_inventory_item(app: &Router, cookie: &str, quantity: i32, expires_days: i64) -> Value {
    let response = send(
        app,
        "POST",
        "/api/inventory",
        Some(json!({
            "name": "Chicken Rice Box",
            "quantity": quantity,
            "unit": "portion",
            "category": "complete-meal",
            "expiresAt": timestamp_string(expires_days)
        })),
        Some(cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

#[tokio::test]
async fn inventory_items_carry_freshness_fields() {
    let app = test_app();
    let cookie = register(&app, "fresh@example.com").await;
    add_inventory_item(&app, &cookie, 4, 2).await;

    let response = send(&app, "GET", "/api/inventory", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let item = &body["inventory"][0];
    assert_eq!(item["daysLeft"], 2);
    assert_eq!(item["isExpiringSoon"], true);
    assert_eq!(item["isExpired"], false);
}

#[tokio::test]
async fn inventory_rejects_inverted_dates() {
    let app = test_app();
    let cookie = register(&app, "inverted@example.com").await;

    let response = send(
        &app,
        "POST",
        "/api/inventory",
        Some(json!({
            "name": "Mystery Box",
            "quantity": 1,
            "unit": "portion",
            "category": "snack",
            "preparedAt": timestamp_string(0),
            "expiresAt": timestamp_string(-1)
        })),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "expiresAt must be after preparedAt");
}

#[tokio::test]
async fn consume_decrements_then_removes_at_zero() {
    let app = test_app();
    let cookie = register(&app, "consume@example.com").await;
    let body = add_inventory_item(&app, &cookie, 3, 5).await;
    let id = body["item"]["id"].as_str().expect("id").to_string();

    let response = send(
        &app,
        "POST",
        &format!("/api/inventory/{id}/consume"),
        Some(json!({"portions": 2})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Consumed 2 portion(s)");
    assert_eq!(body["consumed"], 2);
    assert_eq!(body["remaining"], 1);
    assert_eq!(body["item"]["quantity"], 1);

    // no body defaults to one portion, which empties and deletes the row
    let response = send(
        &app,
        "POST",
        &format!("/api/inventory/{id}/consume"),
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "All portions consumed, item removed from inventory");
    assert_eq!(body["remaining"], 0);
    assert!(body.get("item").is_none());

    let response = send(&app, "GET", &format!("/api/inventory/{id}"), None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn consume_rejects_more_than_available() {
    let app = test_app();
    let cookie = register(&app, "greedy@example.com").await;
    let body = add_inventory_item(&app, &cookie, 3, 5).await;
    let id = body["item"]["id"].as_str().expect("id").to_string();

    let response = send(
        &app,
        "POST",
        &format!("/api/inventory/{id}/consume"),
        Some(json!({"portions": 5})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Only 3 portion(s) available");

    let response = send(
        &app,
        "POST",
        &format!("/api/inventory/{id}/consume"),
        Some(json!({"portions": 0})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Portions must be at least 1");
}

#[tokio::test]
async fn expiry_views_split_expiring_and_expired() {
    let app = test_app();
    let cookie = register(&app, "expiry@example.com").await;
    add_inventory_item(&app, &cookie, 2, 2).await;

    // already past its date
    let response = send(
        &app,
        "POST",
        "/api/inventory",
        Some(json!({
            "name": "Forgotten Curry",
            "quantity": 1,
            "unit": "portion",
            "category": "complete-meal",
            "preparedAt": timestamp_string(-3),
            "expiresAt": timestamp_string(-1)
        })),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/api/inventory/expiring", None, Some(&cookie)).await;
    let body = json_body(response).await;
    assert_eq!(body["inventory"].as_array().expect("array").len(), 1);
    assert_eq!(body["inventory"][0]["name"], "Chicken Rice Box");

    let response = send(&app, "GET", "/api/inventory/expired", None, Some(&cookie)).await;
    let body = json_body(response).await;
    assert_eq!(body["inventory"].as_array().expect("array").len(), 1);
    assert_eq!(body["inventory"][0]["name"], "Forgotten Curry");
    assert_eq!(body["inventory"][0]["isExpired"], true);

    // the default list hides expired rows unless asked
    let response = send(&app, "GET", "/api/inventory", None, Some(&cookie)).await;
    let body = json_body(response).await;
    assert_eq!(body["inventory"].as_array().expect("array").len(), 1);
    let response = send(
        &app,
        "GET",
        "/api/inventory?includeExpired=true",
        None,
        Some(&cookie),
    )
    .await;
    let body = json_body(response).await;
    assert_eq!(body["inventory"].as_array().expect("array").len(), 2);
}

// --- meals ---

#[tokio::test]
async fn meals_require_type_and_date() {
    let app = test_app();
    let cookie = register(&app, "mealtype@example.com").await;

    let response = send(
        &app,
        "POST",
        "/api/meals",
        Some(json!({"name": "Lunch bowl"})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "MealType and mealDate are required");
}

#[tokio::test]
async fn daily_totals_only_for_exact_date_queries() {
    let app = test_app();
    let cookie = register(&app, "totals@example.com").await;
    let today = date_string(0);

    for (meal_type, calories, protein, carbs, fat) in
        [("breakfast", 450, 30, 40, 15), ("dinner", 600, 25, 70, 20)]
    {
        let response = send(
            &app,
            "POST",
            "/api/meals",
            Some(json!({
                "mealType": meal_type,
                "mealDate": today,
                "nutrition": {"calories": calories, "protein": protein, "carbs": carbs, "fat": fat}
            })),
            Some(&cookie),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    // different day, kept out of today's totals
    send(
        &app,
        "POST",
        "/api/meals",
        Some(json!({"mealType": "snack", "mealDate": date_string(-1)})),
        Some(&cookie),
    )
    .await;

    let response = send(&app, "GET", &format!("/api/meals?date={today}"), None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["meals"].as_array().expect("array").len(), 2);
    assert_eq!(body["dailyTotals"]["totalCalories"], 1050);
    assert_eq!(body["dailyTotals"]["totalProtein"], 55);
    assert_eq!(body["dailyTotals"]["totalCarbs"], 110);
    assert_eq!(body["dailyTotals"]["totalFat"], 35);

    let response = send(&app, "GET", "/api/meals", None, Some(&cookie)).await;
    let body = json_body(response).await;
    assert_eq!(body["meals"].as_array().expect("array").len(), 3);
    assert!(body["dailyTotals"].is_null());
}

#[tokio::test]
async fn meal_names_default_from_the_meal_type() {
    let app = test_app();
    let cookie = register(&app, "mealname@example.com").await;

    let response = send(
        &app,
        "POST",
        "/api/meals",
        Some(json!({"mealType": "breakfast", "mealDate": date_string(0)})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["meal"]["name"], "Breakfast");
    assert_eq!(body["meal"]["source"], "homemade");
}

// --- recipes ---

#[tokio::test]
async fn recipe_catalog_is_public_and_paginated() {
    let app = test_app();

    let response = send(&app, "GET", "/api/recipes", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total"], 10);
    assert_eq!(body["recipes"].as_array().expect("array").len(), 10);

    let response = send(&app, "GET", "/api/recipes?limit=3&offset=9", None, None).await;
    let body = json_body(response).await;
    assert_eq!(body["total"], 10);
    assert_eq!(body["limit"], 3);
    assert_eq!(body["offset"], 9);
    assert_eq!(body["recipes"].as_array().expect("array").len(), 1);

    let response = send(&app, "GET", "/api/recipes?difficulty=advanced", None, None).await;
    let body = json_body(response).await;
    for recipe in body["recipes"].as_array().expect("array") {
        assert_eq!(recipe["difficulty"], "advanced");
    }

    let response = send(&app, "GET", "/api/recipes?search=tuna", None, None).await;
    let body = json_body(response).await;
    assert_eq!(body["recipes"][0]["title"], "Five-Minute Tuna Wrap");
}

#[tokio::test]
async fn recipe_details_include_ingredients_and_steps() {
    let app = test_app();

    let response = send(&app, "GET", "/api/recipes?search=paella", None, None).await;
    let body = json_body(response).await;
    let id = body["recipes"][0]["id"].as_str().expect("id").to_string();

    let response = send(&app, "GET", &format!("/api/recipes/{id}"), None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["recipe"]["title"], "Weekend Paella");
    assert!(!body["recipe"]["ingredients"].as_array().expect("array").is_empty());
    assert!(!body["recipe"]["steps"].as_array().expect("array").is_empty());

    let response = send(
        &app,
        "GET",
        &format!("/api/recipes/{}", uuid::Uuid::new_v4()),
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// --- recommendations ---

#[tokio::test]
async fn busy_recommendations_fit_the_rule() {
    let app = test_app();

    let response = send(
        &app,
        "POST",
        "/api/recommend",
        Some(json!({"context": "busy"})),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["context"], "busy");
    assert!(body["disclaimer"].is_string());
    let recipes = body["recipes"].as_array().expect("array");
    assert!(!recipes.is_empty());
    for recipe in recipes {
        assert!(recipe["cookTime"].as_i64().expect("cookTime") <= 15);
        assert_eq!(recipe["difficulty"], "beginner");
    }
}

#[tokio::test]
async fn recommendations_require_a_context() {
    let app = test_app();
    let response = send(&app, "POST", "/api/recommend", Some(json!({})), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Context is required");
}

#[tokio::test]
async fn unknown_contexts_still_recommend() {
    let app = test_app();
    let response = send(
        &app,
        "POST",
        "/api/recommend",
        Some(json!({"context": "rainy_tuesday", "limit": 3})),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["recipes"].as_array().expect("array").len(), 3);
}

// --- shopping ---

#[tokio::test]
async fn manual_shopping_items_get_categorized() {
    let app = test_app();
    let cookie = register(&app, "shopper@example.com").await;

    let response = send(
        &app,
        "POST",
        "/api/shopping",
        Some(json!({"name": "black pepper", "amount": "1 jar"})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["item"]["category"], "seasoning");
    assert_eq!(body["item"]["checked"], false);

    let response = send(
        &app,
        "POST",
        "/api/shopping",
        Some(json!({"name": "bell pepper", "amount": "2"})),
        Some(&cookie),
    )
    .await;
    let body = json_body(response).await;
    assert_eq!(body["item"]["category"], "vegetable");

    // an explicit category wins over inference
    let response = send(
        &app,
        "POST",
        "/api/shopping",
        Some(json!({"name": "chicken stock", "category": "staple"})),
        Some(&cookie),
    )
    .await;
    let body = json_body(response).await;
    assert_eq!(body["item"]["category"], "staple");

    let response = send(
        &app,
        "POST",
        "/api/shopping",
        Some(json!({"name": "   "})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn from_recipe_dedups_against_unchecked_items() {
    let app = test_app();
    let cookie = register(&app, "prepper@example.com").await;

    let response = send(&app, "GET", "/api/recipes?search=tuna", None, None).await;
    let body = json_body(response).await;
    let recipe_id = body["recipes"][0]["id"].as_str().expect("id").to_string();

    let response = send(
        &app,
        "POST",
        "/api/shopping/from-recipe",
        Some(json!({"recipeId": recipe_id})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let added = body["added"].as_array().expect("array").len();
    assert!(added > 0);
    assert_eq!(body["skipped"], 0);
    let first_id = body["added"][0]["id"].as_str().expect("id").to_string();
    assert_eq!(body["added"][0]["recipeName"], "Five-Minute Tuna Wrap");

    // same recipe again: everything is already on the list unchecked
    let response = send(
        &app,
        "POST",
        "/api/shopping/from-recipe",
        Some(json!({"recipeId": recipe_id})),
        Some(&cookie),
    )
    .await;
    let body = json_body(response).await;
    assert_eq!(body["added"].as_array().expect("array").len(), 0);
    assert_eq!(body["skipped"], added);

    // checking one off frees its name for re-adding
    let response = send(
        &app,
        "POST",
        &format!("/api/shopping/{first_id}/toggle"),
        None,
        Some(&cookie),
    )
    .await;
    let body = json_body(response).await;
    assert_eq!(body["item"]["checked"], true);

    let response = send(
        &app,
        "POST",
        "/api/shopping/from-recipe",
        Some(json!({"recipeId": recipe_id})),
        Some(&cookie),
    )
    .await;
    let body = json_body(response).await;
    assert_eq!(body["added"].as_array().expect("array").len(), 1);
    assert_eq!(body["skipped"], added - 1);

    let response = send(&app, "DELETE", "/api/shopping/checked", None, Some(&cookie)).await;
    let body = json_body(response).await;
    assert_eq!(body["removed"], 1);

    let response = send(&app, "GET", "/api/shopping", None, Some(&cookie)).await;
    let body = json_body(response).await;
    let items = body["items"].as_array().expect("array");
    assert_eq!(items.len(), added);
    assert!(items.iter().all(|item| item["checked"] == false));

    let response = send(&app, "DELETE", "/api/shopping", None, Some(&cookie)).await;
    let body = json_body(response).await;
    assert_eq!(body["removed"], added as i64);
}

// --- export & delete ---

#[tokio::test]
async fn export_bundles_every_owned_record() {
    let app = test_app();
    let cookie = register(&app, "export@example.com").await;

    send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"type": "running", "duration": 20, "intensity": "medium"})),
        Some(&cookie),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/meals",
        Some(json!({"mealType": "lunch", "mealDate": date_string(0)})),
        Some(&cookie),
    )
    .await;
    add_inventory_item(&app, &cookie, 1, 4).await;
    send(
        &app,
        "POST",
        "/api/shopping",
        Some(json!({"name": "rolled oats"})),
        Some(&cookie),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/recommend",
        Some(json!({"context": "post_workout"})),
        Some(&cookie),
    )
    .await;
    // anonymous requests leave no trace in the export
    send(
        &app,
        "POST",
        "/api/recommend",
        Some(json!({"context": "busy"})),
        None,
    )
    .await;

    let response = send(&app, "GET", "/api/user/data", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .expect("content-disposition")
        .to_str()
        .expect("ascii");
    assert!(disposition.starts_with("attachment; filename=\"fitmeal-data-"));

    let body = json_body(response).await;
    assert!(body["exportedAt"].is_string());
    assert_eq!(body["user"]["email"], "export@example.com");
    assert_eq!(body["workouts"].as_array().expect("array").len(), 1);
    assert_eq!(body["meals"].as_array().expect("array").len(), 1);
    assert_eq!(body["inventory"].as_array().expect("array").len(), 1);
    assert_eq!(body["shoppingItems"].as_array().expect("array").len(), 1);
    let recommendations = body["recommendations"].as_array().expect("array");
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["context"], "post_workout");
    assert!(recommendations[0]["selectedRecipeId"].is_null());
}

#[tokio::test]
async fn deleting_user_data_cascades_and_ends_the_session() {
    let app = test_app();
    let cookie = register(&app, "leaver@example.com").await;
    send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"type": "cycling", "duration": 40, "intensity": "low"})),
        Some(&cookie),
    )
    .await;

    let response = send(&app, "DELETE", "/api/user/data", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie")
        .to_str()
        .expect("ascii");
    assert!(set_cookie.contains("Max-Age=0"));
    let body = json_body(response).await;
    assert_eq!(body["message"], "All user data has been deleted");
    assert!(body["deletedAt"].is_string());

    // the token may still parse, but the account is gone
    let response = send(&app, "GET", "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "leaver@example.com", "password": "password123"})),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
