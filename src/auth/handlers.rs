use axum::{
    extract::{FromRef, State},
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, RegisterRequest, SessionResponse, UpdateProfileRequest, UserResponse,
        },
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
        services::{clear_session_cookie, is_valid_email, session_cookie},
    },
    error::ApiError,
    models::{BusyLevel, CookingLevel, Goal, NewUser, ProfileUpdate},
    state::AppState,
    store::StoreError,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(get_me).put(update_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    payload.name = payload.name.trim().to_string();

    if payload.name.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request(
            "Name, email, and password are required",
        ));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::bad_request("Invalid email"));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::bad_request(
            "Password must be at least 8 characters",
        ));
    }

    let goal: Goal = match payload.goal.as_deref() {
        Some(raw) => raw.parse().map_err(ApiError::BadRequest)?,
        None => Goal::Healthy,
    };
    let busy_level: BusyLevel = match payload.busy_level.as_deref() {
        Some(raw) => raw.parse().map_err(ApiError::BadRequest)?,
        None => BusyLevel::Normal,
    };
    let cooking_level: CookingLevel = match payload.cooking_level.as_deref() {
        Some(raw) => raw.parse().map_err(ApiError::BadRequest)?,
        None => CookingLevel::Beginner,
    };

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err(ApiError::Internal(e));
        }
    };

    let user = match state
        .store
        .create_user(NewUser {
            email: payload.email,
            name: payload.name,
            password_hash,
            goal,
            busy_level,
            cooking_level,
        })
        .await
    {
        Ok(u) => u,
        Err(StoreError::DuplicateEmail) => {
            warn!("email already registered");
            return Err(ApiError::conflict("Email already registered"));
        }
        Err(e) => return Err(e.into()),
    };

    let keys = JwtKeys::from_ref(&state);
    let token = match keys.sign_session(user.id, &user.email) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "session token signing failed");
            return Err(ApiError::Internal(e));
        }
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    let cookie = session_cookie(&token, keys.max_age_secs(), state.config.is_production());
    Ok((
        StatusCode::CREATED,
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(SessionResponse {
            user: user.into(),
            message: "Registration successful".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    // a generic 401 for both unknown email and bad password
    let user = match state.store.find_user_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::unauthorized("Invalid email or password"));
        }
        Err(e) => return Err(e.into()),
    };

    let ok = match verify_password(&payload.password, &user.password_hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "verify_password failed");
            return Err(ApiError::Internal(e));
        }
    };
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = match keys.sign_session(user.id, &user.email) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "session token signing failed");
            return Err(ApiError::Internal(e));
        }
    };

    info!(user_id = %user.id, email = %user.email, "user logged in");
    let cookie = session_cookie(&token, keys.max_age_secs(), state.config.is_production());
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(SessionResponse {
            user: user.into(),
            message: "Login successful".into(),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = clear_session_cookie(state.config.is_production());
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(json!({ "message": "Logout successful" })),
    )
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .store
        .find_user(user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(UserResponse { user: user.into() }))
}

#[instrument(skip(state, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let name = match payload.name {
        Some(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ApiError::bad_request("Name cannot be empty"));
            }
            Some(name)
        }
        None => None,
    };

    let update = ProfileUpdate {
        name,
        goal: payload
            .goal
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ApiError::BadRequest)?,
        busy_level: payload
            .busy_level
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ApiError::BadRequest)?,
        cooking_level: payload
            .cooking_level
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ApiError::BadRequest)?,
    };

    let updated = match state.store.update_profile(user.id, update).await {
        Ok(u) => u,
        Err(StoreError::NotFound) => return Err(ApiError::not_found("User not found")),
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %updated.id, "profile updated");
    Ok(Json(UserResponse {
        user: updated.into(),
    }))
}
