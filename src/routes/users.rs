use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::User,
    routes::AppState,
    services::auth::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest},
};

/// `POST /api/register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let response = state.auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `POST /api/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    Ok(Json(state.auth.login(request).await?))
}

/// `GET /api/profile`
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<User>> {
    Ok(Json(state.auth.get_profile(user.id).await?))
}

/// `PUT /api/profile`
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> AppResult<Json<User>> {
    Ok(Json(state.auth.update_profile(user.id, request).await?))
}
