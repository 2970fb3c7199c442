use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::OutfitPost,
    routes::AppState,
    services::outfits::{self, CreateOutfitPostRequest},
};

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<OutfitPost>>> {
    Ok(Json(outfits::list_posts(state.outfit_posts.as_ref()).await?))
}

pub async fn list_mine(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<OutfitPost>>> {
    let posts = outfits::list_user_posts(state.outfit_posts.as_ref(), user.id).await?;
    Ok(Json(posts))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateOutfitPostRequest>,
) -> AppResult<(StatusCode, Json<OutfitPost>)> {
    let post = outfits::create_post(state.outfit_posts.as_ref(), &user, request).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OutfitPost>> {
    Ok(Json(outfits::get_post(state.outfit_posts.as_ref(), id).await?))
}

pub async fn like(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OutfitPost>> {
    Ok(Json(outfits::like_post(state.outfit_posts.as_ref(), id, user.id).await?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    outfits::delete_post(state.outfit_posts.as_ref(), id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
