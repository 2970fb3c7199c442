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
    models::{ClothingAttributes, ClothingItem},
    routes::AppState,
    services::wardrobe,
};

pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<ClothingItem>>> {
    Ok(Json(wardrobe::list_items(state.clothing.as_ref(), user.id).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(attributes): Json<ClothingAttributes>,
) -> AppResult<(StatusCode, Json<ClothingItem>)> {
    let item = wardrobe::create_item(state.clothing.as_ref(), user.id, attributes).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ClothingItem>> {
    Ok(Json(wardrobe::get_item(state.clothing.as_ref(), user.id, id).await?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(attributes): Json<ClothingAttributes>,
) -> AppResult<Json<ClothingItem>> {
    let item = wardrobe::update_item(state.clothing.as_ref(), user.id, id, attributes).await?;
    Ok(Json(item))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    wardrobe::delete_item(state.clothing.as_ref(), user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
