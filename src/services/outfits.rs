use std::collections::HashSet;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    db::OutfitPostRepository,
    error::{AppError, AppResult},
    models::{OutfitPost, User},
};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOutfitPostRequest {
    pub items: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Publishes an outfit under `author`'s name
pub async fn create_post(
    repo: &dyn OutfitPostRepository,
    author: &User,
    request: CreateOutfitPostRequest,
) -> AppResult<OutfitPost> {
    let post = OutfitPost {
        id: Uuid::new_v4(),
        user_id: author.id,
        user_name: author.name.clone(),
        items: request
            .items
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect(),
        description: request.description.trim().to_string(),
        tags: request
            .tags
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect(),
        temperature: request.temperature,
        location: non_blank(request.location),
        image_url: non_blank(request.image_url),
        likes: 0,
        liked_by: HashSet::new(),
        created_at: Utc::now(),
    };
    post.validate()?;

    let post = repo.create(post).await?;
    tracing::info!(user_id = %author.id, post_id = %post.id, "Outfit post created");
    Ok(post)
}

/// Every post, newest first
pub async fn list_posts(repo: &dyn OutfitPostRepository) -> AppResult<Vec<OutfitPost>> {
    repo.list_all().await
}

pub async fn list_user_posts(
    repo: &dyn OutfitPostRepository,
    user_id: Uuid,
) -> AppResult<Vec<OutfitPost>> {
    repo.list_by_user(user_id).await
}

pub async fn get_post(repo: &dyn OutfitPostRepository, id: Uuid) -> AppResult<OutfitPost> {
    repo.get_by_id(id).await
}

/// Likes a post on behalf of `user_id`; liking twice has no further effect
pub async fn like_post(
    repo: &dyn OutfitPostRepository,
    id: Uuid,
    user_id: Uuid,
) -> AppResult<OutfitPost> {
    let post = repo.like(id, user_id).await?;
    tracing::info!(post_id = %id, user_id = %user_id, likes = post.likes, "Outfit post liked");
    Ok(post)
}

/// Removes a post. Only its author may do so.
pub async fn delete_post(
    repo: &dyn OutfitPostRepository,
    id: Uuid,
    user_id: Uuid,
) -> AppResult<()> {
    let post = repo.get_by_id(id).await?;
    if post.user_id != user_id {
        return Err(AppError::Forbidden(
            "only the author can delete this post".to_string(),
        ));
    }
    repo.delete(id).await?;
    tracing::info!(user_id = %user_id, post_id = %id, "Outfit post deleted");
    Ok(())
}
