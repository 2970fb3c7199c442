use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::repositories::{
        ClothingRepository, OutfitPostRepository, RecommendationRepository, UserRepository,
    },
    error::{AppError, AppResult},
    models::{normalize_email, ClothingItem, FashionRecommendation, OutfitPost, User},
};

/// In-memory user store
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn user_not_found() -> AppError {
    AppError::NotFound("user not found".to_string())
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        let email = normalize_email(&user.email);
        if users.values().any(|u| normalize_email(&u.email) == email) {
            return Err(AppError::Conflict(
                "this email address is already registered".to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(user_not_found)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<User> {
        let email = normalize_email(email);
        self.users
            .read()
            .await
            .values()
            .find(|u| normalize_email(&u.email) == email)
            .cloned()
            .ok_or_else(user_not_found)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(user_not_found()),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(user_not_found)
    }
}

/// In-memory wardrobe store
///
/// Each item keeps the sequence number it was inserted with, so listings stay
/// in insertion order even when timestamps collide.
#[derive(Default)]
pub struct InMemoryClothingRepository {
    items: RwLock<HashMap<Uuid, (u64, ClothingItem)>>,
    next_seq: AtomicU64,
}

impl InMemoryClothingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn clothing_not_found() -> AppError {
    AppError::NotFound("clothing item not found".to_string())
}

#[async_trait::async_trait]
impl ClothingRepository for InMemoryClothingRepository {
    async fn create(&self, item: ClothingItem) -> AppResult<ClothingItem> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.items
            .write()
            .await
            .insert(item.id, (seq, item.clone()));
        Ok(item)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<ClothingItem> {
        self.items
            .read()
            .await
            .get(&id)
            .map(|(_, item)| item.clone())
            .ok_or_else(clothing_not_found)
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<ClothingItem>> {
        let mut items: Vec<(u64, ClothingItem)> = self
            .items
            .read()
            .await
            .values()
            .filter(|(_, item)| item.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by_key(|(seq, _)| *seq);
        Ok(items.into_iter().map(|(_, item)| item).collect())
    }

    async fn update(&self, item: ClothingItem) -> AppResult<ClothingItem> {
        let mut items = self.items.write().await;
        match items.get_mut(&item.id) {
            Some((_, existing)) => {
                *existing = item.clone();
                Ok(item)
            }
            None => Err(clothing_not_found()),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.items
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(clothing_not_found)
    }
}

/// In-memory recommendation history
#[derive(Default)]
pub struct InMemoryRecommendationRepository {
    recommendations: RwLock<HashMap<Uuid, FashionRecommendation>>,
}

impl InMemoryRecommendationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn recommendation_not_found() -> AppError {
    AppError::NotFound("fashion recommendation not found".to_string())
}

#[async_trait::async_trait]
impl RecommendationRepository for InMemoryRecommendationRepository {
    async fn create(
        &self,
        recommendation: FashionRecommendation,
    ) -> AppResult<FashionRecommendation> {
        self.recommendations
            .write()
            .await
            .insert(recommendation.id, recommendation.clone());
        Ok(recommendation)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<FashionRecommendation> {
        self.recommendations
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(recommendation_not_found)
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<FashionRecommendation>> {
        let mut history: Vec<FashionRecommendation> = self
            .recommendations
            .read()
            .await
            .values()
            .filter(|r| r.user_id == Some(user_id))
            .cloned()
            .collect();
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(history)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.recommendations
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(recommendation_not_found)
    }
}

/// In-memory outfit post feed
#[derive(Default)]
pub struct InMemoryOutfitPostRepository {
    posts: RwLock<HashMap<Uuid, OutfitPost>>,
}

impl InMemoryOutfitPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn post_not_found() -> AppError {
    AppError::NotFound("outfit post not found".to_string())
}

fn newest_first(mut posts: Vec<OutfitPost>) -> Vec<OutfitPost> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

#[async_trait::async_trait]
impl OutfitPostRepository for InMemoryOutfitPostRepository {
    async fn create(&self, post: OutfitPost) -> AppResult<OutfitPost> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<OutfitPost> {
        self.posts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(post_not_found)
    }

    async fn list_all(&self) -> AppResult<Vec<OutfitPost>> {
        let posts = self.posts.read().await.values().cloned().collect();
        Ok(newest_first(posts))
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<OutfitPost>> {
        let posts = self
            .posts
            .read()
            .await
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(posts))
    }

    async fn update(&self, post: OutfitPost) -> AppResult<OutfitPost> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&post.id) {
            Some(existing) => {
                *existing = post.clone();
                Ok(post)
            }
            None => Err(post_not_found()),
        }
    }

    async fn like(&self, id: Uuid, user_id: Uuid) -> AppResult<OutfitPost> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(&id).ok_or_else(post_not_found)?;
        post.like(user_id);
        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(post_not_found)
    }
}
