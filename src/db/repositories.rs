//! Storage abstractions for the domain entities.
//!
//! Handlers and services only see these traits; `db::memory` provides the
//! in-process implementations the server runs with.

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ClothingItem, FashionRecommendation, OutfitPost, User},
};

#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user. Fails with `Conflict` if the email is taken.
    async fn create(&self, user: User) -> AppResult<User>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<User>;

    /// Case-insensitive email lookup
    async fn get_by_email(&self, email: &str) -> AppResult<User>;

    async fn update(&self, user: User) -> AppResult<User>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

#[async_trait::async_trait]
pub trait ClothingRepository: Send + Sync {
    async fn create(&self, item: ClothingItem) -> AppResult<ClothingItem>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<ClothingItem>;

    /// All items owned by `user_id`, oldest first
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<ClothingItem>>;

    async fn update(&self, item: ClothingItem) -> AppResult<ClothingItem>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

#[async_trait::async_trait]
pub trait RecommendationRepository: Send + Sync {
    async fn create(&self, recommendation: FashionRecommendation)
        -> AppResult<FashionRecommendation>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<FashionRecommendation>;

    /// Recommendation history for `user_id`, newest first
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<FashionRecommendation>>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

#[async_trait::async_trait]
pub trait OutfitPostRepository: Send + Sync {
    async fn create(&self, post: OutfitPost) -> AppResult<OutfitPost>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<OutfitPost>;

    /// Every post, newest first
    async fn list_all(&self) -> AppResult<Vec<OutfitPost>>;

    /// Posts by `user_id`, newest first
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<OutfitPost>>;

    async fn update(&self, post: OutfitPost) -> AppResult<OutfitPost>;

    /// Applies `like` to the stored post under a single write lock
    async fn like(&self, id: Uuid, user_id: Uuid) -> AppResult<OutfitPost>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}
