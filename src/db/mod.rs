pub mod memory;
pub mod redis;
pub mod repositories;

pub use memory::{
    InMemoryClothingRepository, InMemoryOutfitPostRepository, InMemoryRecommendationRepository,
    InMemoryUserRepository,
};
pub use self::redis::create_redis_client;
pub use self::redis::Cache;
pub use self::redis::CacheKey;
pub use self::redis::CacheWriterHandle;
pub use repositories::{
    ClothingRepository, OutfitPostRepository, RecommendationRepository, UserRepository,
};
