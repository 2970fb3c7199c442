use std::sync::Arc;

use crate::{
    config::Config,
    db::{
        create_redis_client, Cache, CacheWriterHandle, ClothingRepository,
        InMemoryClothingRepository, InMemoryOutfitPostRepository,
        InMemoryRecommendationRepository, InMemoryUserRepository, OutfitPostRepository,
        RecommendationRepository, UserRepository,
    },
    services::{
        auth::{AuthService, TokenKeys},
        weather::{FixedWeatherProvider, OpenWeatherMapProvider, WeatherProvider},
    },
};

/// Shared application state
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub clothing: Arc<dyn ClothingRepository>,
    pub recommendations: Arc<dyn RecommendationRepository>,
    pub outfit_posts: Arc<dyn OutfitPostRepository>,
    pub weather: Arc<dyn WeatherProvider>,
    pub auth: AuthService,
}

impl AppState {
    /// State backed by empty in-memory stores
    pub fn new(weather: Arc<dyn WeatherProvider>, keys: TokenKeys, bcrypt_cost: u32) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        Self {
            auth: AuthService::new(users.clone(), keys, bcrypt_cost),
            users,
            clothing: Arc::new(InMemoryClothingRepository::new()),
            recommendations: Arc::new(InMemoryRecommendationRepository::new()),
            outfit_posts: Arc::new(InMemoryOutfitPostRepository::new()),
            weather,
        }
    }

    /// Builds state from configuration.
    ///
    /// Picks OpenWeatherMap when an API key is configured and the fixed provider otherwise.
    /// When `REDIS_URL` is set, weather readings are cached and the returned handle
    /// must be shut down to flush pending writes.
    pub fn from_config(config: &Config) -> anyhow::Result<(Self, Option<CacheWriterHandle>)> {
        let mut cache_handle = None;

        let weather: Arc<dyn WeatherProvider> = match config.weather_api_key() {
            Some(key) => {
                let mut provider =
                    OpenWeatherMapProvider::new(key.to_string(), config.weather_api_url.clone());

                if let Some(redis_url) = config.redis_url.as_deref().filter(|u| !u.is_empty()) {
                    let (cache, handle) = Cache::new(create_redis_client(redis_url)?);
                    provider = provider.with_cache(cache, config.weather_cache_ttl_secs);
                    cache_handle = Some(handle);
                    tracing::info!(ttl = config.weather_cache_ttl_secs, "Weather caching enabled");
                }

                Arc::new(provider)
            }
            None => {
                tracing::warn!("WEATHER_API_KEY is not set; serving fixed weather readings");
                Arc::new(FixedWeatherProvider::default())
            }
        };

        let keys = TokenKeys::new(config.jwt_secret(), config.jwt_ttl_hours);
        let state = Self::new(weather, keys, config.bcrypt_cost);

        tracing::info!(weather_provider = state.weather.name(), "Application state ready");

        Ok((state, cache_handle))
    }
}
