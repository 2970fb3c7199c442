/// OpenWeatherMap current-weather provider
///
/// API Flow:
/// 1. `GET /data/2.5/weather?lat={lat}&lon={lon}&appid={key}&units=metric`
/// 2. The first entry of `weather[]` is the primary condition
///
/// Readings are optionally cached in Redis on a ~1 km grid.
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{validate_coordinates, OwmCurrentWeather, WeatherCondition},
    services::weather::WeatherProvider,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct OpenWeatherMapProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Option<Cache>,
    cache_ttl: u64,
}

impl OpenWeatherMapProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache: None,
            cache_ttl: 0,
        }
    }

    /// Serve repeated lookups from `cache` for `ttl` seconds
    pub fn with_cache(mut self, cache: Cache, ttl: u64) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    async fn fetch(&self, latitude: f64, longitude: f64) -> AppResult<WeatherCondition> {
        let url = format!("{}/data/2.5/weather", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "OpenWeatherMap request failed");
            return Err(AppError::ExternalApi(format!(
                "OpenWeatherMap API returned status {}",
                status
            )));
        }

        let response_text = response.text().await?;
        let owm: OwmCurrentWeather = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize OpenWeatherMap response"
            );
            AppError::ExternalApi(format!("Failed to parse OpenWeatherMap response: {}", e))
        })?;

        let weather = WeatherCondition::from(owm);

        tracing::info!(
            latitude,
            longitude,
            temperature = weather.temperature,
            condition = ?weather.condition,
            provider = "openweathermap",
            "Weather fetched"
        );

        Ok(weather)
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OpenWeatherMapProvider {
    async fn current(&self, latitude: f64, longitude: f64) -> AppResult<WeatherCondition> {
        validate_coordinates(latitude, longitude)?;

        match &self.cache {
            Some(cache) => {
                let key = CacheKey::Weather {
                    latitude,
                    longitude,
                };
                cached!(
                    cache,
                    key,
                    self.cache_ttl,
                    self.fetch(latitude, longitude)
                )
            }
            None => self.fetch(latitude, longitude).await,
        }
    }

    fn name(&self) -> &'static str {
        "openweathermap"
    }
}
