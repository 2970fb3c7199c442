use chrono::Utc;

use crate::{
    error::AppResult,
    models::{validate_coordinates, Sky, WeatherCondition},
    services::weather::WeatherProvider,
};

/// Always reports the same reading, stamped with the current time.
///
/// Used when no OpenWeatherMap key is configured and in tests.
#[derive(Debug, Clone)]
pub struct FixedWeatherProvider {
    weather: WeatherCondition,
}

impl FixedWeatherProvider {
    pub fn new(weather: WeatherCondition) -> Self {
        Self { weather }
    }
}

impl Default for FixedWeatherProvider {
    /// A mild, overcast day
    fn default() -> Self {
        Self::new(WeatherCondition {
            temperature: 18.0,
            feels_like: 18.0,
            description: "overcast clouds".to_string(),
            condition: Sky::Clouds,
            humidity: 60,
            wind_speed: 3.0,
            cloud_cover: 90,
            location: "Unknown".to_string(),
            observed_at: Utc::now(),
        })
    }
}

#[async_trait::async_trait]
impl WeatherProvider for FixedWeatherProvider {
    async fn current(&self, latitude: f64, longitude: f64) -> AppResult<WeatherCondition> {
        validate_coordinates(latitude, longitude)?;
        Ok(WeatherCondition {
            observed_at: Utc::now(),
            ..self.weather.clone()
        })
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
