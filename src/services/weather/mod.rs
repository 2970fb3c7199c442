/// Weather data provider abstraction
///
/// Recommendations are driven by a single current-weather reading. Providers hide
/// where that reading comes from (OpenWeatherMap, or a fixed reading when no API
/// key is configured) so the fashion service can be exercised without network access.
use crate::{error::AppResult, models::WeatherCondition};

pub mod fixed;
pub mod openweathermap;

pub use fixed::FixedWeatherProvider;
pub use openweathermap::OpenWeatherMapProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current weather at the given coordinates
    ///
    /// Implementations validate the coordinates and report upstream failures as
    /// `AppError::ExternalApi`.
    async fn current(&self, latitude: f64, longitude: f64) -> AppResult<WeatherCondition>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
