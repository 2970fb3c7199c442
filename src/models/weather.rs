use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse sky condition, following OpenWeatherMap's main condition groups
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sky {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    /// Mist, fog, haze, dust and the other visibility groups
    Atmosphere,
    Unknown,
}

impl Sky {
    /// Parses OpenWeatherMap's `weather[].main` value
    pub fn from_openweathermap(main: &str) -> Self {
        match main.to_lowercase().as_str() {
            "clear" => Sky::Clear,
            "clouds" => Sky::Clouds,
            "rain" => Sky::Rain,
            "drizzle" => Sky::Drizzle,
            "thunderstorm" => Sky::Thunderstorm,
            "snow" => Sky::Snow,
            "mist" | "smoke" | "haze" | "dust" | "fog" | "sand" | "ash" | "squall"
            | "tornado" => Sky::Atmosphere,
            _ => Sky::Unknown,
        }
    }

    /// Whether precipitation calls for rain gear
    pub fn is_rainy(&self) -> bool {
        matches!(self, Sky::Rain | Sky::Drizzle | Sky::Thunderstorm)
    }
}

/// A single weather reading for a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherCondition {
    /// Air temperature in °C
    pub temperature: f64,
    /// Perceived temperature in °C
    pub feels_like: f64,
    pub description: String,
    pub condition: Sky,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Cloud cover in percent
    pub cloud_cover: u8,
    pub location: String,
    pub observed_at: DateTime<Utc>,
}

/// Validates a latitude/longitude pair
pub fn validate_coordinates(latitude: f64, longitude: f64) -> crate::error::AppResult<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(crate::error::AppError::InvalidInput(
            "latitude must be between -90 and 90".to_string(),
        ));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(crate::error::AppError::InvalidInput(
            "longitude must be between -180 and 180".to_string(),
        ));
    }
    Ok(())
}
