use chrono::Utc;
use serde::Deserialize;

mod clothing;
mod outfit_post;
mod recommendation;
mod user;
mod weather;

pub use clothing::{ClothingAttributes, ClothingCategory, ClothingItem, GarmentKind};
pub use outfit_post::OutfitPost;
pub use recommendation::{FashionRecommendation, OutfitStyle, RecommendedItem};
pub use user::{normalize_email, User, UserPreferences};
pub use weather::{validate_coordinates, Sky, WeatherCondition};

// ============================================================================
// OpenWeatherMap API Types
// ============================================================================

/// Raw response from OpenWeatherMap `GET /data/2.5/weather`
#[derive(Debug, Clone, Deserialize)]
pub struct OwmCurrentWeather {
    pub main: OwmMain,
    #[serde(default)]
    pub weather: Vec<OwmWeather>,
    #[serde(default)]
    pub wind: OwmWind,
    #[serde(default)]
    pub clouds: OwmClouds,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmWeather {
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwmWind {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwmClouds {
    #[serde(default)]
    pub all: u8,
}

impl From<OwmCurrentWeather> for WeatherCondition {
    fn from(owm: OwmCurrentWeather) -> Self {
        // OpenWeatherMap lists the primary condition first
        let (condition, description) = owm
            .weather
            .into_iter()
            .next()
            .map(|w| (Sky::from_openweathermap(&w.main), w.description))
            .unwrap_or((Sky::Unknown, String::new()));

        WeatherCondition {
            temperature: owm.main.temp,
            feels_like: owm.main.feels_like,
            description,
            condition,
            humidity: owm.main.humidity,
            wind_speed: owm.wind.speed,
            cloud_cover: owm.clouds.all,
            location: owm.name,
            observed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owm_response_to_weather_condition() {
        let json = r#"{
            "coord": {"lon": 139.69, "lat": 35.69},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 12.3, "feels_like": 11.1, "temp_min": 10.0, "temp_max": 14.0, "pressure": 1012, "humidity": 82},
            "wind": {"speed": 4.6, "deg": 200},
            "clouds": {"all": 90},
            "name": "Tokyo"
        }"#;

        let owm: OwmCurrentWeather = serde_json::from_str(json).unwrap();
        let weather: WeatherCondition = owm.into();
        assert_eq!(weather.temperature, 12.3);
        assert_eq!(weather.feels_like, 11.1);
        assert_eq!(weather.condition, Sky::Rain);
        assert_eq!(weather.description, "light rain");
        assert_eq!(weather.humidity, 82);
        assert_eq!(weather.wind_speed, 4.6);
        assert_eq!(weather.cloud_cover, 90);
        assert_eq!(weather.location, "Tokyo");
    }

    #[test]
    fn test_owm_response_without_conditions() {
        let json = r#"{"main": {"temp": -3.0, "feels_like": -8.0, "humidity": 40}}"#;

        let owm: OwmCurrentWeather = serde_json::from_str(json).unwrap();
        let weather: WeatherCondition = owm.into();
        assert_eq!(weather.condition, Sky::Unknown);
        assert_eq!(weather.wind_speed, 0.0);
        assert_eq!(weather.cloud_cover, 0);
        assert!(weather.location.is_empty());
    }
}
