use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ClothingCategory, WeatherCondition};

/// Overall outfit direction derived from the temperature
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutfitStyle {
    Warm,
    Cool,
    Casual,
}

/// One wardrobe item picked for the current weather
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedItem {
    pub item_id: Uuid,
    pub category: ClothingCategory,
    pub name: String,
    pub color: String,
    /// Why this item was picked
    pub reason: String,
}

/// A weather-based outfit recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FashionRecommendation {
    pub id: Uuid,
    /// `None` for anonymous requests
    pub user_id: Option<Uuid>,
    pub style: OutfitStyle,
    /// Ranked, most relevant first
    pub items: Vec<RecommendedItem>,
    pub weather: WeatherCondition,
    pub reason: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}
