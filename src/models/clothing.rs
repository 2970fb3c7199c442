use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Where a garment is worn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClothingCategory {
    /// Shirts, T-shirts, blouses
    Tops,
    /// Trousers, skirts, shorts
    Bottoms,
    /// Jackets, coats, cardigans
    Outerwear,
    /// Shoes, boots, sandals
    Shoes,
    /// Hats, bags, accessories
    Accessory,
}

/// The weather situations a garment is suited for.
///
/// An item may carry several kinds; the recommendation engine selects items by kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GarmentKind {
    WinterWear,
    ColdWeatherGear,
    AutumnWinterWear,
    Jacket,
    SpringAutumnWear,
    Cardigan,
    SpringSummerWear,
    SummerWear,
    TShirt,
    Raincoat,
    RainBoots,
    SnowBoots,
    Gloves,
    Sunglasses,
    Hat,
    Windbreaker,
    Breathable,
}

/// An item in a user's wardrobe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClothingItem {
    pub id: Uuid,
    /// Owner of the item
    pub user_id: Uuid,
    pub name: String,
    pub category: ClothingCategory,
    pub kinds: Vec<GarmentKind>,
    pub color: String,
    pub brand: Option<String>,
    /// Warmth on a 1-10 scale
    pub warmth_level: Option<u8>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Editable attributes of a clothing item
#[derive(Debug, Clone, Deserialize)]
pub struct ClothingAttributes {
    pub name: String,
    pub category: ClothingCategory,
    pub kinds: Vec<GarmentKind>,
    pub color: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub warmth_level: Option<u8>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ClothingItem {
    /// Creates a new item owned by `user_id`
    pub fn new(user_id: Uuid, attributes: ClothingAttributes) -> Self {
        let mut item = Self {
            id: Uuid::new_v4(),
            user_id,
            name: String::new(),
            category: attributes.category,
            kinds: Vec::new(),
            color: String::new(),
            brand: None,
            warmth_level: None,
            image_url: None,
            created_at: Utc::now(),
        };
        item.apply(attributes);
        item
    }

    /// Overwrites the editable attributes, keeping id, owner and creation time
    pub fn apply(&mut self, attributes: ClothingAttributes) {
        self.name = attributes.name.trim().to_string();
        self.category = attributes.category;
        self.kinds = Vec::new();
        for kind in attributes.kinds {
            if !self.kinds.contains(&kind) {
                self.kinds.push(kind);
            }
        }
        self.color = attributes.color.trim().to_string();
        self.brand = attributes.brand.filter(|b| !b.trim().is_empty());
        self.warmth_level = attributes.warmth_level;
        self.image_url = attributes.image_url.filter(|u| !u.trim().is_empty());
    }

    /// Whether the item suits the given weather situation
    pub fn has_kind(&self, kind: GarmentKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.name.is_empty() {
            return Err(AppError::InvalidInput("name is required".to_string()));
        }
        if self.color.is_empty() {
            return Err(AppError::InvalidInput("color is required".to_string()));
        }
        if self.kinds.is_empty() {
            return Err(AppError::InvalidInput(
                "at least one kind is required".to_string(),
            ));
        }
        if let Some(level) = self.warmth_level {
            if !(1..=10).contains(&level) {
                return Err(AppError::InvalidInput(
                    "warmth_level must be between 1 and 10".to_string(),
                ));
            }
        }
        Ok(())
    }
}
