use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use crate::models::{
    ClothingItem, FashionRecommendation, GarmentKind, OutfitStyle, RecommendedItem, Sky,
    WeatherCondition,
};

/// Wind speed (m/s) above which a windbreaker is suggested
const STRONG_WIND_MS: f64 = 10.0;
/// Relative humidity (%) above which breathable fabrics are suggested
const HIGH_HUMIDITY_PCT: u8 = 70;
/// At or below this temperature (°C) the outfit should be warm
const COLD_THRESHOLD_C: f64 = 10.0;
/// At or above this temperature (°C) the outfit should be cool
const HOT_THRESHOLD_C: f64 = 25.0;

/// A weather rule: the garment kinds it asks for and why
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub kinds: &'static [GarmentKind],
    pub reason: &'static str,
}

fn temperature_rule(temperature: f64) -> Rule {
    if temperature <= 0.0 {
        Rule {
            kinds: &[GarmentKind::WinterWear, GarmentKind::ColdWeatherGear],
            reason: "Cold weather calls for winter wear",
        }
    } else if temperature <= 10.0 {
        Rule {
            kinds: &[GarmentKind::AutumnWinterWear, GarmentKind::Jacket],
            reason: "Cool weather calls for a warm layer",
        }
    } else if temperature <= 20.0 {
        Rule {
            kinds: &[GarmentKind::SpringAutumnWear, GarmentKind::Cardigan],
            reason: "Mild weather suits a light layer",
        }
    } else if temperature <= 25.0 {
        Rule {
            kinds: &[GarmentKind::SpringSummerWear],
            reason: "Warm weather suits light clothing",
        }
    } else {
        Rule {
            kinds: &[GarmentKind::SummerWear, GarmentKind::TShirt],
            reason: "Hot weather calls for summer clothing",
        }
    }
}

fn sky_rule(sky: Sky) -> Option<Rule> {
    match sky {
        s if s.is_rainy() => Some(Rule {
            kinds: &[GarmentKind::Raincoat, GarmentKind::RainBoots],
            reason: "Rain is expected",
        }),
        Sky::Snow => Some(Rule {
            kinds: &[GarmentKind::SnowBoots, GarmentKind::Gloves],
            reason: "Snow is expected",
        }),
        Sky::Clear => Some(Rule {
            kinds: &[GarmentKind::Sunglasses, GarmentKind::Hat],
            reason: "Clear skies and sunshine",
        }),
        _ => None,
    }
}

/// Rules that apply to `weather`, in ranking order
pub fn applicable_rules(weather: &WeatherCondition) -> Vec<Rule> {
    let mut rules = vec![temperature_rule(weather.temperature)];

    rules.extend(sky_rule(weather.condition));

    if weather.wind_speed > STRONG_WIND_MS {
        rules.push(Rule {
            kinds: &[GarmentKind::Windbreaker],
            reason: "Strong wind",
        });
    }

    if weather.humidity > HIGH_HUMIDITY_PCT {
        rules.push(Rule {
            kinds: &[GarmentKind::Breathable],
            reason: "High humidity",
        });
    }

    rules
}

/// Picks wardrobe items for the weather.
///
/// Items are ranked by the first rule that selects them; within a rule, by
/// the order of the rule's kinds and then wardrobe order. Each item appears once.
pub fn recommend_items(
    weather: &WeatherCondition,
    wardrobe: &[ClothingItem],
) -> Vec<RecommendedItem> {
    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut recommended = Vec::new();

    for rule in applicable_rules(weather) {
        for kind in rule.kinds {
            for item in wardrobe.iter().filter(|item| item.has_kind(*kind)) {
                if seen.insert(item.id) {
                    recommended.push(RecommendedItem {
                        item_id: item.id,
                        category: item.category,
                        name: item.name.clone(),
                        color: item.color.clone(),
                        reason: rule.reason.to_string(),
                    });
                }
            }
        }
    }

    recommended
}

pub fn determine_style(temperature: f64) -> OutfitStyle {
    if temperature <= COLD_THRESHOLD_C {
        OutfitStyle::Warm
    } else if temperature >= HOT_THRESHOLD_C {
        OutfitStyle::Cool
    } else {
        OutfitStyle::Casual
    }
}

/// Summary rationale for the whole outfit
pub fn describe(weather: &WeatherCondition) -> String {
    let mut description = String::from("An outfit suited to today's weather.");

    if weather.temperature <= COLD_THRESHOLD_C {
        description.push_str(" It's cold, so dress warmly.");
    } else if weather.temperature >= HOT_THRESHOLD_C {
        description.push_str(" It's hot, so dress light.");
    }

    if weather.condition.is_rainy() {
        description.push_str(" Don't forget rain protection.");
    }

    description
}

/// Builds an unsaved recommendation for `weather` from `wardrobe`.
///
/// The caller stamps owner and location before persisting.
pub fn generate_recommendation(
    weather: WeatherCondition,
    wardrobe: &[ClothingItem],
) -> FashionRecommendation {
    let items = recommend_items(&weather, wardrobe);

    FashionRecommendation {
        id: Uuid::new_v4(),
        user_id: None,
        style: determine_style(weather.temperature),
        items,
        reason: describe(&weather),
        weather,
        location: None,
        created_at: Utc::now(),
    }
}
