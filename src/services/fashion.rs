use serde::Deserialize;
use uuid::Uuid;

use crate::{
    db::{ClothingRepository, RecommendationRepository},
    error::{AppError, AppResult},
    models::{FashionRecommendation, WeatherCondition},
    services::{recommendations, weather::WeatherProvider},
};

/// Where to build a recommendation for
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Display name for the place; defaults to the weather station's name
    #[serde(default)]
    pub location: Option<String>,
}

/// Current weather at the requested coordinates
pub async fn current_weather(
    provider: &dyn WeatherProvider,
    latitude: f64,
    longitude: f64,
) -> AppResult<WeatherCondition> {
    provider.current(latitude, longitude).await
}

/// Fetches the weather, runs the recommendation rules over the user's wardrobe
/// and stores the result in the user's history.
///
/// Anonymous callers get a recommendation over an empty wardrobe, which is not stored.
pub async fn recommend(
    provider: &dyn WeatherProvider,
    clothing: &dyn ClothingRepository,
    history: &dyn RecommendationRepository,
    user_id: Option<Uuid>,
    request: RecommendationRequest,
) -> AppResult<FashionRecommendation> {
    let weather = provider
        .current(request.latitude, request.longitude)
        .await?;

    let wardrobe = match user_id {
        Some(id) => clothing.list_by_user(id).await?,
        None => Vec::new(),
    };

    let mut recommendation = recommendations::generate_recommendation(weather, &wardrobe);
    recommendation.user_id = user_id;
    recommendation.location = request
        .location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .or_else(|| Some(recommendation.weather.location.clone()).filter(|l| !l.is_empty()));

    tracing::info!(
        user_id = ?user_id,
        provider = provider.name(),
        temperature = recommendation.weather.temperature,
        wardrobe_size = wardrobe.len(),
        recommended = recommendation.items.len(),
        style = ?recommendation.style,
        "Recommendation generated"
    );

    match user_id {
        Some(_) => history.create(recommendation).await,
        None => Ok(recommendation),
    }
}

/// The user's past recommendations, newest first
pub async fn list_history(
    history: &dyn RecommendationRepository,
    user_id: Uuid,
) -> AppResult<Vec<FashionRecommendation>> {
    history.list_by_user(user_id).await
}

pub async fn get_recommendation(
    history: &dyn RecommendationRepository,
    user_id: Uuid,
    id: Uuid,
) -> AppResult<FashionRecommendation> {
    let recommendation = history.get_by_id(id).await?;
    if recommendation.user_id != Some(user_id) {
        return Err(AppError::Forbidden(
            "this recommendation belongs to another user".to_string(),
        ));
    }
    Ok(recommendation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{InMemoryClothingRepository, InMemoryRecommendationRepository};
    use crate::models::{
        ClothingAttributes, ClothingCategory, ClothingItem, GarmentKind, OutfitStyle, Sky,
    };
    use crate::services::weather::MockWeatherProvider;
    use chrono::Utc;

    fn rainy_cold_day() -> WeatherCondition {
        WeatherCondition {
            temperature: 6.0,
            feels_like: 3.0,
            description: "light rain".to_string(),
            condition: Sky::Rain,
            humidity: 85,
            wind_speed: 4.0,
            cloud_cover: 100,
            location: "Sapporo".to_string(),
            observed_at: Utc::now(),
        }
    }

    fn mock_provider(weather: WeatherCondition) -> MockWeatherProvider {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_current()
            .returning(move |_, _| Ok(weather.clone()));
        provider.expect_name().return_const("mock");
        provider
    }

    async fn add(repo: &InMemoryClothingRepository, owner: Uuid, name: &str, kind: GarmentKind) {
        repo.create(ClothingItem::new(
            owner,
            ClothingAttributes {
                name: name.to_string(),
                category: ClothingCategory::Outerwear,
                kinds: vec![kind],
                color: "grey".to_string(),
                brand: None,
                warmth_level: None,
                image_url: None,
            },
        ))
        .await
        .unwrap();
    }

    fn request(location: Option<&str>) -> RecommendationRequest {
        RecommendationRequest {
            latitude: 43.06,
            longitude: 141.35,
            location: location.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_recommend_for_user_is_stored() {
        let provider = mock_provider(rainy_cold_day());
        let clothing = InMemoryClothingRepository::new();
        let history = InMemoryRecommendationRepository::new();
        let user = Uuid::new_v4();
        add(&clothing, user, "Parka", GarmentKind::Jacket).await;
        add(&clothing, user, "Rain shell", GarmentKind::Raincoat).await;
        add(&clothing, Uuid::new_v4(), "Someone else's coat", GarmentKind::Jacket).await;

        let recommendation = recommend(
            &provider,
            &clothing,
            &history,
            Some(user),
            request(Some("Home")),
        )
        .await
        .unwrap();

        let names: Vec<&str> = recommendation.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Parka", "Rain shell"]);
        assert_eq!(recommendation.style, OutfitStyle::Warm);
        assert_eq!(recommendation.user_id, Some(user));
        assert_eq!(recommendation.location.as_deref(), Some("Home"));

        let stored = list_history(&history, user).await.unwrap();
        assert_eq!(stored, vec![recommendation]);
    }

    #[tokio::test]
    async fn test_anonymous_recommendation_is_not_stored() {
        let provider = mock_provider(rainy_cold_day());
        let clothing = InMemoryClothingRepository::new();
        let history = InMemoryRecommendationRepository::new();

        let recommendation = recommend(&provider, &clothing, &history, None, request(None))
            .await
            .unwrap();

        assert!(recommendation.items.is_empty());
        assert_eq!(recommendation.location.as_deref(), Some("Sapporo"));
        assert!(matches!(
            history.get_by_id(recommendation.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_weather_failure_propagates() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_current()
            .returning(|_, _| Err(AppError::ExternalApi("down".to_string())));
        provider.expect_name().return_const("mock");

        let result = recommend(
            &provider,
            &InMemoryClothingRepository::new(),
            &InMemoryRecommendationRepository::new(),
            Some(Uuid::new_v4()),
            request(None),
        )
        .await;

        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[tokio::test]
    async fn test_get_recommendation_checks_owner() {
        let provider = mock_provider(rainy_cold_day());
        let clothing = InMemoryClothingRepository::new();
        let history = InMemoryRecommendationRepository::new();
        let owner = Uuid::new_v4();

        let created = recommend(&provider, &clothing, &history, Some(owner), request(None))
            .await
            .unwrap();

        assert_eq!(
            get_recommendation(&history, owner, created.id).await.unwrap().id,
            created.id
        );
        assert!(matches!(
            get_recommendation(&history, Uuid::new_v4(), created.id).await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let provider = mock_provider(rainy_cold_day());
        let clothing = InMemoryClothingRepository::new();
        let history = InMemoryRecommendationRepository::new();
        let user = Uuid::new_v4();

        let first = recommend(&provider, &clothing, &history, Some(user), request(None))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = recommend(&provider, &clothing, &history, Some(user), request(None))
            .await
            .unwrap();

        let ids: Vec<Uuid> = list_history(&history, user)
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
