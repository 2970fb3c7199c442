use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::{AuthUser, OptionalAuthUser},
    models::{FashionRecommendation, WeatherCondition},
    routes::AppState,
    services::fashion::{self, RecommendationRequest},
};

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct FashionQuery {
    lat: f64,
    lon: f64,
    #[serde(default)]
    location: Option<String>,
}

/// `GET /api/weather?lat=..&lon=..`
pub async fn current_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeatherQuery>,
) -> AppResult<Json<WeatherCondition>> {
    let weather = fashion::current_weather(state.weather.as_ref(), params.lat, params.lon).await?;
    Ok(Json(weather))
}

/// `GET /api/fashion-recommendations?lat=..&lon=..&location=..`
///
/// Works without signing in; signed-in users get their wardrobe considered
/// and the result saved to their history.
pub async fn fashion_recommendations(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(user): OptionalAuthUser,
    Query(params): Query<FashionQuery>,
) -> AppResult<Json<FashionRecommendation>> {
    let request = RecommendationRequest {
        latitude: params.lat,
        longitude: params.lon,
        location: params.location,
    };
    let recommendation = fashion::recommend(
        state.weather.as_ref(),
        state.clothing.as_ref(),
        state.recommendations.as_ref(),
        user.map(|u| u.id),
        request,
    )
    .await?;
    Ok(Json(recommendation))
}

/// `POST /api/recommendations`
pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<(StatusCode, Json<FashionRecommendation>)> {
    let recommendation = fashion::recommend(
        state.weather.as_ref(),
        state.clothing.as_ref(),
        state.recommendations.as_ref(),
        Some(user.id),
        request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(recommendation)))
}

/// `GET /api/recommendations`
pub async fn history(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<FashionRecommendation>>> {
    let history = fashion::list_history(state.recommendations.as_ref(), user.id).await?;
    Ok(Json(history))
}

/// `GET /api/recommendations/:id`
pub async fn get(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FashionRecommendation>> {
    let recommendation =
        fashion::get_recommendation(state.recommendations.as_ref(), user.id, id).await?;
    Ok(Json(recommendation))
}
