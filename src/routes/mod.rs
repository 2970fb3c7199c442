use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

pub mod clothing;
pub mod outfit_posts;
pub mod recommendations;
mod state;
pub mod users;

pub use state::AppState;

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(
            // Request id first so the trace span can read it
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(cors),
        )
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Users
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/profile", get(users::get_profile).put(users::update_profile))
        // Weather & recommendations
        .route("/weather", get(recommendations::current_weather))
        .route(
            "/fashion-recommendations",
            get(recommendations::fashion_recommendations),
        )
        .route(
            "/recommendations",
            get(recommendations::history).post(recommendations::create),
        )
        .route("/recommendations/:id", get(recommendations::get))
        // Wardrobe
        .route("/clothing", get(clothing::list).post(clothing::create))
        .route(
            "/clothing/:id",
            get(clothing::get)
                .put(clothing::update)
                .delete(clothing::delete),
        )
        // Outfit posts
        .route(
            "/outfit-posts",
            get(outfit_posts::list).post(outfit_posts::create),
        )
        .route("/outfit-posts/create", post(outfit_posts::create))
        .route("/outfit-posts/mine", get(outfit_posts::list_mine))
        .route(
            "/outfit-posts/:id",
            get(outfit_posts::get).delete(outfit_posts::delete),
        )
        .route("/outfit-posts/:id/like", post(outfit_posts::like))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
