pub mod catalog;
pub mod estimates;
pub mod health;

use axum::{http::Uri, routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;
use crate::error::ApiError;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/catalog", get(catalog::get_catalog))
        // Estimates
        .route("/estimates", post(estimates::create_estimate))
        .route("/estimates/rooms", post(estimates::quote_room))
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
