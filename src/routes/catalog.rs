//! Catalog routes

use axum::extract::State;
use std::sync::Arc;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::pricing::PricingCatalog;

/// GET /catalog
///
/// The price list every estimate from this process is computed against.
pub async fn get_catalog(State(state): State<Arc<AppState>>) -> DataResponse<PricingCatalog> {
    DataResponse::new(state.catalog.clone())
}
