//! Estimate routes
//!
//! Stateless wrappers around the pricing engine; nothing is persisted.

use axum::{extract::State, http::HeaderMap};
use std::sync::Arc;

use crate::api::{DataResponse, ValidJson};
use crate::app::AppState;
use crate::domain::estimates::{CreateEstimateRequest, EstimateResponse, RoomEstimateResponse};
use crate::domain::rooms::{RoomAttributes, RoomInput};
use crate::error::{ApiError, ApiResult};
use crate::middleware::request_id::request_id;
use crate::pricing::{calculate_room_cost, estimate_project};

/// POST /estimates/rooms
///
/// Price a single room.
pub async fn quote_room(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidJson(req): ValidJson<RoomInput>,
) -> ApiResult<DataResponse<RoomEstimateResponse>> {
    let attrs = RoomAttributes::try_from(req)?;
    let breakdown = calculate_room_cost(&attrs, &state.catalog)?;

    tracing::info!(
        request_id = request_id(&headers).unwrap_or("-"),
        room_type = %breakdown.room_type,
        total = %breakdown.total_before_volume_discount,
        "Quoted room"
    );

    Ok(DataResponse::new(breakdown.into()))
}

/// POST /estimates
///
/// Price every room and apply the volume discount. One invalid room rejects
/// the whole request.
pub async fn create_estimate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidJson(req): ValidJson<CreateEstimateRequest>,
) -> ApiResult<DataResponse<EstimateResponse>> {
    let max_rooms = state.settings.max_rooms_per_estimate;
    if req.rooms.len() > max_rooms {
        return Err(ApiError::bad_request(format!(
            "An estimate can include at most {} rooms",
            max_rooms
        )));
    }

    let summary = estimate_project(req.rooms, &state.catalog)?;
    let response = EstimateResponse::from(summary);

    tracing::info!(
        request_id = request_id(&headers).unwrap_or("-"),
        estimate_id = %response.estimate_id,
        rooms = response.summary.rooms.len(),
        subtotal = %response.summary.subtotal,
        final_total = %response.summary.final_total,
        "Created estimate"
    );

    Ok(DataResponse::new(response))
}
