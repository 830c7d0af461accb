use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rooms::{RoomInput, RoomSize, RoomType};
use crate::pricing::format::{format_currency, format_percentage};

/// Itemized price of a single room, all amounts in dollars
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomCostBreakdown {
    pub room_type: RoomType,
    pub size: RoomSize,
    pub paintable_area_sqft: Decimal,

    pub base_price: Decimal,
    pub paint_upcharge: Decimal,
    pub ceiling_cost: Decimal,
    pub crown_molding_cost: Decimal,
    pub baseboard_cost: Decimal,
    pub high_ceiling_cost: Decimal,
    pub closet_cost: Decimal,
    pub door_cost: Decimal,
    pub window_cost: Decimal,
    pub fireplace_cost: Decimal,
    pub railing_cost: Decimal,
    pub two_color_cost: Decimal,
    pub millwork_priming_cost: Decimal,
    pub repairs_cost: Decimal,
    pub baseboard_installation_cost: Decimal,
    pub subtotal_before_discounts: Decimal,

    pub empty_house_discount: Decimal,
    pub no_floor_covering_discount: Decimal,
    pub minimum_charge_top_up: Decimal,
    pub total_before_volume_discount: Decimal,
}

impl RoomCostBreakdown {
    /// Ceiling and crown molding surcharges together
    pub fn add_on_cost(&self) -> Decimal {
        self.ceiling_cost + self.crown_molding_cost
    }

    pub fn total_discounts(&self) -> Decimal {
        self.empty_house_discount + self.no_floor_covering_discount
    }
}

/// Project-level result across all rooms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimateSummary {
    pub rooms: Vec<RoomCostBreakdown>,
    pub subtotal: Decimal,
    pub volume_discount_rate: Decimal,
    pub volume_discount: Decimal,
    pub final_total: Decimal,
    pub total_paintable_area_sqft: Decimal,
    /// Advisory only; never feeds into pricing
    pub estimated_paint_cans: u32,
}

/// Request DTO for a multi-room estimate
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEstimateRequest {
    #[serde(default)]
    pub rooms: Vec<RoomInput>,
}

/// Display strings for the headline amounts
#[derive(Debug, Clone, Serialize)]
pub struct FormattedTotals {
    pub subtotal: String,
    pub volume_discount_rate: String,
    pub volume_discount: String,
    pub final_total: String,
}

impl From<&EstimateSummary> for FormattedTotals {
    fn from(s: &EstimateSummary) -> Self {
        Self {
            subtotal: format_currency(s.subtotal),
            volume_discount_rate: format_percentage(s.volume_discount_rate),
            volume_discount: format_currency(s.volume_discount),
            final_total: format_currency(s.final_total),
        }
    }
}

/// Response DTO for a multi-room estimate
#[derive(Debug, Clone, Serialize)]
pub struct EstimateResponse {
    pub estimate_id: Uuid,
    pub calculated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: EstimateSummary,
    pub formatted: FormattedTotals,
}

impl From<EstimateSummary> for EstimateResponse {
    fn from(summary: EstimateSummary) -> Self {
        Self {
            estimate_id: Uuid::new_v4(),
            calculated_at: Utc::now(),
            formatted: FormattedTotals::from(&summary),
            summary,
        }
    }
}

/// Response DTO for a single-room quote
#[derive(Debug, Clone, Serialize)]
pub struct RoomEstimateResponse {
    #[serde(flatten)]
    pub breakdown: RoomCostBreakdown,
    pub formatted_total: String,
}

impl From<RoomCostBreakdown> for RoomEstimateResponse {
    fn from(breakdown: RoomCostBreakdown) -> Self {
        Self {
            formatted_total: format_currency(breakdown.total_before_volume_discount),
            breakdown,
        }
    }
}
