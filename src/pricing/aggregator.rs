//! Estimate aggregation
//!
//! Sums room totals, applies the tiered volume discount and derives the
//! paint-can estimate.

use rust_decimal::prelude::*;

use super::calculator::calculate_room_cost;
use super::catalog::{PaintCoverage, PricingCatalog, VolumeDiscountTier, MAX_VOLUME_DISCOUNT_RATE};
use super::round_cents;
use crate::domain::estimates::{EstimateSummary, RoomCostBreakdown};
use crate::domain::rooms::{RoomAttributes, RoomInput};
use crate::error::{EstimateError, EstimateResult};

/// Rate of the highest tier whose threshold the subtotal reaches, capped at
/// `MAX_VOLUME_DISCOUNT_RATE`. Zero below the first threshold.
pub fn discount_rate(subtotal: Decimal, tiers: &[VolumeDiscountTier]) -> Decimal {
    tiers
        .iter()
        .filter(|tier| subtotal >= tier.threshold)
        .max_by(|a, b| a.threshold.cmp(&b.threshold))
        .map(|tier| tier.rate.clamp(Decimal::ZERO, MAX_VOLUME_DISCOUNT_RATE))
        .unwrap_or(Decimal::ZERO)
}

/// Cans needed to cover `area_sqft` with every coat. Zero area needs none.
pub fn estimate_paint_cans(area_sqft: Decimal, coverage: &PaintCoverage) -> u32 {
    if area_sqft <= Decimal::ZERO || coverage.sqft_per_can <= Decimal::ZERO {
        return 0;
    }
    area_sqft
        .checked_mul(Decimal::from(coverage.coats))
        .and_then(|coated| coated.checked_div(coverage.sqft_per_can))
        .and_then(|cans| cans.ceil().to_u32())
        .unwrap_or(u32::MAX)
}

pub fn aggregate(rooms: Vec<RoomCostBreakdown>, catalog: &PricingCatalog) -> EstimateSummary {
    let subtotal: Decimal = rooms
        .iter()
        .map(|room| room.total_before_volume_discount)
        .sum();
    // Area is advisory, so a sum past Decimal::MAX pins there instead of failing
    let total_paintable_area_sqft = rooms
        .iter()
        .fold(Decimal::ZERO, |total, room| {
            total.saturating_add(room.paintable_area_sqft)
        });

    let volume_discount_rate = discount_rate(subtotal, &catalog.volume_discount_tiers);
    let volume_discount = round_cents(subtotal * volume_discount_rate);
    let final_total = subtotal - volume_discount;
    let estimated_paint_cans =
        estimate_paint_cans(total_paintable_area_sqft, &catalog.paint_coverage);

    tracing::debug!(
        rooms = rooms.len(),
        subtotal = %subtotal,
        rate = %volume_discount_rate,
        final_total = %final_total,
        "Aggregated estimate"
    );

    EstimateSummary {
        rooms,
        subtotal,
        volume_discount_rate,
        volume_discount,
        final_total,
        total_paintable_area_sqft,
        estimated_paint_cans,
    }
}

/// Validate, price and aggregate every room. All-or-nothing: the first bad
/// room aborts the estimate and its field is reported as `rooms[i].field`.
pub fn estimate_project(
    inputs: Vec<RoomInput>,
    catalog: &PricingCatalog,
) -> EstimateResult<EstimateSummary> {
    let rooms = inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| {
            RoomAttributes::try_from(input)
                .and_then(|attrs| calculate_room_cost(&attrs, catalog))
                .map_err(|err: EstimateError| err.for_room(index))
        })
        .collect::<EstimateResult<Vec<_>>>()?;

    Ok(aggregate(rooms, catalog))
}
