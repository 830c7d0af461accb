//! Pricing engine: catalog, room calculator, estimate aggregator and display
//! formatting. Everything here is synchronous and free of I/O.

pub mod aggregator;
pub mod calculator;
pub mod catalog;
pub mod format;

pub use aggregator::{aggregate, discount_rate, estimate_project};
pub use calculator::calculate_room_cost;
pub use catalog::PricingCatalog;

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to whole cents, halves away from zero.
pub(crate) fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
