//! Painting-service cost estimator.
//!
//! The pricing engine lives in [`pricing`]: [`pricing::calculate_room_cost`]
//! turns one room's attributes into an itemized breakdown and
//! [`pricing::aggregate`] rolls room breakdowns into a project estimate with
//! a tiered volume discount. The remaining modules wrap it in a small HTTP
//! service.

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod pricing;
pub mod routes;

pub use domain::{EstimateSummary, RoomAttributes, RoomCostBreakdown, RoomInput};
pub use error::{EstimateError, EstimateResult};
pub use pricing::{aggregate, calculate_room_cost, estimate_project, PricingCatalog};
