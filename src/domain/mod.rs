//! Domain types and DTOs
//!
//! Room descriptions going in, cost breakdowns and estimate summaries coming
//! out.

pub mod estimates;
pub mod rooms;

pub use estimates::*;
pub use rooms::*;
