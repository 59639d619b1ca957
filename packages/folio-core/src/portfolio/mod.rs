//! Portfolio analytics module.
//!
//! Provides the holding book, aggregate metrics and chart data.

mod allocation;
mod book;
mod metrics;

pub use allocation::compute_allocation;
pub use book::HoldingBook;
pub use metrics::{
    breakdown, compute_metrics, holding_breakdown, previous_price, HoldingBreakdown,
};
