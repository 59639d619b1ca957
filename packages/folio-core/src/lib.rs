//! Folio Core - Portfolio analytics and savings projection library.
//!
//! This crate is a pure computation layer for a personal investment tracker:
//!
//! - **Statistics**: mean, sample standard deviation, covariance, correlation
//! - **Coercion**: normalizing heterogeneous market-data records
//! - **Portfolio metrics**: valuation, P/L, daily P/L, weighted beta and Sharpe
//! - **Chart data**: allocation shares and per-symbol performance
//! - **Projection**: savings versus compounded growth over time
//! - **Formatting**: currency, percent, quantity and number rendering
//!
//! Engine functions never fail on bad data; they substitute documented
//! defaults. Only the I/O edge (holding files, settings) returns [`Result`].
//!
//! # Example
//!
//! ```rust
//! use folio_core::format::format_currency;
//! use folio_core::portfolio::compute_metrics;
//! use folio_core::{Holding, MarketData, MarketDatum};
//!
//! let holdings = vec![Holding::new("AAPL", 10.0, 1500.0)];
//! let mut market_data = MarketData::new();
//! market_data.insert("AAPL".to_string(), MarketDatum::new("AAPL", 175.0, 1.2));
//!
//! let snapshot = compute_metrics(&holdings, &market_data);
//! assert_eq!(format_currency(snapshot.total_pl), "$250.00");
//! ```

pub mod coerce;
pub mod config;
pub mod format;
pub mod portfolio;
pub mod projection;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use types::{
    AllocationEntry, ApiResponse, ChartData, Holding, MarketData, MarketDatum, PerformanceEntry,
    Performer, PortfolioSnapshot, ProjectionParams, ProjectionPoint, ProjectionSummary, Ratio,
};

// Re-export main functionality
pub use coerce::{first_present, market_data_from_records, to_number};
pub use config::Settings;
pub use portfolio::{compute_allocation, compute_metrics, HoldingBook};
pub use projection::{project, summarize, Projection};

/// Error types for folio-core I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for folio-core operations.
pub type Result<T> = std::result::Result<T, Error>;
