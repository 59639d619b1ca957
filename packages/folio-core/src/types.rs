//! Core data types for the folio analytics engine.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Sentinel rendered for ratio outputs that cannot be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Symbols are compared upper-cased everywhere.
fn uppercase_symbol<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(String::deserialize(deserializer)?.to_uppercase())
}

/// A single owned position: symbol, quantity and cumulative cost basis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Ticker symbol (uppercase)
    #[serde(deserialize_with = "uppercase_symbol")]
    pub symbol: String,
    /// Number of units owned
    pub quantity: f64,
    /// Total amount paid for the units currently held
    pub total_cost: f64,
}

impl Holding {
    /// Create a new holding with the given symbol, quantity, and total cost.
    pub fn new(symbol: &str, quantity: f64, total_cost: f64) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            quantity,
            total_cost,
        }
    }

    /// Average cost per unit, or 0 for an empty position.
    pub fn average_cost(&self) -> f64 {
        if self.quantity > 0.0 {
            self.total_cost / self.quantity
        } else {
            0.0
        }
    }
}

/// Live quote data for one symbol as supplied by a price feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MarketDatum {
    #[serde(deserialize_with = "uppercase_symbol")]
    pub symbol: String,
    /// Last traded price
    #[serde(default)]
    pub current_price: f64,
    /// Change versus the previous close, in percent
    #[serde(default)]
    pub day_change: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharpe_ratio: Option<f64>,
}

impl MarketDatum {
    /// Create a datum with price and day change and no risk metrics.
    pub fn new(symbol: &str, current_price: f64, day_change: f64) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            current_price,
            day_change,
            beta: None,
            sharpe_ratio: None,
        }
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    pub fn with_sharpe_ratio(mut self, sharpe_ratio: f64) -> Self {
        self.sharpe_ratio = Some(sharpe_ratio);
        self
    }
}

/// Market data snapshot keyed by symbol.
pub type MarketData = HashMap<String, MarketDatum>;

/// A ratio output that is either a number or not available.
///
/// Serializes as a plain number or the string `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ratio {
    Value(f64),
    #[default]
    NotAvailable,
}

impl Ratio {
    /// The numeric value, if available.
    pub fn value(self) -> Option<f64> {
        match self {
            Ratio::Value(v) => Some(v),
            Ratio::NotAvailable => None,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Value(v) => write!(f, "{}", v),
            Ratio::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ratio::Value(v) => serializer.serialize_f64(*v),
            Ratio::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match raw.as_f64() {
            Some(v) if v.is_finite() => Ratio::Value(v),
            _ => Ratio::NotAvailable,
        })
    }
}

/// Best or worst performing holding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Performer {
    pub symbol: String,
    /// Absolute profit/loss
    pub pl: f64,
    /// Profit/loss relative to cost, in percent
    pub pl_percent: f64,
}

impl Default for Performer {
    fn default() -> Self {
        Self {
            symbol: NOT_AVAILABLE.to_string(),
            pl: 0.0,
            pl_percent: 0.0,
        }
    }
}

/// Aggregate portfolio metrics derived from holdings and market data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    /// Sum of cost basis over all holdings
    pub total_invested: f64,
    /// Sum of market value over all holdings
    pub current_value: f64,
    pub total_pl: f64,
    pub total_pl_percent: f64,
    /// Profit/loss since the previous close
    #[serde(rename = "dailyPL")]
    pub daily_pl: f64,
    pub best_performer: Performer,
    pub worst_performer: Performer,
    pub positions_count: usize,
    /// Market-value weighted beta
    pub portfolio_beta: Ratio,
    /// Market-value weighted Sharpe ratio
    pub sharpe_ratio: Ratio,
}

/// One slice of the allocation pie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEntry {
    pub symbol: String,
    pub market_value: f64,
    /// Fraction of total market value, in [0, 1]
    pub share_percent: f64,
}

/// One bar of the per-symbol performance chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    pub symbol: String,
    pub profit_loss: f64,
    pub profit_loss_percent: f64,
}

/// Allocation and performance series for charting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChartData {
    pub allocation: Vec<AllocationEntry>,
    pub performance: Vec<PerformanceEntry>,
}

impl ChartData {
    /// True when there is nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.allocation.is_empty() && self.performance.is_empty()
    }
}

/// Inputs to the compound growth projection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionParams {
    pub initial_investment: f64,
    pub monthly_contribution: f64,
    /// Horizon in years
    pub years: u32,
    /// Expected annual return, in percent
    pub annual_return_percent: f64,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            initial_investment: 10_000.0,
            monthly_contribution: 500.0,
            years: 20,
            annual_return_percent: 7.0,
        }
    }
}

/// Projected balances at the end of one year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    /// Year index, starting at 1
    pub period: u32,
    /// Balance with contributions only and no growth
    pub savings_only: f64,
    /// Balance with contributions and compounded returns
    pub compounded: f64,
}

/// Summary of a projection, taken from its final point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub final_savings_only: f64,
    pub final_compounded: f64,
    pub absolute_gain: f64,
    pub relative_gain_percent: f64,
}

/// API response wrapper used by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
