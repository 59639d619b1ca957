//! Allocation and performance series for charting.

use super::metrics::{pl_percent, quote};
use crate::types::{AllocationEntry, ChartData, Holding, MarketData, PerformanceEntry};

/// Market value of a holding, or 0 when its price is unknown.
fn market_value(holding: &Holding, market_data: &MarketData) -> f64 {
    let price = quote(market_data, &holding.symbol)
        .map(|d| d.current_price)
        .filter(|p| p.is_finite())
        .unwrap_or(0.0);
    let value = holding.quantity * price;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Derive allocation shares and per-symbol P/L from holdings.
///
/// Both series follow input order. Shares are exact fractions of the total
/// market value and sum to 1. When the total market value is not positive
/// there is nothing to allocate and only the performance series is filled.
/// Empty input yields empty series.
pub fn compute_allocation(holdings: &[Holding], market_data: &MarketData) -> ChartData {
    if holdings.is_empty() {
        return ChartData::default();
    }

    let values: Vec<f64> = holdings
        .iter()
        .map(|h| market_value(h, market_data))
        .collect();
    let total_market_value: f64 = values.iter().sum();

    let performance = holdings
        .iter()
        .zip(&values)
        .map(|(holding, &value)| {
            let cost = if holding.total_cost.is_finite() {
                holding.total_cost
            } else {
                0.0
            };
            let profit_loss = value - cost;
            PerformanceEntry {
                symbol: holding.symbol.clone(),
                profit_loss,
                profit_loss_percent: pl_percent(profit_loss, cost),
            }
        })
        .collect();

    let allocation = if total_market_value > 0.0 {
        holdings
            .iter()
            .zip(&values)
            .map(|(holding, &value)| AllocationEntry {
                symbol: holding.symbol.clone(),
                market_value: value,
                share_percent: value / total_market_value,
            })
            .collect()
    } else {
        tracing::debug!("total market value is not positive, allocation left empty");
        Vec::new()
    };

    ChartData {
        allocation,
        performance,
    }
}
