//! Portfolio metrics aggregation.
//!
//! Turns holdings plus a market-data snapshot into valuation, P/L, daily
//! P/L, market-value weighted risk metrics and best/worst performers.

use crate::types::{Holding, MarketData, MarketDatum, Performer, PortfolioSnapshot, Ratio};
use serde::{Deserialize, Serialize};

/// Per-holding valuation derived from market data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingBreakdown {
    pub symbol: String,
    pub quantity: f64,
    pub total_cost: f64,
    pub current_price: f64,
    pub day_change: f64,
    /// quantity * current_price
    pub market_value: f64,
    pub pl: f64,
    pub pl_percent: f64,
    /// Change in value since the previous close
    #[serde(rename = "dailyPL")]
    pub daily_pl: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharpe_ratio: Option<f64>,
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Look up the quote for a symbol, ignoring case.
pub(crate) fn quote<'a>(market_data: &'a MarketData, symbol: &str) -> Option<&'a MarketDatum> {
    market_data
        .get(symbol)
        .or_else(|| market_data.get(&symbol.to_uppercase()))
}

/// Profit/loss as a percentage of cost, or 0 without a cost basis.
pub(crate) fn pl_percent(pl: f64, cost: f64) -> f64 {
    if cost > 0.0 {
        finite_or_zero(pl / cost * 100.0)
    } else {
        0.0
    }
}

/// Reconstruct the previous close from the current price and the day change.
///
/// A -100% change would divide by zero; the previous price is then taken as
/// the current price so the holding contributes nothing to daily P/L.
pub fn previous_price(current_price: f64, day_change: f64) -> f64 {
    let factor = 1.0 + day_change / 100.0;
    if factor == 0.0 {
        return current_price;
    }
    let previous = current_price / factor;
    if previous.is_finite() {
        previous
    } else {
        current_price
    }
}

/// Value a single holding against the market data snapshot.
///
/// Missing quotes resolve to a price and day change of 0.
pub fn breakdown(holding: &Holding, market_data: &MarketData) -> HoldingBreakdown {
    let quantity = finite_or_zero(holding.quantity);
    let total_cost = finite_or_zero(holding.total_cost);

    let datum = quote(market_data, &holding.symbol);
    if datum.is_none() {
        tracing::debug!(symbol = %holding.symbol, "no market data for holding, pricing at 0");
    }

    let current_price = datum.map(|d| finite_or_zero(d.current_price)).unwrap_or(0.0);
    let day_change = datum.map(|d| finite_or_zero(d.day_change)).unwrap_or(0.0);

    let market_value = finite_or_zero(quantity * current_price);
    let pl = market_value - total_cost;
    let daily_pl =
        finite_or_zero(quantity * (current_price - previous_price(current_price, day_change)));

    HoldingBreakdown {
        symbol: holding.symbol.clone(),
        quantity,
        total_cost,
        current_price,
        day_change,
        market_value,
        pl,
        pl_percent: pl_percent(pl, total_cost),
        daily_pl,
        beta: datum.and_then(|d| d.beta).filter(|b| b.is_finite()),
        sharpe_ratio: datum.and_then(|d| d.sharpe_ratio).filter(|s| s.is_finite()),
    }
}

/// Value every holding, preserving input order.
pub fn holding_breakdown(holdings: &[Holding], market_data: &MarketData) -> Vec<HoldingBreakdown> {
    holdings
        .iter()
        .map(|holding| breakdown(holding, market_data))
        .collect()
}

/// Compute aggregate portfolio metrics.
///
/// This is a pure function of its inputs: the market data is only read and
/// an empty holdings list yields [`PortfolioSnapshot::default`].
///
/// Weighted beta and Sharpe ratio divide by the full current value. A
/// holding without the metric adds 0 to the numerator but its value still
/// counts in the denominator, which pulls the average toward 0 rather than
/// excluding the position.
///
/// ```rust
/// use folio_core::portfolio::compute_metrics;
/// use folio_core::{Holding, MarketData, MarketDatum};
///
/// let holdings = vec![Holding::new("AAA", 10.0, 1000.0)];
/// let mut market_data = MarketData::new();
/// market_data.insert("AAA".to_string(), MarketDatum::new("AAA", 120.0, 5.0));
///
/// let snapshot = compute_metrics(&holdings, &market_data);
/// assert_eq!(snapshot.current_value, 1200.0);
/// assert_eq!(snapshot.total_pl, 200.0);
/// ```
pub fn compute_metrics(holdings: &[Holding], market_data: &MarketData) -> PortfolioSnapshot {
    if holdings.is_empty() {
        return PortfolioSnapshot::default();
    }

    let rows = holding_breakdown(holdings, market_data);

    let mut total_invested = 0.0;
    let mut current_value = 0.0;
    let mut daily_pl = 0.0;
    let mut weighted_beta_sum = 0.0;
    let mut weighted_sharpe_sum = 0.0;

    for row in &rows {
        total_invested += row.total_cost;
        current_value += row.market_value;
        daily_pl += row.daily_pl;

        if let Some(beta) = row.beta {
            weighted_beta_sum += beta * row.market_value;
        }
        if let Some(sharpe) = row.sharpe_ratio {
            weighted_sharpe_sum += sharpe * row.market_value;
        }
    }

    let total_pl = current_value - total_invested;
    let weighted = |sum: f64| {
        if current_value > 0.0 {
            Ratio::Value(finite_or_zero(sum / current_value))
        } else {
            Ratio::NotAvailable
        }
    };

    let (best_performer, worst_performer) = rank_performers(&rows);

    PortfolioSnapshot {
        total_invested,
        current_value,
        total_pl,
        total_pl_percent: pl_percent(total_pl, total_invested),
        daily_pl,
        best_performer,
        worst_performer,
        positions_count: rows.len(),
        portfolio_beta: weighted(weighted_beta_sum),
        sharpe_ratio: weighted(weighted_sharpe_sum),
    }
}

/// Best and worst performers by P/L percent.
///
/// Ranking is a stable descending sort, so ties keep input order.
fn rank_performers(rows: &[HoldingBreakdown]) -> (Performer, Performer) {
    let mut ranked: Vec<&HoldingBreakdown> = rows.iter().collect();
    ranked.sort_by(|a, b| b.pl_percent.total_cmp(&a.pl_percent));

    let to_performer = |row: &HoldingBreakdown| Performer {
        symbol: row.symbol.clone(),
        pl: row.pl,
        pl_percent: row.pl_percent,
    };

    match (ranked.first(), ranked.last()) {
        (Some(best), Some(worst)) => (to_performer(best), to_performer(worst)),
        _ => (Performer::default(), Performer::default()),
    }
}
