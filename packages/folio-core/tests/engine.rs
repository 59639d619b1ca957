//! End-to-end checks across the engine: raw feed records through metrics,
//! chart data, projection and display formatting.

use approx::assert_relative_eq;
use folio_core::format::{format_currency, format_number, format_percent, format_ratio};
use folio_core::{
    compute_allocation, compute_metrics, market_data_from_records, project, stats, summarize,
    Holding, MarketData, ProjectionParams, Ratio,
};
use serde_json::json;

fn sample_holdings() -> Vec<Holding> {
    vec![
        Holding::new("AAA", 10.0, 1000.0),
        Holding::new("BBB", 4.0, 800.0),
        Holding::new("CCC", 100.0, 500.0),
    ]
}

fn sample_market_data() -> MarketData {
    market_data_from_records(&json!([
        {"symbol": "AAA", "05. price": "120", "10. change percent": "5%", "beta": "1.2"},
        {"symbol": "BBB", "price": 180.5, "changePercent": -1.5, "Beta": "None", "sharpe": 0.9},
        {"symbol": "CCC", "currentPrice": "", "price": "4.2", "dayChange": "None"}
    ]))
}

#[test]
fn raw_records_flow_into_metrics() {
    let holdings = sample_holdings();
    let market_data = sample_market_data();

    let snapshot = compute_metrics(&holdings, &market_data);

    let expected_value = 10.0 * 120.0 + 4.0 * 180.5 + 100.0 * 4.2;
    assert_relative_eq!(snapshot.current_value, expected_value, epsilon = 1e-9);
    assert_relative_eq!(snapshot.total_invested, 2300.0);
    assert_relative_eq!(
        snapshot.total_pl,
        expected_value - 2300.0,
        epsilon = 1e-9
    );
    assert_eq!(snapshot.positions_count, 3);
    assert_eq!(snapshot.best_performer.symbol, "AAA");
    assert_eq!(snapshot.worst_performer.symbol, "CCC");

    // Only AAA carries a beta; BBB and CCC dilute it through the denominator
    let beta = snapshot.portfolio_beta.value().unwrap();
    assert_relative_eq!(beta, 1.2 * 1200.0 / expected_value, epsilon = 1e-12);
    let sharpe = snapshot.sharpe_ratio.value().unwrap();
    assert_relative_eq!(sharpe, 0.9 * 722.0 / expected_value, epsilon = 1e-12);
}

#[test]
fn metrics_are_deterministic_and_do_not_touch_inputs() {
    let holdings = sample_holdings();
    let market_data = sample_market_data();
    let market_before = market_data.clone();

    let first = compute_metrics(&holdings, &market_data);
    let second = compute_metrics(&holdings, &market_data);

    assert_eq!(first, second);
    assert_eq!(market_data, market_before);
}

#[test]
fn empty_portfolio_defaults() {
    let snapshot = compute_metrics(&[], &MarketData::new());
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["totalInvested"], 0.0);
    assert_eq!(json["currentValue"], 0.0);
    assert_eq!(json["totalPL"], 0.0);
    assert_eq!(json["positionsCount"], 0);
    assert_eq!(json["bestPerformer"]["symbol"], "N/A");
    assert_eq!(json["portfolioBeta"], "N/A");
    assert_eq!(format_ratio(snapshot.sharpe_ratio), "N/A");
}

#[test]
fn allocation_agrees_with_metrics() {
    let holdings = sample_holdings();
    let market_data = sample_market_data();

    let snapshot = compute_metrics(&holdings, &market_data);
    let chart = compute_allocation(&holdings, &market_data);

    let allocated: f64 = chart.allocation.iter().map(|a| a.market_value).sum();
    assert_relative_eq!(allocated, snapshot.current_value, epsilon = 1e-9);

    let shares: f64 = chart.allocation.iter().map(|a| a.share_percent).sum();
    assert_relative_eq!(shares, 1.0, epsilon = 1e-12);

    let symbols: Vec<&str> = chart.performance.iter().map(|p| p.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAA", "BBB", "CCC"]);
    assert_relative_eq!(chart.performance[0].profit_loss_percent, 20.0);
}

#[test]
fn projection_growth_scenario() {
    let points = project(&ProjectionParams {
        initial_investment: 1000.0,
        monthly_contribution: 0.0,
        years: 1,
        annual_return_percent: 10.0,
    });
    let summary = summarize(&points);

    assert_eq!(points[0].savings_only, 1000.0);
    assert_relative_eq!(points[0].compounded, 1100.0, epsilon = 1e-9);
    assert_relative_eq!(summary.absolute_gain, 100.0, epsilon = 1e-9);
}

#[test]
fn statistics_scenarios() {
    assert_eq!(stats::mean(&[]), 0.0);
    assert_eq!(stats::std(&[7.0]), 0.0);
    assert_eq!(
        stats::covariance(&[1.0, 2.0, 3.0, 4.0], &[10.0, 20.0]),
        stats::covariance(&[3.0, 4.0], &[10.0, 20.0])
    );
    let series = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    assert_relative_eq!(stats::correlation(&series, &series), 1.0, epsilon = 1e-12);
}

#[test]
fn display_rendering() {
    let snapshot = compute_metrics(
        &[Holding::new("AAA", 10.0, 1000.0)],
        &market_data_from_records(&json!({"AAA": {"currentPrice": 120, "dayChange": 5}})),
    );

    assert_eq!(format_currency(snapshot.current_value), "$1,200.00");
    assert_eq!(format_percent(snapshot.total_pl_percent), "20.00%");
    assert_eq!(format_currency(snapshot.daily_pl), "$57.14");
    assert_eq!(snapshot.portfolio_beta, Ratio::Value(0.0));
    assert_eq!(format_number(Some(f64::NAN)), "N/A");
}
