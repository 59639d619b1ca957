//! Folio CLI - Command line interface for portfolio analytics.
//!
//! Every command prints a JSON `ApiResponse` on stdout. Logs go to stderr and
//! are controlled with `RUST_LOG`.

use clap::{Parser, Subcommand};
use folio_core::{
    coerce::market_data_from_records,
    compute_allocation, compute_metrics,
    format::{format_currency, format_percent, format_ratio},
    stats, ApiResponse, HoldingBook, MarketData, Projection, Settings,
};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio CLI - portfolio metrics and savings projections")]
#[command(version)]
struct Cli {
    /// Holdings JSON file (overrides settings)
    #[arg(long, global = true)]
    holdings: Option<PathBuf>,

    /// Market data JSON file (overrides settings)
    #[arg(long, global = true)]
    market_data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate portfolio metrics
    Metrics,
    /// Allocation and performance chart data
    Allocation,
    /// Project savings versus compounded growth
    Project {
        /// Initial investment
        #[arg(short, long)]
        initial: Option<f64>,
        /// Monthly contribution
        #[arg(short, long)]
        monthly: Option<f64>,
        /// Horizon in years
        #[arg(short, long)]
        years: Option<u32>,
        /// Expected annual return in percent
        #[arg(short, long)]
        rate: Option<f64>,
    },
    /// Descriptive statistics for one or two series
    Stats {
        /// First series (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        a: Vec<f64>,
        /// Second series (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        b: Vec<f64>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        }
    };
    let holdings_path = cli.holdings.unwrap_or_else(|| settings.holdings_file.clone());
    let market_data_path = cli
        .market_data
        .unwrap_or_else(|| settings.market_data_file.clone());

    let output = match cli.command {
        Commands::Metrics => handle_metrics(&holdings_path, &market_data_path),
        Commands::Allocation => handle_allocation(&holdings_path, &market_data_path),
        Commands::Project {
            initial,
            monthly,
            years,
            rate,
        } => {
            let mut params = settings.projection;
            if let Some(initial) = initial {
                params.initial_investment = initial;
            }
            if let Some(monthly) = monthly {
                params.monthly_contribution = monthly;
            }
            if let Some(years) = years {
                params.years = years;
            }
            if let Some(rate) = rate {
                params.annual_return_percent = rate;
            }
            render(&ApiResponse::ok(Projection::compute(params)))
        }
        Commands::Stats { a, b } => handle_stats(&a, &b),
    };

    println!("{}", output);
}

fn render<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|e| {
        format!(
            "{{\"ok\":false,\"error\":\"Failed to serialize response: {}\"}}",
            e
        )
    })
}

fn error(message: impl Into<String>) -> String {
    render(&ApiResponse::<()>::err(message))
}

fn load_market_data(path: &Path) -> folio_core::Result<MarketData> {
    if !path.exists() {
        tracing::warn!("Market data file not found: {}", path.display());
        return Ok(MarketData::new());
    }
    let content = fs::read_to_string(path)?;
    let raw: serde_json::Value = serde_json::from_str(&content)?;
    Ok(market_data_from_records(&raw))
}

fn load_inputs(
    holdings_path: &Path,
    market_data_path: &Path,
) -> folio_core::Result<(HoldingBook, MarketData)> {
    let book = HoldingBook::load_from_path(holdings_path)?;
    let market_data = load_market_data(market_data_path)?;
    Ok((book, market_data))
}

fn handle_metrics(holdings_path: &Path, market_data_path: &Path) -> String {
    let (book, market_data) = match load_inputs(holdings_path, market_data_path) {
        Ok(inputs) => inputs,
        Err(e) => return error(e.to_string()),
    };

    let snapshot = compute_metrics(book.holdings(), &market_data);
    render(&ApiResponse::ok(json!({
        "snapshot": snapshot,
        "display": {
            "totalInvested": format_currency(snapshot.total_invested),
            "currentValue": format_currency(snapshot.current_value),
            "totalPL": format_currency(snapshot.total_pl),
            "totalPLPercent": format_percent(snapshot.total_pl_percent),
            "dailyPL": format_currency(snapshot.daily_pl),
            "portfolioBeta": format_ratio(snapshot.portfolio_beta),
            "sharpeRatio": format_ratio(snapshot.sharpe_ratio),
        },
    })))
}

fn handle_allocation(holdings_path: &Path, market_data_path: &Path) -> String {
    match load_inputs(holdings_path, market_data_path) {
        Ok((book, market_data)) => {
            render(&ApiResponse::ok(compute_allocation(book.holdings(), &market_data)))
        }
        Err(e) => error(e.to_string()),
    }
}

fn handle_stats(a: &[f64], b: &[f64]) -> String {
    let mut result = json!({
        "mean": stats::mean(a),
        "std": stats::std(a),
    });

    if !b.is_empty() {
        result["covariance"] = json!(stats::covariance(a, b));
        result["correlation"] = json!(stats::correlation(a, b));
    }

    render(&ApiResponse::ok(result))
}
