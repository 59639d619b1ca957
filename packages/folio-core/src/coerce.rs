//! Lenient coercion of raw upstream market-data records.
//!
//! Price feeds disagree on field names and encode missing values in several
//! ways (`null`, `""`, the string `"None"`). These helpers normalize raw JSON
//! records into [`MarketDatum`] values before they reach the aggregator.

use crate::types::{MarketData, MarketDatum};
use serde_json::Value;

/// Sentinel some feeds emit in place of a missing value.
const NONE_SENTINEL: &str = "None";

const PRICE_KEYS: &[&str] = &[
    "currentPrice",
    "price",
    "05. price",
    "regularMarketPrice",
    "c",
];
const DAY_CHANGE_KEYS: &[&str] = &[
    "dayChange",
    "changePercent",
    "10. change percent",
    "regularMarketChangePercent",
    "dp",
];
const BETA_KEYS: &[&str] = &["beta", "Beta"];
const SHARPE_KEYS: &[&str] = &["sharpeRatio", "SharpeRatio", "sharpe"];
const SYMBOL_KEYS: &[&str] = &["symbol", "01. symbol", "ticker", "Symbol"];

/// True for values that mean "no data".
fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || s == NONE_SENTINEL,
        _ => false,
    }
}

/// Parse a value into a finite number.
///
/// `null`, `""` and `"None"` are absent. Strings are trimmed and parsed, so a
/// whitespace-only string is also absent rather than 0. Booleans map to 1 and
/// 0. Anything non-finite or unparseable is `None`.
///
/// ```rust
/// use folio_core::coerce::to_number;
/// use serde_json::json;
///
/// assert_eq!(to_number(&json!("42")), Some(42.0));
/// assert_eq!(to_number(&json!("None")), None);
/// assert_eq!(to_number(&json!("")), None);
/// ```
pub fn to_number(value: &Value) -> Option<f64> {
    if is_absent(value) {
        return None;
    }

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    parsed.filter(|v| v.is_finite())
}

/// Parse a percentage that may carry a trailing `%` sign.
pub fn parse_percent(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            let stripped = trimmed.strip_suffix('%').unwrap_or(trimmed);
            to_number(&Value::String(stripped.to_string()))
        }
        other => to_number(other),
    }
}

/// Return the first value under `keys` (in order) that is present.
///
/// A value is present unless it is `null`, `""` or `"None"`. Returns `None`
/// when no key matches or `record` is not an object.
pub fn first_present<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = record.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !is_absent(value))
}

impl MarketDatum {
    /// Normalize a raw quote record into a datum.
    ///
    /// Price and day change default to 0 when absent; beta and Sharpe ratio
    /// stay unset so they do not enter weighted averages.
    pub fn from_record(symbol: &str, record: &Value) -> Self {
        let current_price = first_present(record, PRICE_KEYS)
            .and_then(to_number)
            .unwrap_or(0.0);
        let day_change = first_present(record, DAY_CHANGE_KEYS)
            .and_then(parse_percent)
            .unwrap_or(0.0);

        Self {
            symbol: symbol.to_uppercase(),
            current_price,
            day_change,
            beta: first_present(record, BETA_KEYS).and_then(to_number),
            sharpe_ratio: first_present(record, SHARPE_KEYS).and_then(to_number),
        }
    }
}

/// Build a market-data map from raw feed output.
///
/// Accepts either an object keyed by symbol or an array of records that each
/// carry a symbol field. Entries without a usable symbol are skipped.
pub fn market_data_from_records(raw: &Value) -> MarketData {
    let mut data = MarketData::new();

    match raw {
        Value::Object(map) => {
            for (symbol, record) in map {
                if !record.is_object() {
                    tracing::debug!(symbol = %symbol, "skipping non-object market data record");
                    continue;
                }
                let datum = MarketDatum::from_record(symbol, record);
                data.insert(datum.symbol.clone(), datum);
            }
        }
        Value::Array(records) => {
            for record in records {
                let symbol = first_present(record, SYMBOL_KEYS).and_then(Value::as_str);
                match symbol {
                    Some(symbol) => {
                        let datum = MarketDatum::from_record(symbol, record);
                        data.insert(datum.symbol.clone(), datum);
                    }
                    None => tracing::debug!("skipping market data record without symbol"),
                }
            }
        }
        _ => tracing::debug!("market data is neither an object nor an array"),
    }

    data
}
