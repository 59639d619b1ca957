//! Compound growth projection for savings and retirement planning.
//!
//! Contrasts a plain savings balance (contributions only) with the same
//! contributions invested at a fixed annual return, year by year.

use crate::types::{ProjectionParams, ProjectionPoint, ProjectionSummary};
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Clamp an input to a finite, non-negative value.
fn sanitize(value: f64, field: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::debug!(field, value, "projection input out of range, using 0");
        0.0
    }
}

/// Clamp overflowed values to the largest finite `f64`; NaN becomes 0.
fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else if value.is_infinite() {
        f64::MAX.copysign(value)
    } else {
        value
    }
}

/// Growth factor minus one, `(1 + rate)^periods - 1`.
///
/// Computed through `ln_1p`/`exp_m1` so rates far below machine epsilon
/// still produce a positive result.
fn growth_m1(rate: f64, periods: f64) -> f64 {
    (periods * rate.ln_1p()).exp_m1()
}

/// Future value of a stream of equal monthly contributions.
///
/// Falls back to the plain sum when the monthly rate is zero.
fn contributions_future_value(monthly_contribution: f64, monthly_rate: f64, months: f64) -> f64 {
    if monthly_rate > 0.0 {
        monthly_contribution * growth_m1(monthly_rate, months) / monthly_rate
    } else {
        monthly_contribution * months
    }
}

/// Project savings-only and compounded balances for each year.
///
/// Returns one point per year from 1 to `years`, ascending. A zero horizon
/// yields an empty series. Negative or non-finite amounts are treated as 0.
/// Balances that overflow saturate at `f64::MAX`, and the compounded balance
/// is never below the savings-only balance.
///
/// ```rust
/// use folio_core::projection::project;
/// use folio_core::ProjectionParams;
///
/// let points = project(&ProjectionParams {
///     initial_investment: 1000.0,
///     monthly_contribution: 0.0,
///     years: 1,
///     annual_return_percent: 10.0,
/// });
/// assert_eq!(points[0].savings_only, 1000.0);
/// assert!((points[0].compounded - 1100.0).abs() < 1e-9);
/// ```
pub fn project(params: &ProjectionParams) -> Vec<ProjectionPoint> {
    let initial = sanitize(params.initial_investment, "initial_investment");
    let monthly = sanitize(params.monthly_contribution, "monthly_contribution");
    let annual_rate = sanitize(params.annual_return_percent, "annual_return_percent") / 100.0;
    let monthly_rate = annual_rate / MONTHS_PER_YEAR;

    (1..=params.years)
        .map(|period| {
            let years = f64::from(period);
            let months = years * MONTHS_PER_YEAR;

            let savings_only = saturate(initial + monthly * months);
            let initial_future_value = initial + initial * growth_m1(annual_rate, years);
            let compounded = saturate(
                initial_future_value + contributions_future_value(monthly, monthly_rate, months),
            )
            .max(savings_only);

            ProjectionPoint {
                period,
                savings_only,
                compounded,
            }
        })
        .collect()
}

/// Summarize a projection from its final point.
///
/// An empty series yields an all-zero summary.
pub fn summarize(points: &[ProjectionPoint]) -> ProjectionSummary {
    let Some(last) = points.last() else {
        return ProjectionSummary::default();
    };

    let final_savings_only = saturate(last.savings_only);
    let final_compounded = saturate(last.compounded);
    let absolute_gain = saturate(final_compounded - final_savings_only);
    let relative_gain_percent = if final_savings_only > 0.0 {
        saturate(absolute_gain / final_savings_only * 100.0)
    } else {
        0.0
    };

    ProjectionSummary {
        final_savings_only,
        final_compounded,
        absolute_gain,
        relative_gain_percent,
    }
}

/// A full projection: the yearly series and its summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    pub params: ProjectionParams,
    pub points: Vec<ProjectionPoint>,
    pub summary: ProjectionSummary,
}

impl Projection {
    /// Run the projection and summarize it.
    pub fn compute(params: ProjectionParams) -> Self {
        let points = project(&params);
        let summary = summarize(&points);
        Self {
            params,
            points,
            summary,
        }
    }
}
