//! Performance metrics.
//!
//! All metrics take a series of periodic returns plus the number of periods
//! per year. Degenerate inputs (empty series, a single observation, zero
//! volatility) yield [`Metric::Undefined`] instead of a floating-point `NaN`,
//! so callers can tell "computed" from "mathematically undefined".

use std::fmt;

use rotation_traits::stats;
use serde::{Serialize, Serializer};

/// Why a metric could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Undefined {
    /// The series has no finite observations.
    EmptySeries,
    /// Compounded growth is negative and the annualizing exponent is
    /// fractional, so there is no real root.
    NegativeGrowth,
    /// Fewer than two observations; sample volatility needs two.
    TooFewObservations,
    /// Volatility is zero, so a ratio over it has no value.
    ZeroVolatility,
}

impl fmt::Display for Undefined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::EmptySeries => "empty series",
            Self::NegativeGrowth => "negative compounded growth",
            Self::TooFewObservations => "fewer than two observations",
            Self::ZeroVolatility => "zero volatility",
        };
        f.write_str(reason)
    }
}

/// A computed metric value, or the reason it is undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// A well-defined value.
    Value(f64),
    /// The metric has no value for this input.
    Undefined(Undefined),
}

impl Metric {
    /// The value, if defined.
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Undefined(_) => None,
        }
    }

    /// Whether the metric has a value.
    pub const fn is_defined(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

/// Values format like `f64` (honouring width and precision); undefined
/// metrics print as `NaN`.
impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => fmt::Display::fmt(v, f),
            Self::Undefined(_) => match f.width() {
                Some(width) if f.align() == Some(fmt::Alignment::Left) => {
                    write!(f, "{:<width$}", "NaN")
                }
                Some(width) => write!(f, "{:>width$}", "NaN"),
                None => f.write_str("NaN"),
            },
        }
    }
}

/// Serialized as a number, or `null` when undefined.
impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::Undefined(_) => serializer.serialize_none(),
        }
    }
}

/// Compound annual growth rate: `(Π(1 + r))^(periods / n) - 1`.
///
/// Non-finite returns are ignored. Negative compounded growth is undefined
/// unless `periods / n` is a whole number.
///
/// # Example
///
/// ```rust
/// use rotation_eval::{annualized_return, Metric};
///
/// let cagr = annualized_return(&[0.01; 12], 12);
/// assert!((cagr.value().unwrap() - (1.01_f64.powi(12) - 1.0)).abs() < 1e-12);
/// assert!(!annualized_return(&[], 12).is_defined());
/// ```
pub fn annualized_return(returns: &[f64], periods_per_year: usize) -> Metric {
    let valid = stats::finite(returns);
    if valid.is_empty() {
        return Metric::Undefined(Undefined::EmptySeries);
    }

    let growth: f64 = valid.iter().map(|r| 1.0 + r).product();
    let exponent = periods_per_year as f64 / valid.len() as f64;
    // A negative base only has a real power for whole exponents.
    if growth < 0.0 && exponent.fract() != 0.0 {
        return Metric::Undefined(Undefined::NegativeGrowth);
    }

    Metric::Value(growth.powf(exponent) - 1.0)
}

/// Annualized volatility: sample standard deviation × `sqrt(periods)`.
///
/// Non-finite returns are ignored. A constant series has exactly zero
/// volatility.
pub fn annualized_volatility(returns: &[f64], periods_per_year: usize) -> Metric {
    match stats::sample_std(returns) {
        Some(std) => Metric::Value(std * (periods_per_year as f64).sqrt()),
        None => Metric::Undefined(Undefined::TooFewObservations),
    }
}

/// Sharpe ratio of the excess series `r - rf / periods`.
///
/// Computed as the annualized return of the excess series divided by its
/// annualized volatility. Undefined when the excess volatility is zero.
pub fn sharpe_ratio(returns: &[f64], risk_free_annual: f64, periods_per_year: usize) -> Metric {
    let rf_per_period = risk_free_annual / periods_per_year as f64;
    let excess: Vec<f64> = returns.iter().map(|r| r - rf_per_period).collect();

    match (
        annualized_return(&excess, periods_per_year),
        annualized_volatility(&excess, periods_per_year),
    ) {
        (Metric::Value(ret), Metric::Value(vol)) if vol > 0.0 => Metric::Value(ret / vol),
        (Metric::Value(_), Metric::Value(_)) => Metric::Undefined(Undefined::ZeroVolatility),
        (Metric::Undefined(reason), _) | (_, Metric::Undefined(reason)) => {
            Metric::Undefined(reason)
        }
    }
}
