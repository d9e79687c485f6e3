//! Period length and proration.
//!
//! Every amount is prorated against a fixed 30-day reference month,
//! whatever the actual length of the calendar month.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::PayrollPeriod;

/// Length of the reference month used for all proration.
pub const REFERENCE_MONTH_DAYS: u32 = 30;

/// Returns the number of calendar days in a period, both ends inclusive.
///
/// When either boundary is absent the period is assumed to be a full
/// reference month. A reversed range (`end < start`) is measured by its
/// absolute length and logged as suspicious input.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::days_in_period;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1);
/// let end = NaiveDate::from_ymd_opt(2025, 1, 15);
/// assert_eq!(days_in_period(start, end), 15);
/// assert_eq!(days_in_period(None, end), 30);
/// ```
pub fn days_in_period(start: Option<NaiveDate>, end: Option<NaiveDate>) -> u32 {
    let (Some(start), Some(end)) = (start, end) else {
        return REFERENCE_MONTH_DAYS;
    };

    if end < start {
        warn!(
            start_date = %start,
            end_date = %end,
            "Period end date precedes start date, using absolute length"
        );
    }

    let days = (end - start).num_days().unsigned_abs() + 1;
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Returns the proration factor `days / 30`.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::period_factor;
/// use rust_decimal::Decimal;
///
/// assert_eq!(period_factor(15), Decimal::new(5, 1));
/// assert_eq!(period_factor(30), Decimal::ONE);
/// ```
pub fn period_factor(days_in_period: u32) -> Decimal {
    Decimal::from(days_in_period) / Decimal::from(REFERENCE_MONTH_DAYS)
}

/// Parses a `YYYY-MM-DD` period boundary.
///
/// # Errors
///
/// Returns `InvalidPeriod` naming the field when the value is not a valid date.
pub fn parse_period_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| EngineError::InvalidPeriod {
        message: format!("{} '{}' is not a valid date: {}", field, value, e),
    })
}

/// Days and factor for one period, derived from its boundary dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodProration {
    /// Calendar days, both ends inclusive.
    pub days_in_period: u32,
    /// `days_in_period / 30`.
    pub period_factor: Decimal,
}

impl PeriodProration {
    /// Derives the proration from optional boundary dates.
    pub fn from_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let days_in_period = days_in_period(start, end);
        Self {
            days_in_period,
            period_factor: period_factor(days_in_period),
        }
    }

    /// Derives the proration from a period's boundary dates.
    pub fn from_period(period: &PayrollPeriod) -> Self {
        Self::from_dates(period.start_date, period.end_date)
    }
}
