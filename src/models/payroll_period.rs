//! Payroll period model.
//!
//! Periods are created and moved through their lifecycle by external
//! workflows. The engine reads their boundary dates for proration and
//! their status to decide whether they count towards consolidated reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Employee;

/// Payroll frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodType {
    /// Seven-day period.
    Weekly,
    /// Fortnightly (quincenal) period.
    Biweekly,
    /// Monthly period.
    Monthly,
}

impl PeriodType {
    /// Returns the wire name, e.g. `BIWEEKLY`.
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodType::Weekly => "WEEKLY",
            PeriodType::Biweekly => "BIWEEKLY",
            PeriodType::Monthly => "MONTHLY",
        }
    }
}

/// Lifecycle status of a payroll period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodStatus {
    /// Accepting changes.
    #[default]
    Open,
    /// Computed and receipts generated, ready for payment.
    Liquidated,
    /// Some employees paid.
    PartiallyPaid,
    /// All employees paid.
    Paid,
    /// Closed for accounting; immutable.
    Closed,
}

/// A payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Payroll frequency.
    pub period_type: PeriodType,
    /// Ordinal of the period within the year (1, 2, 3...).
    pub period_number: u32,
    /// Calendar year.
    pub year: i32,
    /// First day of the period (inclusive).
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the period (inclusive).
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: PeriodStatus,
}

impl PayrollPeriod {
    /// Returns a display name such as `BIWEEKLY 1/2025`.
    pub fn period_name(&self) -> String {
        format!(
            "{} {}/{}",
            self.period_type.as_str(),
            self.period_number,
            self.year
        )
    }

    /// Returns true once the period has left `OPEN`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nomina_engine::models::{PayrollPeriod, PeriodStatus, PeriodType};
    ///
    /// let mut period = PayrollPeriod {
    ///     period_type: PeriodType::Monthly,
    ///     period_number: 3,
    ///     year: 2025,
    ///     start_date: None,
    ///     end_date: None,
    ///     status: PeriodStatus::Open,
    /// };
    /// assert!(!period.is_processed());
    ///
    /// period.status = PeriodStatus::Paid;
    /// assert!(period.is_processed());
    /// ```
    pub fn is_processed(&self) -> bool {
        self.status != PeriodStatus::Open
    }
}

/// One period together with the employees liquidated in it.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodPayroll {
    /// The period.
    pub period: PayrollPeriod,
    /// Normalized employees paid in the period.
    pub employees: Vec<Employee>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_period(status: PeriodStatus) -> PayrollPeriod {
        PayrollPeriod {
            period_type: PeriodType::Biweekly,
            period_number: 1,
            year: 2025,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 15),
            status,
        }
    }

    #[test]
    fn test_period_name() {
        assert_eq!(create_period(PeriodStatus::Open).period_name(), "BIWEEKLY 1/2025");
    }

    #[test]
    fn test_only_open_periods_are_unprocessed() {
        assert!(!create_period(PeriodStatus::Open).is_processed());
        for status in [
            PeriodStatus::Liquidated,
            PeriodStatus::PartiallyPaid,
            PeriodStatus::Paid,
            PeriodStatus::Closed,
        ] {
            assert!(create_period(status).is_processed(), "{:?}", status);
        }
    }

    #[test]
    fn test_deserialize_period() {
        let json = r#"{
            "period_type": "BIWEEKLY",
            "period_number": 2,
            "year": 2025,
            "start_date": "2025-01-16",
            "end_date": "2025-01-31",
            "status": "PARTIALLY_PAID"
        }"#;

        let period: PayrollPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.period_type, PeriodType::Biweekly);
        assert_eq!(period.status, PeriodStatus::PartiallyPaid);
        assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 1, 31));
    }

    #[test]
    fn test_status_defaults_to_open() {
        let json = r#"{ "period_type": "MONTHLY", "period_number": 1, "year": 2025 }"#;

        let period: PayrollPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.status, PeriodStatus::Open);
        assert_eq!(period.start_date, None);
    }
}
