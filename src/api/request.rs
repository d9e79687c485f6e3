//! Request types for the payroll engine API.
//!
//! Both `/payroll/liquidate` and `/payroll/cost-by-center` accept the same
//! [`PayrollRequest`] body. `/payroll/cost-by-center/year` takes a
//! [`YearReportRequest`] listing several periods.

use serde::{Deserialize, Serialize};

use crate::calculation::{PeriodProration, parse_period_date};
use crate::error::EngineResult;
use crate::models::{Employee, EmployeeRecord, PayrollPeriod, PeriodPayroll};

/// Request body for the payroll endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The tenant whose configuration applies.
    pub tenant_id: String,
    /// The period being liquidated. Omitted dates mean a full month.
    #[serde(default)]
    pub period: PeriodRequest,
    /// The employees to include.
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
}

/// Period boundaries in a payroll request, as `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// First day of the period (inclusive).
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day of the period (inclusive).
    #[serde(default)]
    pub end_date: Option<String>,
}

impl PeriodRequest {
    /// Parses the boundary dates and derives the proration.
    ///
    /// Dates are kept as strings on the wire so a malformed date is
    /// reported as an `InvalidPeriod` rather than a JSON error.
    pub fn proration(&self) -> EngineResult<PeriodProration> {
        let start = self
            .start_date
            .as_deref()
            .map(|value| parse_period_date("start_date", value))
            .transpose()?;
        let end = self
            .end_date
            .as_deref()
            .map(|value| parse_period_date("end_date", value))
            .transpose()?;

        Ok(PeriodProration::from_dates(start, end))
    }
}

impl PayrollRequest {
    /// Normalizes every employee record, failing on the first invalid one.
    pub fn normalized_employees(&self) -> EngineResult<Vec<Employee>> {
        self.employees
            .iter()
            .cloned()
            .map(Employee::from_record)
            .collect()
    }
}

/// Request body for the yearly cost-center report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearReportRequest {
    /// The tenant whose configuration applies.
    pub tenant_id: String,
    /// Calendar year to report.
    pub year: i32,
    /// Candidate periods. Open periods and other years are skipped.
    #[serde(default)]
    pub periods: Vec<PeriodPayrollRequest>,
}

/// One period and the employees paid in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodPayrollRequest {
    /// The period, including its lifecycle status.
    pub period: PayrollPeriod,
    /// The employees paid in the period.
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
}

impl YearReportRequest {
    /// Normalizes the employees of every period, failing on the first
    /// invalid one.
    pub fn normalized_periods(&self) -> EngineResult<Vec<PeriodPayroll>> {
        self.periods
            .iter()
            .map(|entry| {
                let employees = entry
                    .employees
                    .iter()
                    .cloned()
                    .map(Employee::from_record)
                    .collect::<EngineResult<Vec<_>>>()?;
                Ok(PeriodPayroll {
                    period: entry.period.clone(),
                    employees,
                })
            })
            .collect()
    }
}
