//! Calculation logic for the payroll engine.
//!
//! This module contains the period proration rules, transport allowance
//! eligibility, social security deductions and employer contributions,
//! benefit provisions, the per-employee payroll line, period aggregation
//! and the cost-center report.
//!
//! All functions are pure: they read an [`Employee`](crate::models::Employee)
//! and a [`PayrollConfiguration`](crate::config::PayrollConfiguration) and
//! return new values. Amounts are exact decimals and are never rounded here.

mod aggregate;
mod cost_center;
mod payroll_line;
mod period;
mod provisions;
mod social_security;
mod transport_allowance;

use rust_decimal::Decimal;

pub use aggregate::{aggregate, aggregate_lines, compute_lines, liquidate_period};
pub use cost_center::{
    UNASSIGNED_COST_CENTER_CODE, UNASSIGNED_COST_CENTER_NAME, build_report, build_year_report,
};
pub use payroll_line::compute_line;
pub use period::{
    PeriodProration, REFERENCE_MONTH_DAYS, days_in_period, parse_period_date, period_factor,
};
pub use provisions::{Provisions, monthly_cesantias_interest, provisions};
pub use social_security::{
    EmployeeDeductions, EmployerContributions, employee_deductions, employer_contributions,
};
pub use transport_allowance::{
    TRANSPORT_ALLOWANCE_WAGE_MULTIPLE, is_transport_allowance_eligible, transport_allowance,
};

/// Largest salary or configured amount the engine accepts, in pesos.
///
/// Bounds every input so that prorated amounts, contributions and period
/// sums stay well inside the range of [`Decimal`].
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Largest period factor the engine accepts. Covers the longest span
/// representable by a calendar date.
pub const MAX_PERIOD_FACTOR: i64 = 10_000_000;

/// Largest configured percentage.
pub const MAX_PERCENTAGE: i64 = 100;

/// `base * percentage / 100`.
pub(crate) fn percent_of(base: Decimal, percentage: Decimal) -> Decimal {
    base * percentage / Decimal::ONE_HUNDRED
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use crate::config::PayrollConfiguration;

    pub fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Same rates as `config/tenants/acme.yaml`.
    pub fn test_config() -> PayrollConfiguration {
        PayrollConfiguration {
            tenant_id: "acme".to_string(),
            minimum_wage: dec("1300000"),
            transport_allowance: dec("162000"),
            health_percentage_employee: dec("4"),
            health_percentage_employer: dec("8.5"),
            pension_percentage_employee: dec("4"),
            pension_percentage_employer: dec("12"),
            parafiscal_caja_percentage: dec("4"),
            parafiscal_sena_percentage: dec("2"),
            parafiscal_icbf_percentage: dec("3"),
            prima_percentage: dec("8.33"),
            cesantias_percentage: dec("8.33"),
            intereses_cesantias_percentage: dec("12"),
            vacaciones_percentage: dec("4.17"),
        }
    }
}
