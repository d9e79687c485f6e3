//! Transport allowance (auxilio de transporte).
//!
//! Paid to employees earning up to two minimum wages. Eligibility is
//! judged on the monthly base salary, never on the prorated amount.

use rust_decimal::Decimal;

use crate::config::PayrollConfiguration;
use crate::models::Employee;

/// Number of minimum wages up to which the allowance is paid.
pub const TRANSPORT_ALLOWANCE_WAGE_MULTIPLE: u32 = 2;

/// Returns true if the employee is entitled to the transport allowance.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::is_transport_allowance_eligible;
/// use nomina_engine::config::{ConfigLoader, ConfigurationProvider};
/// use nomina_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// # let loader = ConfigLoader::load("./config").unwrap();
/// # let config = loader.configuration("acme").unwrap();
/// let at_threshold = Employee::new("e1", config.minimum_wage * Decimal::from(2));
/// assert!(is_transport_allowance_eligible(&at_threshold, config));
///
/// let opted_out = Employee::new("e2", config.minimum_wage).without_transport_allowance();
/// assert!(!is_transport_allowance_eligible(&opted_out, config));
/// ```
pub fn is_transport_allowance_eligible(employee: &Employee, config: &PayrollConfiguration) -> bool {
    let threshold = config.minimum_wage * Decimal::from(TRANSPORT_ALLOWANCE_WAGE_MULTIPLE);
    employee.has_transport_allowance && employee.base_salary <= threshold
}

/// Returns the prorated transport allowance, zero when not eligible.
pub fn transport_allowance(
    employee: &Employee,
    config: &PayrollConfiguration,
    period_factor: Decimal,
) -> Decimal {
    if is_transport_allowance_eligible(employee, config) {
        config.transport_allowance * period_factor
    } else {
        Decimal::ZERO
    }
}
