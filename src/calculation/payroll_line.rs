//! Payroll line computation.
//!
//! This is the single place where an employee's period pay is derived.
//! Every consumer (period liquidation, cost-center reporting, the HTTP
//! API) goes through [`compute_line`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayrollConfiguration;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayrollLine};

use super::provisions::provisions;
use super::{MAX_AMOUNT, MAX_PERIOD_FACTOR};
use super::social_security::{employee_deductions, employer_contributions};
use super::transport_allowance::transport_allowance;

/// Computes the full payroll breakdown for one employee.
///
/// # Arguments
///
/// * `employee` - The normalized employee
/// * `config` - The tenant configuration snapshot
/// * `period_factor` - `days_in_period / 30`
///
/// # Algorithm
///
/// 1. `period_salary = base_salary * period_factor`
/// 2. Transport allowance when eligible (monthly salary at most two
///    minimum wages), prorated by the same factor
/// 3. Contribution base = `period_salary` (transport allowance excluded)
/// 4. Employee health and pension deductions on the contribution base
/// 5. `net_pay = period_salary + transport_allowance - deductions`
/// 6. Employer health, pension, ARL and parafiscales on the contribution base
/// 7. Provisions base = `period_salary + transport_allowance`
/// 8. Prima and cesantías on the provisions base, monthly interest on
///    cesantías, vacaciones on `period_salary` only
/// 9. `total_cost = period_salary + transport_allowance + contributions + provisions`
///
/// # Errors
///
/// - `InvalidEmployee` if the base salary is negative or above [`MAX_AMOUNT`]
/// - `InvalidConfiguration` if any rate is out of range or the minimum wage is not positive
/// - `InvalidPeriod` if the factor is negative or above [`MAX_PERIOD_FACTOR`]
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::compute_line;
/// use nomina_engine::config::{ConfigLoader, ConfigurationProvider};
/// use nomina_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// let config = loader.configuration("acme").unwrap();
/// let employee = Employee::new("emp_001", Decimal::from(1_300_000));
///
/// let line = compute_line(&employee, config, Decimal::new(5, 1)).unwrap();
/// assert_eq!(line.net_pay, Decimal::from(679_000));
/// ```
pub fn compute_line(
    employee: &Employee,
    config: &PayrollConfiguration,
    period_factor: Decimal,
) -> EngineResult<PayrollLine> {
    if employee.base_salary < Decimal::ZERO {
        return Err(EngineError::InvalidEmployee {
            employee_id: employee.id.clone(),
            field: "base_salary".to_string(),
            message: format!("must not be negative, got {}", employee.base_salary),
        });
    }

    if employee.base_salary > Decimal::from(MAX_AMOUNT) {
        return Err(EngineError::InvalidEmployee {
            employee_id: employee.id.clone(),
            field: "base_salary".to_string(),
            message: format!("must not exceed {}, got {}", MAX_AMOUNT, employee.base_salary),
        });
    }

    if period_factor < Decimal::ZERO {
        return Err(EngineError::InvalidPeriod {
            message: format!("period factor must not be negative, got {}", period_factor),
        });
    }

    if period_factor > Decimal::from(MAX_PERIOD_FACTOR) {
        return Err(EngineError::InvalidPeriod {
            message: format!(
                "period factor must not exceed {}, got {}",
                MAX_PERIOD_FACTOR, period_factor
            ),
        });
    }

    config.validate()?;

    let period_salary = employee.base_salary * period_factor;
    let transport_allowance = transport_allowance(employee, config, period_factor);

    let contribution_base = period_salary;
    let deductions = employee_deductions(contribution_base, config);
    let net_pay = period_salary + transport_allowance - deductions.total;

    let contributions =
        employer_contributions(contribution_base, employee.arl_risk_level, config);
    let provisions = provisions(period_salary, transport_allowance, config);

    let total_cost = period_salary + transport_allowance + contributions.total + provisions.total;

    debug!(
        employee_id = %employee.id,
        period_salary = %period_salary,
        transport_allowance = %transport_allowance,
        net_pay = %net_pay,
        total_cost = %total_cost,
        "Computed payroll line"
    );

    Ok(PayrollLine {
        employee_id: employee.id.clone(),
        period_salary,
        transport_allowance,
        contribution_base,
        health_employee: deductions.health,
        pension_employee: deductions.pension,
        total_deductions: deductions.total,
        net_pay,
        health_employer: contributions.health,
        pension_employer: contributions.pension,
        arl_rate: contributions.arl_rate,
        arl: contributions.arl,
        caja_compensacion: contributions.caja_compensacion,
        icbf: contributions.icbf,
        sena: contributions.sena,
        total_employer_contributions: contributions.total,
        provisions_base: provisions.base,
        prima: provisions.prima,
        cesantias: provisions.cesantias,
        intereses_cesantias: provisions.intereses_cesantias,
        vacaciones: provisions.vacaciones,
        total_provisions: provisions.total,
        total_cost,
    })
}
