//! Social security: employee deductions and employer contributions.
//!
//! Both are percentages of the contribution base (IBC), which is the
//! prorated salary without the transport allowance.

use rust_decimal::Decimal;

use crate::config::PayrollConfiguration;
use crate::models::ArlRiskLevel;

use super::percent_of;

/// Employee health and pension deductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeDeductions {
    /// Health (salud) deduction.
    pub health: Decimal,
    /// Pension deduction.
    pub pension: Decimal,
    /// `health + pension`.
    pub total: Decimal,
}

/// Computes the employee's deductions over the contribution base.
pub fn employee_deductions(
    contribution_base: Decimal,
    config: &PayrollConfiguration,
) -> EmployeeDeductions {
    let health = percent_of(contribution_base, config.health_percentage_employee);
    let pension = percent_of(contribution_base, config.pension_percentage_employee);

    EmployeeDeductions {
        health,
        pension,
        total: health + pension,
    }
}

/// Employer contributions: social security and parafiscales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployerContributions {
    /// Employer health contribution.
    pub health: Decimal,
    /// Employer pension contribution.
    pub pension: Decimal,
    /// ARL rate applied, percent.
    pub arl_rate: Decimal,
    /// ARL contribution.
    pub arl: Decimal,
    /// Caja de compensación familiar.
    pub caja_compensacion: Decimal,
    /// ICBF.
    pub icbf: Decimal,
    /// SENA.
    pub sena: Decimal,
    /// Sum of the six contributions.
    pub total: Decimal,
}

/// Computes the employer's contributions over the contribution base.
///
/// The ARL rate comes from the employee's risk class.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::employer_contributions;
/// use nomina_engine::config::{ConfigLoader, ConfigurationProvider};
/// use nomina_engine::models::ArlRiskLevel;
/// use rust_decimal::Decimal;
///
/// # let loader = ConfigLoader::load("./config").unwrap();
/// # let config = loader.configuration("acme").unwrap();
/// let contributions =
///     employer_contributions(Decimal::from(1_000_000), ArlRiskLevel::RiesgoIII, config);
/// assert_eq!(contributions.arl, Decimal::from(24_360));
/// ```
pub fn employer_contributions(
    contribution_base: Decimal,
    risk_level: ArlRiskLevel,
    config: &PayrollConfiguration,
) -> EmployerContributions {
    let health = percent_of(contribution_base, config.health_percentage_employer);
    let pension = percent_of(contribution_base, config.pension_percentage_employer);
    let arl_rate = risk_level.percentage();
    let arl = percent_of(contribution_base, arl_rate);
    let caja_compensacion = percent_of(contribution_base, config.parafiscal_caja_percentage);
    let icbf = percent_of(contribution_base, config.parafiscal_icbf_percentage);
    let sena = percent_of(contribution_base, config.parafiscal_sena_percentage);

    EmployerContributions {
        health,
        pension,
        arl_rate,
        arl,
        caja_compensacion,
        icbf,
        sena,
        total: health + pension + arl + caja_compensacion + icbf + sena,
    }
}
