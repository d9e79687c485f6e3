//! Aggregated payroll results: period totals, cost-center totals, and the
//! liquidation envelope returned by the API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayrollLine;

/// Element-wise sums of [`PayrollLine`] fields across a group of employees.
///
/// # Example
///
/// ```
/// use nomina_engine::models::PeriodTotals;
///
/// let totals = PeriodTotals::default();
/// assert_eq!(totals.total_employees, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Number of employees summed.
    pub total_employees: usize,
    /// Total prorated salaries.
    pub period_salary: Decimal,
    /// Total transport allowance.
    pub transport_allowance: Decimal,
    /// Total social-security base.
    pub contribution_base: Decimal,
    /// Total employee health deductions.
    pub health_employee: Decimal,
    /// Total employee pension deductions.
    pub pension_employee: Decimal,
    /// Total employee deductions.
    pub total_deductions: Decimal,
    /// Total net pay.
    pub net_pay: Decimal,
    /// Total employer health contributions.
    pub health_employer: Decimal,
    /// Total employer pension contributions.
    pub pension_employer: Decimal,
    /// Total ARL contributions.
    pub arl: Decimal,
    /// Employer social security: health + pension + ARL.
    pub social_security: Decimal,
    /// Total caja de compensación.
    pub caja_compensacion: Decimal,
    /// Total ICBF.
    pub icbf: Decimal,
    /// Total SENA.
    pub sena: Decimal,
    /// Parafiscal contributions: caja + ICBF + SENA.
    pub parafiscales: Decimal,
    /// Total employer contributions.
    pub total_employer_contributions: Decimal,
    /// Total provisions base.
    pub provisions_base: Decimal,
    /// Total prima provision.
    pub prima: Decimal,
    /// Total cesantías provision.
    pub cesantias: Decimal,
    /// Total interest on cesantías.
    pub intereses_cesantias: Decimal,
    /// Total vacation provision.
    pub vacaciones: Decimal,
    /// Total provisions.
    pub total_provisions: Decimal,
    /// Total employer cost.
    pub total_cost: Decimal,
}

impl PeriodTotals {
    /// Returns the field-wise sum of two totals, or `None` if any sum
    /// leaves the range of [`Decimal`].
    pub fn checked_add(&self, other: &PeriodTotals) -> Option<PeriodTotals> {
        Some(PeriodTotals {
            total_employees: self.total_employees.checked_add(other.total_employees)?,
            period_salary: self.period_salary.checked_add(other.period_salary)?,
            transport_allowance: self
                .transport_allowance
                .checked_add(other.transport_allowance)?,
            contribution_base: self.contribution_base.checked_add(other.contribution_base)?,
            health_employee: self.health_employee.checked_add(other.health_employee)?,
            pension_employee: self.pension_employee.checked_add(other.pension_employee)?,
            total_deductions: self.total_deductions.checked_add(other.total_deductions)?,
            net_pay: self.net_pay.checked_add(other.net_pay)?,
            health_employer: self.health_employer.checked_add(other.health_employer)?,
            pension_employer: self.pension_employer.checked_add(other.pension_employer)?,
            arl: self.arl.checked_add(other.arl)?,
            social_security: self.social_security.checked_add(other.social_security)?,
            caja_compensacion: self.caja_compensacion.checked_add(other.caja_compensacion)?,
            icbf: self.icbf.checked_add(other.icbf)?,
            sena: self.sena.checked_add(other.sena)?,
            parafiscales: self.parafiscales.checked_add(other.parafiscales)?,
            total_employer_contributions: self
                .total_employer_contributions
                .checked_add(other.total_employer_contributions)?,
            provisions_base: self.provisions_base.checked_add(other.provisions_base)?,
            prima: self.prima.checked_add(other.prima)?,
            cesantias: self.cesantias.checked_add(other.cesantias)?,
            intereses_cesantias: self
                .intereses_cesantias
                .checked_add(other.intereses_cesantias)?,
            vacaciones: self.vacaciones.checked_add(other.vacaciones)?,
            total_provisions: self.total_provisions.checked_add(other.total_provisions)?,
            total_cost: self.total_cost.checked_add(other.total_cost)?,
        })
    }
}

impl From<&PayrollLine> for PeriodTotals {
    /// Totals for a single employee.
    fn from(line: &PayrollLine) -> Self {
        PeriodTotals {
            total_employees: 1,
            period_salary: line.period_salary,
            transport_allowance: line.transport_allowance,
            contribution_base: line.contribution_base,
            health_employee: line.health_employee,
            pension_employee: line.pension_employee,
            total_deductions: line.total_deductions,
            net_pay: line.net_pay,
            health_employer: line.health_employer,
            pension_employer: line.pension_employer,
            arl: line.arl,
            social_security: line.health_employer + line.pension_employer + line.arl,
            caja_compensacion: line.caja_compensacion,
            icbf: line.icbf,
            sena: line.sena,
            parafiscales: line.caja_compensacion + line.icbf + line.sena,
            total_employer_contributions: line.total_employer_contributions,
            provisions_base: line.provisions_base,
            prima: line.prima,
            cesantias: line.cesantias,
            intereses_cesantias: line.intereses_cesantias,
            vacaciones: line.vacaciones,
            total_provisions: line.total_provisions,
            total_cost: line.total_cost,
        }
    }
}

/// Totals for one cost center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenterTotals {
    /// Cost center code, `SIN-CC` for unassigned employees.
    pub code: String,
    /// Cost center name.
    pub name: String,
    /// Sums across the employees charged to this cost center.
    pub totals: PeriodTotals,
    /// Employer cost of the group (equal to `totals.total_cost`).
    pub total_employer_cost: Decimal,
    /// Share of the grand total employer cost, percent (unrounded).
    pub percentage_of_total: Decimal,
}

/// Payroll cost broken down by cost center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenterReport {
    /// Per-cost-center totals, highest employer cost first.
    pub cost_centers: Vec<CostCenterTotals>,
    /// Totals across every employee.
    pub summary: PeriodTotals,
    /// Sum of every group's employer cost.
    pub grand_total_employer_cost: Decimal,
}

/// Payroll cost by cost center consolidated over the processed periods
/// of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCostCenterReport {
    /// Calendar year reported.
    pub year: i32,
    /// Names of the periods included, in input order.
    pub periods_included: Vec<String>,
    /// Names of the periods left out because they are still open or
    /// belong to another year.
    pub periods_skipped: Vec<String>,
    /// Cost centers and summary across the included periods. Counts are
    /// payroll lines, so an employee paid in several periods counts once
    /// per period.
    pub report: CostCenterReport,
}

/// The result of liquidating a period: one line per employee plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodLiquidation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The tenant whose configuration was applied.
    pub tenant_id: String,
    /// Calendar days in the period, both ends inclusive.
    pub days_in_period: u32,
    /// Proration factor against the 30-day reference month.
    pub period_factor: Decimal,
    /// Per-employee breakdowns, in request order.
    pub lines: Vec<PayrollLine>,
    /// Period-level totals.
    pub totals: PeriodTotals,
}
