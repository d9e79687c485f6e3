//! The per-employee payroll breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The computed earnings, deductions, employer contributions and provisions
/// for one employee in one period.
///
/// All monetary values are already prorated to the period. Lines are
/// recomputed on demand and never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// The employee this line belongs to.
    pub employee_id: String,

    // Earnings
    /// Base salary prorated to the period (salario del periodo).
    pub period_salary: Decimal,
    /// Prorated transport allowance, zero when not eligible (auxilio de transporte).
    pub transport_allowance: Decimal,

    // Employee deductions
    /// Base for social-security percentages (IBC). Excludes transport allowance.
    pub contribution_base: Decimal,
    /// Employee health contribution.
    pub health_employee: Decimal,
    /// Employee pension contribution.
    pub pension_employee: Decimal,
    /// Sum of employee deductions.
    pub total_deductions: Decimal,
    /// Amount paid to the employee (neto a pagar).
    pub net_pay: Decimal,

    // Employer contributions
    /// Employer health contribution.
    pub health_employer: Decimal,
    /// Employer pension contribution.
    pub pension_employer: Decimal,
    /// ARL rate applied, percent.
    pub arl_rate: Decimal,
    /// Occupational risk insurance contribution.
    pub arl: Decimal,
    /// Caja de compensación familiar.
    pub caja_compensacion: Decimal,
    /// Instituto Colombiano de Bienestar Familiar.
    pub icbf: Decimal,
    /// Servicio Nacional de Aprendizaje.
    pub sena: Decimal,
    /// Sum of the six employer contributions.
    pub total_employer_contributions: Decimal,

    // Provisions
    /// Base for prima and cesantías. Includes transport allowance.
    pub provisions_base: Decimal,
    /// Prima de servicios.
    pub prima: Decimal,
    /// Cesantías (severance).
    pub cesantias: Decimal,
    /// Interest on cesantías, monthly share of the annual rate.
    pub intereses_cesantias: Decimal,
    /// Vacation provision, computed on the period salary only.
    pub vacaciones: Decimal,
    /// Sum of the four provisions.
    pub total_provisions: Decimal,

    /// Full employer cost: earnings + contributions + provisions.
    pub total_cost: Decimal,
}
