//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod payroll_line;
mod payroll_period;
mod report;

pub use employee::{ArlRiskLevel, CostCenterRef, Employee, EmployeeRecord};
pub use payroll_line::PayrollLine;
pub use payroll_period::{PayrollPeriod, PeriodPayroll, PeriodStatus, PeriodType};
pub use report::{
    CostCenterReport, CostCenterTotals, PeriodLiquidation, PeriodTotals, YearCostCenterReport,
};
