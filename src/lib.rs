//! Payroll engine for Colombian payroll (nómina).
//!
//! This crate computes, for each employee and pay period, the prorated
//! salary, transport allowance, social security deductions, employer
//! contributions, parafiscales and benefit provisions, and aggregates them
//! per period and per cost center. Rates come from a per-tenant
//! configuration snapshot; nothing is hardcoded.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
