//! Employee model and related types.
//!
//! Employee data arrives as a loosely-typed [`EmployeeRecord`] (the shape the
//! HR module exposes) and is normalized exactly once into an [`Employee`],
//! so the calculators never deal with absent flags or unknown risk classes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculation::{MAX_AMOUNT, REFERENCE_MONTH_DAYS};
use crate::error::{EngineError, EngineResult};

/// Occupational risk class used to select the ARL contribution rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArlRiskLevel {
    /// Minimal risk (office work).
    #[default]
    #[serde(rename = "RIESGO_I")]
    RiesgoI,
    /// Low risk.
    #[serde(rename = "RIESGO_II")]
    RiesgoII,
    /// Medium risk.
    #[serde(rename = "RIESGO_III")]
    RiesgoIII,
    /// High risk.
    #[serde(rename = "RIESGO_IV")]
    RiesgoIV,
    /// Maximum risk.
    #[serde(rename = "RIESGO_V")]
    RiesgoV,
}

impl ArlRiskLevel {
    /// Returns the ARL contribution for this class, percent of the contribution base.
    ///
    /// # Examples
    ///
    /// ```
    /// use nomina_engine::models::ArlRiskLevel;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(ArlRiskLevel::RiesgoIII.percentage(), Decimal::new(2436, 3));
    /// ```
    pub fn percentage(self) -> Decimal {
        match self {
            ArlRiskLevel::RiesgoI => Decimal::new(522, 3),
            ArlRiskLevel::RiesgoII => Decimal::new(1044, 3),
            ArlRiskLevel::RiesgoIII => Decimal::new(2436, 3),
            ArlRiskLevel::RiesgoIV => Decimal::new(4350, 3),
            ArlRiskLevel::RiesgoV => Decimal::new(6960, 3),
        }
    }

    /// Returns the wire code, e.g. `RIESGO_III`.
    pub fn code(self) -> &'static str {
        match self {
            ArlRiskLevel::RiesgoI => "RIESGO_I",
            ArlRiskLevel::RiesgoII => "RIESGO_II",
            ArlRiskLevel::RiesgoIII => "RIESGO_III",
            ArlRiskLevel::RiesgoIV => "RIESGO_IV",
            ArlRiskLevel::RiesgoV => "RIESGO_V",
        }
    }

    /// Parses a risk code, returning `None` for anything unrecognized.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "RIESGO_I" => Some(ArlRiskLevel::RiesgoI),
            "RIESGO_II" => Some(ArlRiskLevel::RiesgoII),
            "RIESGO_III" => Some(ArlRiskLevel::RiesgoIII),
            "RIESGO_IV" => Some(ArlRiskLevel::RiesgoIV),
            "RIESGO_V" => Some(ArlRiskLevel::RiesgoV),
            _ => None,
        }
    }

    /// Parses a risk code, falling back to `RIESGO_I` when absent or unknown.
    pub fn parse_lenient(code: Option<&str>) -> Self {
        code.and_then(Self::from_code).unwrap_or_default()
    }
}

/// The cost center an employee is charged to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenterRef {
    /// Cost center code (e.g. "ADM-01").
    pub code: String,
    /// Display name of the cost center.
    pub name: String,
}

/// Employee data as supplied by the HR module.
///
/// Only `id` and `base_salary` are required; everything else is normalized
/// by [`Employee::from_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier for the employee.
    pub id: String,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Transport allowance eligibility; absent means eligible.
    #[serde(default)]
    pub has_transport_allowance: Option<bool>,
    /// ARL risk code such as `RIESGO_II`.
    #[serde(default)]
    pub arl_risk_level: Option<String>,
    /// Days worked in a 30-day month.
    #[serde(default)]
    pub monthly_worked_days: Option<u32>,
    /// Code of the cost center the employee is charged to.
    #[serde(default)]
    pub cost_center_code: Option<String>,
    /// Name of the cost center; defaults to the code.
    #[serde(default)]
    pub cost_center_name: Option<String>,
}

/// A normalized employee, ready for payroll computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Whether the employee may receive the transport allowance.
    pub has_transport_allowance: bool,
    /// The occupational risk class.
    pub arl_risk_level: ArlRiskLevel,
    /// Days worked in a 30-day month. Carried for reporting only; proration
    /// is driven by the period dates.
    pub monthly_worked_days: Option<u32>,
    /// The cost center the employee is charged to, if any.
    pub cost_center: Option<CostCenterRef>,
}

impl Employee {
    /// Creates an employee with default flags: transport allowance enabled,
    /// risk class I, no cost center.
    ///
    /// # Examples
    ///
    /// ```
    /// use nomina_engine::models::{ArlRiskLevel, Employee};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new("emp_001", Decimal::from(1_300_000));
    /// assert!(employee.has_transport_allowance);
    /// assert_eq!(employee.arl_risk_level, ArlRiskLevel::RiesgoI);
    /// ```
    pub fn new(id: impl Into<String>, base_salary: Decimal) -> Self {
        Self {
            id: id.into(),
            base_salary,
            has_transport_allowance: true,
            arl_risk_level: ArlRiskLevel::RiesgoI,
            monthly_worked_days: None,
            cost_center: None,
        }
    }

    /// Sets the ARL risk class.
    pub fn with_arl_risk_level(mut self, level: ArlRiskLevel) -> Self {
        self.arl_risk_level = level;
        self
    }

    /// Disables the transport allowance.
    pub fn without_transport_allowance(mut self) -> Self {
        self.has_transport_allowance = false;
        self
    }

    /// Assigns the employee to a cost center.
    pub fn with_cost_center(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.cost_center = Some(CostCenterRef {
            code: code.into(),
            name: name.into(),
        });
        self
    }

    /// Normalizes a raw record.
    ///
    /// - `has_transport_allowance` absent becomes `true`
    /// - `arl_risk_level` absent or unrecognized becomes `RIESGO_I`
    /// - `cost_center_name` absent becomes the cost center code
    ///
    /// # Errors
    ///
    /// Returns `InvalidEmployee` for an empty id, a salary that is negative
    /// or above [`MAX_AMOUNT`], or more than 30 monthly worked days.
    pub fn from_record(record: EmployeeRecord) -> EngineResult<Self> {
        if record.id.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                employee_id: record.id,
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if record.base_salary < Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                employee_id: record.id,
                field: "base_salary".to_string(),
                message: format!("must not be negative, got {}", record.base_salary),
            });
        }

        if record.base_salary > Decimal::from(MAX_AMOUNT) {
            return Err(EngineError::InvalidEmployee {
                employee_id: record.id,
                field: "base_salary".to_string(),
                message: format!("must not exceed {}, got {}", MAX_AMOUNT, record.base_salary),
            });
        }

        if let Some(days) = record
            .monthly_worked_days
            .filter(|days| *days > REFERENCE_MONTH_DAYS)
        {
            return Err(EngineError::InvalidEmployee {
                employee_id: record.id,
                field: "monthly_worked_days".to_string(),
                message: format!("must be at most {}, got {}", REFERENCE_MONTH_DAYS, days),
            });
        }

        let arl_risk_level = match record.arl_risk_level.as_deref() {
            None => ArlRiskLevel::default(),
            Some(code) => ArlRiskLevel::from_code(code).unwrap_or_else(|| {
                warn!(
                    employee_id = %record.id,
                    arl_risk_level = %code,
                    "Unrecognized ARL risk level, using RIESGO_I"
                );
                ArlRiskLevel::default()
            }),
        };

        let cost_center = record.cost_center_code.map(|code| CostCenterRef {
            name: record.cost_center_name.unwrap_or_else(|| code.clone()),
            code,
        });

        Ok(Self {
            id: record.id,
            base_salary: record.base_salary,
            has_transport_allowance: record.has_transport_allowance != Some(false),
            arl_risk_level,
            monthly_worked_days: record.monthly_worked_days,
            cost_center,
        })
    }
}

impl TryFrom<EmployeeRecord> for Employee {
    type Error = EngineError;

    fn try_from(record: EmployeeRecord) -> EngineResult<Self> {
        Employee::from_record(record)
    }
}
