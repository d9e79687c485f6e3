//! Configuration types for payroll computation.
//!
//! A [`PayrollConfiguration`] is the tenant-scoped snapshot of legal values
//! (minimum wage, transport allowance) and contribution/provision rates.
//! It is deserialized through [`RawPayrollConfiguration`] so that a missing
//! rate surfaces as [`EngineError::ConfigurationMissing`] instead of
//! silently becoming zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{MAX_AMOUNT, MAX_PERCENTAGE};
use crate::error::{EngineError, EngineResult};

/// Configuration as it appears on disk or on the wire, every rate optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayrollConfiguration {
    /// The tenant this configuration belongs to.
    pub tenant_id: String,
    /// Legal monthly minimum wage (SMMLV).
    pub minimum_wage: Option<Decimal>,
    /// Monthly transport allowance.
    pub transport_allowance: Option<Decimal>,
    /// Employee health contribution, percent.
    pub health_percentage_employee: Option<Decimal>,
    /// Employer health contribution, percent.
    pub health_percentage_employer: Option<Decimal>,
    /// Employee pension contribution, percent.
    pub pension_percentage_employee: Option<Decimal>,
    /// Employer pension contribution, percent.
    pub pension_percentage_employer: Option<Decimal>,
    /// Caja de compensación familiar, percent.
    pub parafiscal_caja_percentage: Option<Decimal>,
    /// SENA, percent.
    pub parafiscal_sena_percentage: Option<Decimal>,
    /// ICBF, percent.
    pub parafiscal_icbf_percentage: Option<Decimal>,
    /// Prima de servicios provision, percent.
    pub prima_percentage: Option<Decimal>,
    /// Cesantías provision, percent.
    pub cesantias_percentage: Option<Decimal>,
    /// Annual interest on cesantías, percent.
    pub intereses_cesantias_percentage: Option<Decimal>,
    /// Vacation provision, percent.
    pub vacaciones_percentage: Option<Decimal>,
}

/// A validated, complete payroll configuration snapshot.
///
/// All percentages use the 0–100 scale, so `4` means 4%.
/// `intereses_cesantias_percentage` is an annual rate and is divided by
/// 12 by the provisions calculation.
///
/// # Example
///
/// ```
/// use nomina_engine::config::{PayrollConfiguration, RawPayrollConfiguration};
/// use rust_decimal::Decimal;
///
/// let raw = RawPayrollConfiguration {
///     tenant_id: "acme".to_string(),
///     minimum_wage: Some(Decimal::from(1_300_000)),
///     ..Default::default()
/// };
/// let err = PayrollConfiguration::try_from(raw).unwrap_err();
/// assert!(err.to_string().contains("transport_allowance"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPayrollConfiguration")]
pub struct PayrollConfiguration {
    /// The tenant this configuration belongs to.
    pub tenant_id: String,
    /// Legal monthly minimum wage (SMMLV).
    pub minimum_wage: Decimal,
    /// Monthly transport allowance.
    pub transport_allowance: Decimal,
    /// Employee health contribution, percent.
    pub health_percentage_employee: Decimal,
    /// Employer health contribution, percent.
    pub health_percentage_employer: Decimal,
    /// Employee pension contribution, percent.
    pub pension_percentage_employee: Decimal,
    /// Employer pension contribution, percent.
    pub pension_percentage_employer: Decimal,
    /// Caja de compensación familiar, percent.
    pub parafiscal_caja_percentage: Decimal,
    /// SENA, percent.
    pub parafiscal_sena_percentage: Decimal,
    /// ICBF, percent.
    pub parafiscal_icbf_percentage: Decimal,
    /// Prima de servicios provision, percent.
    pub prima_percentage: Decimal,
    /// Cesantías provision, percent.
    pub cesantias_percentage: Decimal,
    /// Annual interest on cesantías, percent.
    pub intereses_cesantias_percentage: Decimal,
    /// Vacation provision, percent.
    pub vacaciones_percentage: Decimal,
}

fn require(tenant_id: &str, field: &str, value: Option<Decimal>) -> EngineResult<Decimal> {
    value.ok_or_else(|| EngineError::ConfigurationMissing {
        tenant_id: tenant_id.to_string(),
        field: field.to_string(),
    })
}

impl TryFrom<RawPayrollConfiguration> for PayrollConfiguration {
    type Error = EngineError;

    fn try_from(raw: RawPayrollConfiguration) -> EngineResult<Self> {
        let t = raw.tenant_id.as_str();
        Ok(Self {
            minimum_wage: require(t, "minimum_wage", raw.minimum_wage)?,
            transport_allowance: require(t, "transport_allowance", raw.transport_allowance)?,
            health_percentage_employee: require(
                t,
                "health_percentage_employee",
                raw.health_percentage_employee,
            )?,
            health_percentage_employer: require(
                t,
                "health_percentage_employer",
                raw.health_percentage_employer,
            )?,
            pension_percentage_employee: require(
                t,
                "pension_percentage_employee",
                raw.pension_percentage_employee,
            )?,
            pension_percentage_employer: require(
                t,
                "pension_percentage_employer",
                raw.pension_percentage_employer,
            )?,
            parafiscal_caja_percentage: require(
                t,
                "parafiscal_caja_percentage",
                raw.parafiscal_caja_percentage,
            )?,
            parafiscal_sena_percentage: require(
                t,
                "parafiscal_sena_percentage",
                raw.parafiscal_sena_percentage,
            )?,
            parafiscal_icbf_percentage: require(
                t,
                "parafiscal_icbf_percentage",
                raw.parafiscal_icbf_percentage,
            )?,
            prima_percentage: require(t, "prima_percentage", raw.prima_percentage)?,
            cesantias_percentage: require(t, "cesantias_percentage", raw.cesantias_percentage)?,
            intereses_cesantias_percentage: require(
                t,
                "intereses_cesantias_percentage",
                raw.intereses_cesantias_percentage,
            )?,
            vacaciones_percentage: require(t, "vacaciones_percentage", raw.vacaciones_percentage)?,
            tenant_id: raw.tenant_id,
        })
    }
}

impl PayrollConfiguration {
    /// Returns every percentage field paired with its name.
    pub fn percentages(&self) -> [(&'static str, Decimal); 11] {
        [
            ("health_percentage_employee", self.health_percentage_employee),
            ("health_percentage_employer", self.health_percentage_employer),
            ("pension_percentage_employee", self.pension_percentage_employee),
            ("pension_percentage_employer", self.pension_percentage_employer),
            ("parafiscal_caja_percentage", self.parafiscal_caja_percentage),
            ("parafiscal_sena_percentage", self.parafiscal_sena_percentage),
            ("parafiscal_icbf_percentage", self.parafiscal_icbf_percentage),
            ("prima_percentage", self.prima_percentage),
            ("cesantias_percentage", self.cesantias_percentage),
            ("intereses_cesantias_percentage", self.intereses_cesantias_percentage),
            ("vacaciones_percentage", self.vacaciones_percentage),
        ]
    }

    /// Checks that the minimum wage is positive, the transport allowance is
    /// non-negative, both stay within [`MAX_AMOUNT`], and every percentage
    /// lies in `0..=100`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` naming the first offending field.
    pub fn validate(&self) -> EngineResult<()> {
        let max_amount = Decimal::from(MAX_AMOUNT);

        if self.minimum_wage <= Decimal::ZERO {
            return Err(EngineError::InvalidConfiguration {
                field: "minimum_wage".to_string(),
                message: format!("must be positive, got {}", self.minimum_wage),
            });
        }

        if self.transport_allowance < Decimal::ZERO {
            return Err(EngineError::InvalidConfiguration {
                field: "transport_allowance".to_string(),
                message: format!("must not be negative, got {}", self.transport_allowance),
            });
        }

        for (field, value) in [
            ("minimum_wage", self.minimum_wage),
            ("transport_allowance", self.transport_allowance),
        ] {
            if value > max_amount {
                return Err(EngineError::InvalidConfiguration {
                    field: field.to_string(),
                    message: format!("must not exceed {}, got {}", MAX_AMOUNT, value),
                });
            }
        }

        for (field, value) in self.percentages() {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidConfiguration {
                    field: field.to_string(),
                    message: format!("percentage must not be negative, got {}", value),
                });
            }
            if value > Decimal::from(MAX_PERCENTAGE) {
                return Err(EngineError::InvalidConfiguration {
                    field: field.to_string(),
                    message: format!("percentage must not exceed {}, got {}", MAX_PERCENTAGE, value),
                });
            }
        }

        Ok(())
    }
}

/// A tenant configuration file. Wraps the raw form so file-level
/// metadata can sit next to the rates.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantConfigFile {
    /// Optional human-readable tenant name.
    #[serde(default)]
    pub name: Option<String>,
    /// The payroll rates for the tenant.
    pub payroll: RawPayrollConfiguration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn complete_raw() -> RawPayrollConfiguration {
        RawPayrollConfiguration {
            tenant_id: "acme".to_string(),
            minimum_wage: Some(dec("1300000")),
            transport_allowance: Some(dec("162000")),
            health_percentage_employee: Some(dec("4")),
            health_percentage_employer: Some(dec("8.5")),
            pension_percentage_employee: Some(dec("4")),
            pension_percentage_employer: Some(dec("12")),
            parafiscal_caja_percentage: Some(dec("4")),
            parafiscal_sena_percentage: Some(dec("2")),
            parafiscal_icbf_percentage: Some(dec("3")),
            prima_percentage: Some(dec("8.33")),
            cesantias_percentage: Some(dec("8.33")),
            intereses_cesantias_percentage: Some(dec("12")),
            vacaciones_percentage: Some(dec("4.17")),
        }
    }

    #[test]
    fn test_complete_raw_converts() {
        let config = PayrollConfiguration::try_from(complete_raw()).unwrap();
        assert_eq!(config.tenant_id, "acme");
        assert_eq!(config.minimum_wage, dec("1300000"));
        assert_eq!(config.intereses_cesantias_percentage, dec("12"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_rate_is_configuration_missing_not_zero() {
        let mut raw = complete_raw();
        raw.parafiscal_sena_percentage = None;

        match PayrollConfiguration::try_from(raw) {
            Err(EngineError::ConfigurationMissing { tenant_id, field }) => {
                assert_eq!(tenant_id, "acme");
                assert_eq!(field, "parafiscal_sena_percentage");
            }
            other => panic!("Expected ConfigurationMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_percentage_fails_validation() {
        let mut config = PayrollConfiguration::try_from(complete_raw()).unwrap();
        config.vacaciones_percentage = dec("-4.17");

        match config.validate() {
            Err(EngineError::InvalidConfiguration { field, .. }) => {
                assert_eq!(field, "vacaciones_percentage");
            }
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_percentage_above_hundred_fails_validation() {
        let mut config = PayrollConfiguration::try_from(complete_raw()).unwrap();
        config.health_percentage_employer = dec("100.01");

        match config.validate() {
            Err(EngineError::InvalidConfiguration { field, message }) => {
                assert_eq!(field, "health_percentage_employer");
                assert!(message.contains("must not exceed"));
            }
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_minimum_wage_near_decimal_limit_fails_validation() {
        let mut config = PayrollConfiguration::try_from(complete_raw()).unwrap();
        config.minimum_wage = dec("30000000000000000000000000000");

        let err = config.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("minimum_wage"));
    }

    #[test]
    fn test_zero_minimum_wage_fails_validation() {
        let mut config = PayrollConfiguration::try_from(complete_raw()).unwrap();
        config.minimum_wage = Decimal::ZERO;

        let err = config.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("minimum_wage"));
    }

    #[test]
    fn test_deserialize_json_with_missing_field_fails() {
        let json = r#"{
            "tenant_id": "acme",
            "minimum_wage": "1300000",
            "transport_allowance": "162000"
        }"#;

        let result: Result<PayrollConfiguration, _> = serde_json::from_str(json);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("health_percentage_employee"), "{}", message);
    }

    #[test]
    fn test_zero_rate_is_accepted_when_explicit() {
        let mut raw = complete_raw();
        raw.parafiscal_sena_percentage = Some(Decimal::ZERO);

        let config = PayrollConfiguration::try_from(raw).unwrap();
        assert_eq!(config.parafiscal_sena_percentage, Decimal::ZERO);
        assert!(config.validate().is_ok());
    }
}
