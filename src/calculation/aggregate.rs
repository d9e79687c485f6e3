//! Period aggregation.
//!
//! Sums payroll lines across the employees of a period. Aggregation is
//! fail-fast: if any employee's line cannot be computed, no totals are
//! returned.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::PayrollConfiguration;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayrollLine, PeriodLiquidation, PeriodTotals};

use super::payroll_line::compute_line;
use super::period::PeriodProration;

/// Computes one line per employee, in input order.
///
/// # Errors
///
/// Returns the first error raised by [`compute_line`].
pub fn compute_lines(
    employees: &[Employee],
    config: &PayrollConfiguration,
    period_factor: Decimal,
) -> EngineResult<Vec<PayrollLine>> {
    employees
        .iter()
        .map(|employee| compute_line(employee, config, period_factor))
        .collect()
}

/// Sums already computed lines.
///
/// # Errors
///
/// Returns `InvalidPeriod` if a running total leaves the range of
/// [`Decimal`].
pub fn aggregate_lines<'a>(
    lines: impl IntoIterator<Item = &'a PayrollLine>,
) -> EngineResult<PeriodTotals> {
    lines
        .into_iter()
        .try_fold(PeriodTotals::default(), |totals, line| {
            totals
                .checked_add(&PeriodTotals::from(line))
                .ok_or_else(|| EngineError::InvalidPeriod {
                    message: format!(
                        "period totals overflow after employee '{}'",
                        line.employee_id
                    ),
                })
        })
}

/// Computes and sums the lines of every employee in a period.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::aggregate;
/// use nomina_engine::config::{ConfigLoader, ConfigurationProvider};
/// use nomina_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// let config = loader.configuration("acme").unwrap();
/// let employees = vec![
///     Employee::new("emp_001", Decimal::from(1_300_000)),
///     Employee::new("emp_002", Decimal::from(1_300_000)),
/// ];
///
/// let totals = aggregate(&employees, config, Decimal::new(5, 1)).unwrap();
/// assert_eq!(totals.total_employees, 2);
/// assert_eq!(totals.net_pay, Decimal::from(1_358_000));
/// ```
pub fn aggregate(
    employees: &[Employee],
    config: &PayrollConfiguration,
    period_factor: Decimal,
) -> EngineResult<PeriodTotals> {
    let lines = compute_lines(employees, config, period_factor)?;
    let totals = aggregate_lines(&lines)?;

    debug!(
        total_employees = totals.total_employees,
        total_cost = %totals.total_cost,
        "Aggregated period totals"
    );

    Ok(totals)
}

/// Liquidates a period: every employee's line plus the period totals,
/// wrapped with a fresh calculation id and timestamp.
///
/// # Errors
///
/// Fails with the first line error, or `InvalidPeriod` if the totals
/// overflow.
pub fn liquidate_period(
    tenant_id: &str,
    employees: &[Employee],
    config: &PayrollConfiguration,
    proration: PeriodProration,
) -> EngineResult<PeriodLiquidation> {
    let lines = compute_lines(employees, config, proration.period_factor)?;
    let totals = aggregate_lines(&lines)?;

    Ok(PeriodLiquidation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        tenant_id: tenant_id.to_string(),
        days_in_period: proration.days_in_period,
        period_factor: proration.period_factor,
        lines,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{dec, test_config};
    use crate::models::ArlRiskLevel;

    #[test]
    fn test_empty_period_has_zero_totals() {
        let totals = aggregate(&[], &test_config(), dec("0.5")).unwrap();
        assert_eq!(totals, PeriodTotals::default());
    }

    #[test]
    fn test_totals_match_sum_of_lines() {
        let config = test_config();
        let employees = vec![
            Employee::new("a", dec("1300000")),
            Employee::new("b", dec("4000000")).with_arl_risk_level(ArlRiskLevel::RiesgoIV),
            Employee::new("c", dec("1000000")).without_transport_allowance(),
        ];

        let lines = compute_lines(&employees, &config, dec("0.5")).unwrap();
        let totals = aggregate(&employees, &config, dec("0.5")).unwrap();

        assert_eq!(totals.total_employees, 3);
        assert_eq!(
            totals.net_pay,
            lines.iter().map(|l| l.net_pay).sum::<Decimal>()
        );
        assert_eq!(
            totals.arl,
            lines.iter().map(|l| l.arl).sum::<Decimal>()
        );
        assert_eq!(
            totals.total_cost,
            lines.iter().map(|l| l.total_cost).sum::<Decimal>()
        );
    }

    #[test]
    fn test_aggregation_is_additive() {
        let config = test_config();
        let a = Employee::new("a", dec("1300000"));
        let b = Employee::new("b", dec("3500000")).with_arl_risk_level(ArlRiskLevel::RiesgoII);

        let both = aggregate(&[a.clone(), b.clone()], &config, dec("0.5")).unwrap();
        let only_a = aggregate(&[a], &config, dec("0.5")).unwrap();
        let only_b = aggregate(&[b], &config, dec("0.5")).unwrap();

        assert_eq!(Some(both), only_a.checked_add(&only_b));
    }

    #[test]
    fn test_order_does_not_change_totals() {
        let config = test_config();
        let a = Employee::new("a", dec("1300000"));
        let b = Employee::new("b", dec("2000000"));

        assert_eq!(
            aggregate(&[a.clone(), b.clone()], &config, Decimal::ONE).unwrap(),
            aggregate(&[b, a], &config, Decimal::ONE).unwrap()
        );
    }

    #[test]
    fn test_liquidate_period_returns_lines_and_totals() {
        let config = test_config();
        let employees = vec![
            Employee::new("a", dec("1300000")),
            Employee::new("b", dec("1300000")),
        ];
        let proration = PeriodProration {
            days_in_period: 15,
            period_factor: dec("0.5"),
        };

        let result = liquidate_period("acme", &employees, &config, proration).unwrap();

        assert_eq!(result.tenant_id, "acme");
        assert_eq!(result.days_in_period, 15);
        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[1].employee_id, "b");
        assert_eq!(result.totals.net_pay, dec("1358000"));
        assert_eq!(result.totals, aggregate_lines(&result.lines).unwrap());
    }

    #[test]
    fn test_liquidations_get_distinct_ids() {
        let config = test_config();
        let proration = PeriodProration {
            days_in_period: 30,
            period_factor: Decimal::ONE,
        };

        let first = liquidate_period("acme", &[], &config, proration).unwrap();
        let second = liquidate_period("acme", &[], &config, proration).unwrap();
        assert_ne!(first.calculation_id, second.calculation_id);
    }

    #[test]
    fn test_single_invalid_employee_fails_whole_aggregation() {
        let config = test_config();
        let employees = vec![
            Employee::new("ok", dec("1300000")),
            Employee::new("bad", dec("-1")),
        ];

        match aggregate(&employees, &config, Decimal::ONE) {
            Err(EngineError::InvalidEmployee { employee_id, .. }) => {
                assert_eq!(employee_id, "bad");
            }
            other => panic!("Expected InvalidEmployee, got {:?}", other),
        }
    }

    #[test]
    fn test_social_security_and_parafiscales_are_summed() {
        let config = test_config();
        let employees = vec![
            Employee::new("a", dec("1300000")),
            Employee::new("b", dec("2000000")).with_arl_risk_level(ArlRiskLevel::RiesgoV),
        ];

        let lines = compute_lines(&employees, &config, Decimal::ONE).unwrap();
        let totals = aggregate_lines(&lines).unwrap();

        assert_eq!(
            totals.social_security,
            lines
                .iter()
                .map(|l| l.health_employer + l.pension_employer + l.arl)
                .sum::<Decimal>()
        );
        assert_eq!(
            totals.parafiscales,
            totals.caja_compensacion + totals.icbf + totals.sena
        );
    }

    #[test]
    fn test_totals_overflow_is_an_error() {
        let config = test_config();
        let mut line = compute_line(&Employee::new("big", dec("1300000")), &config, Decimal::ONE)
            .unwrap();
        line.total_cost = Decimal::MAX;
        let lines = vec![line.clone(), line];

        match aggregate_lines(&lines) {
            Err(EngineError::InvalidPeriod { message }) => {
                assert!(message.contains("big"));
            }
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
    }
}
