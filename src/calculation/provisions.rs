//! Benefit provisions (prestaciones sociales).
//!
//! Prima and cesantías accrue on salary plus transport allowance;
//! vacaciones accrue on salary alone. Interest on cesantías is configured
//! as an annual rate and accrues monthly.

use rust_decimal::Decimal;

use crate::config::PayrollConfiguration;

use super::percent_of;

/// Months per year, used to monthlize the annual interest rate.
const MONTHS_PER_YEAR: u32 = 12;

/// The four provisions for one employee and period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provisions {
    /// `period_salary + transport_allowance`.
    pub base: Decimal,
    /// Prima de servicios.
    pub prima: Decimal,
    /// Cesantías.
    pub cesantias: Decimal,
    /// Interest on cesantías.
    pub intereses_cesantias: Decimal,
    /// Vacation provision.
    pub vacaciones: Decimal,
    /// Sum of the four.
    pub total: Decimal,
}

/// Returns the monthly interest on an amount of cesantías.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::monthly_cesantias_interest;
/// use rust_decimal::Decimal;
///
/// // 12% annual on 100 000 is 1 000 per month.
/// let interest = monthly_cesantias_interest(Decimal::from(100_000), Decimal::from(12));
/// assert_eq!(interest, Decimal::from(1_000));
/// ```
pub fn monthly_cesantias_interest(cesantias: Decimal, annual_percentage: Decimal) -> Decimal {
    cesantias * (annual_percentage / Decimal::ONE_HUNDRED) / Decimal::from(MONTHS_PER_YEAR)
}

/// Computes the provisions for a period.
pub fn provisions(
    period_salary: Decimal,
    transport_allowance: Decimal,
    config: &PayrollConfiguration,
) -> Provisions {
    let base = period_salary + transport_allowance;
    let prima = percent_of(base, config.prima_percentage);
    let cesantias = percent_of(base, config.cesantias_percentage);
    let intereses_cesantias =
        monthly_cesantias_interest(cesantias, config.intereses_cesantias_percentage);
    let vacaciones = percent_of(period_salary, config.vacaciones_percentage);

    Provisions {
        base,
        prima,
        cesantias,
        intereses_cesantias,
        vacaciones,
        total: prima + cesantias + intereses_cesantias + vacaciones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{dec, test_config};

    #[test]
    fn test_provisions_with_transport_allowance() {
        let p = provisions(dec("650000"), dec("81000"), &test_config());

        assert_eq!(p.base, dec("731000"));
        assert_eq!(p.prima, dec("60892.3"));
        assert_eq!(p.cesantias, dec("60892.3"));
        assert_eq!(p.intereses_cesantias, dec("608.923"));
        assert_eq!(p.vacaciones, dec("27105"));
        assert_eq!(p.total, dec("149498.523"));
    }

    #[test]
    fn test_vacaciones_exclude_transport_allowance() {
        let config = test_config();
        let with_transport = provisions(dec("650000"), dec("81000"), &config);
        let without_transport = provisions(dec("650000"), Decimal::ZERO, &config);

        assert_eq!(with_transport.vacaciones, without_transport.vacaciones);
        assert!(with_transport.prima > without_transport.prima);
        assert!(with_transport.cesantias > without_transport.cesantias);
    }

    #[test]
    fn test_interest_is_monthlized() {
        assert_eq!(
            monthly_cesantias_interest(dec("100000"), dec("12")),
            dec("1000")
        );
        assert_eq!(monthly_cesantias_interest(dec("100000"), Decimal::ZERO), Decimal::ZERO);
    }
}
