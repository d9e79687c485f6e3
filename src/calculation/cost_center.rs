//! Cost-center report.
//!
//! Groups the period's payroll lines by the cost center each employee is
//! charged to and reports each group's share of the total employer cost.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayrollConfiguration;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CostCenterReport, CostCenterTotals, Employee, PayrollLine, PeriodPayroll,
    YearCostCenterReport,
};

use super::aggregate::{aggregate_lines, compute_lines};
use super::period::PeriodProration;

/// Code used for employees without a cost center.
pub const UNASSIGNED_COST_CENTER_CODE: &str = "SIN-CC";

/// Name used for employees without a cost center.
pub const UNASSIGNED_COST_CENTER_NAME: &str = "Sin Centro de Costo";

/// Builds the payroll cost report by cost center.
///
/// Cost centers are ordered by employer cost, highest first, ties broken
/// by code. Percentages are returned unrounded; a zero grand total yields
/// zero percentages.
///
/// # Errors
///
/// Fails with the first error raised while computing any employee's line.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::build_report;
/// use nomina_engine::config::{ConfigLoader, ConfigurationProvider};
/// use nomina_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// let config = loader.configuration("acme").unwrap();
/// let employees = vec![
///     Employee::new("a", Decimal::from(1_300_000)).with_cost_center("ADM", "Administración"),
///     Employee::new("b", Decimal::from(1_300_000)).with_cost_center("OPS", "Operaciones"),
/// ];
///
/// let report = build_report(&employees, config, Decimal::ONE).unwrap();
/// assert_eq!(report.cost_centers.len(), 2);
/// assert_eq!(report.cost_centers[0].percentage_of_total, Decimal::from(50));
/// ```
pub fn build_report(
    employees: &[Employee],
    config: &PayrollConfiguration,
    period_factor: Decimal,
) -> EngineResult<CostCenterReport> {
    let lines = compute_lines(employees, config, period_factor)?;
    let charged: Vec<(&Employee, &PayrollLine)> = employees.iter().zip(&lines).collect();
    assemble_report(&charged)
}

/// Builds the cost-center report for one year from several periods.
///
/// Only periods of `year` that have left `OPEN` are included; each is
/// prorated by its own boundary dates. Open periods and periods of other
/// years are listed as skipped.
///
/// # Errors
///
/// Fails with the first error raised while computing any included line.
pub fn build_year_report(
    year: i32,
    periods: &[PeriodPayroll],
    config: &PayrollConfiguration,
) -> EngineResult<YearCostCenterReport> {
    let mut periods_included = Vec::new();
    let mut periods_skipped = Vec::new();
    let mut computed = Vec::new();

    for payroll in periods {
        let name = payroll.period.period_name();
        if payroll.period.year != year || !payroll.period.is_processed() {
            debug!(
                period = %name,
                status = ?payroll.period.status,
                "Skipping period in year report"
            );
            periods_skipped.push(name);
            continue;
        }

        let proration = PeriodProration::from_period(&payroll.period);
        let lines = compute_lines(&payroll.employees, config, proration.period_factor)?;
        computed.push((payroll, lines));
        periods_included.push(name);
    }

    let charged: Vec<(&Employee, &PayrollLine)> = computed
        .iter()
        .flat_map(|(payroll, lines)| payroll.employees.iter().zip(lines))
        .collect();

    Ok(YearCostCenterReport {
        year,
        periods_included,
        periods_skipped,
        report: assemble_report(&charged)?,
    })
}

/// Groups computed lines by the cost center each employee is charged to.
fn assemble_report(charged: &[(&Employee, &PayrollLine)]) -> EngineResult<CostCenterReport> {
    let mut groups: BTreeMap<&str, (&str, Vec<&PayrollLine>)> = BTreeMap::new();
    for (employee, line) in charged {
        let (code, name) = match &employee.cost_center {
            Some(cc) => (cc.code.as_str(), cc.name.as_str()),
            None => (UNASSIGNED_COST_CENTER_CODE, UNASSIGNED_COST_CENTER_NAME),
        };
        groups.entry(code).or_insert_with(|| (name, Vec::new())).1.push(*line);
    }

    let mut cost_centers = Vec::with_capacity(groups.len());
    for (code, (name, group_lines)) in groups {
        let totals = aggregate_lines(group_lines)?;
        cost_centers.push(CostCenterTotals {
            code: code.to_string(),
            name: name.to_string(),
            total_employer_cost: totals.total_cost,
            totals,
            percentage_of_total: Decimal::ZERO,
        });
    }

    let grand_total_employer_cost = cost_centers
        .iter()
        .try_fold(Decimal::ZERO, |sum, cc| sum.checked_add(cc.total_employer_cost))
        .ok_or_else(|| EngineError::InvalidPeriod {
            message: "grand total employer cost overflows".to_string(),
        })?;

    if grand_total_employer_cost > Decimal::ZERO {
        for cc in &mut cost_centers {
            // Dividing first keeps the intermediate value at most 1.
            cc.percentage_of_total =
                cc.total_employer_cost / grand_total_employer_cost * Decimal::ONE_HUNDRED;
        }
    }

    cost_centers.sort_by(|a, b| {
        b.total_employer_cost
            .cmp(&a.total_employer_cost)
            .then_with(|| a.code.cmp(&b.code))
    });

    let summary = aggregate_lines(charged.iter().map(|(_, line)| *line))?;

    debug!(
        cost_centers = cost_centers.len(),
        grand_total_employer_cost = %grand_total_employer_cost,
        "Built cost center report"
    );

    Ok(CostCenterReport {
        cost_centers,
        summary,
        grand_total_employer_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::aggregate;
    use crate::calculation::test_support::{dec, test_config};
    use crate::models::{PayrollPeriod, PeriodStatus, PeriodType};

    fn employees() -> Vec<Employee> {
        vec![
            Employee::new("a", dec("1300000")).with_cost_center("ADM", "Administración"),
            Employee::new("b", dec("4000000")).with_cost_center("OPS", "Operaciones"),
            Employee::new("c", dec("1300000")).with_cost_center("ADM", "Administración"),
            Employee::new("d", dec("1000000")),
        ]
    }

    #[test]
    fn test_groups_by_cost_center_and_unassigned() {
        let report = build_report(&employees(), &test_config(), Decimal::ONE).unwrap();

        let codes: Vec<&str> = report.cost_centers.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes.len(), 3);
        assert!(codes.contains(&"ADM"));
        assert!(codes.contains(&"OPS"));
        assert!(codes.contains(&UNASSIGNED_COST_CENTER_CODE));

        let adm = report.cost_centers.iter().find(|c| c.code == "ADM").unwrap();
        assert_eq!(adm.totals.total_employees, 2);
        assert_eq!(adm.name, "Administración");

        let unassigned = report
            .cost_centers
            .iter()
            .find(|c| c.code == UNASSIGNED_COST_CENTER_CODE)
            .unwrap();
        assert_eq!(unassigned.name, UNASSIGNED_COST_CENTER_NAME);
    }

    #[test]
    fn test_summary_equals_period_aggregate() {
        let config = test_config();
        let report = build_report(&employees(), &config, dec("0.5")).unwrap();
        let totals = aggregate(&employees(), &config, dec("0.5")).unwrap();

        assert_eq!(report.summary, totals);
        assert_eq!(report.grand_total_employer_cost, totals.total_cost);
    }

    #[test]
    fn test_percentages_share_the_grand_total() {
        let report = build_report(&employees(), &test_config(), Decimal::ONE).unwrap();

        for cc in &report.cost_centers {
            assert_eq!(
                cc.percentage_of_total,
                cc.total_employer_cost / report.grand_total_employer_cost * Decimal::ONE_HUNDRED
            );
        }

        let sum: Decimal = report
            .cost_centers
            .iter()
            .map(|c| c.percentage_of_total)
            .sum();
        assert!((sum - Decimal::ONE_HUNDRED).abs() < dec("0.000000001"));
    }

    #[test]
    fn test_sorted_by_employer_cost_descending() {
        let report = build_report(&employees(), &test_config(), Decimal::ONE).unwrap();

        let costs: Vec<Decimal> = report
            .cost_centers
            .iter()
            .map(|c| c.total_employer_cost)
            .collect();
        let mut sorted = costs.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(costs, sorted);
    }

    #[test]
    fn test_zero_grand_total_gives_zero_percentages() {
        let employees = vec![Employee::new("z", Decimal::ZERO).without_transport_allowance()];
        let report = build_report(&employees, &test_config(), Decimal::ONE).unwrap();

        assert_eq!(report.grand_total_employer_cost, Decimal::ZERO);
        assert_eq!(report.cost_centers[0].percentage_of_total, Decimal::ZERO);
    }

    #[test]
    fn test_empty_employee_list() {
        let report = build_report(&[], &test_config(), Decimal::ONE).unwrap();
        assert!(report.cost_centers.is_empty());
        assert_eq!(report.summary.total_employees, 0);
    }

    #[test]
    fn test_invalid_employee_fails_report() {
        let mut list = employees();
        list.push(Employee::new("neg", dec("-5")).with_cost_center("OPS", "Operaciones"));

        let result = build_report(&list, &test_config(), Decimal::ONE);
        assert!(matches!(result, Err(EngineError::InvalidEmployee { .. })));
    }

    fn period(number: u32, year: i32, status: PeriodStatus) -> PayrollPeriod {
        let start = chrono::NaiveDate::from_ymd_opt(year, number, 1);
        let end = chrono::NaiveDate::from_ymd_opt(year, number, 30);
        PayrollPeriod {
            period_type: PeriodType::Monthly,
            period_number: number,
            year,
            start_date: start,
            end_date: end,
            status,
        }
    }

    fn payroll(period: PayrollPeriod) -> PeriodPayroll {
        PeriodPayroll {
            period,
            employees: employees(),
        }
    }

    #[test]
    fn test_year_report_skips_open_periods() {
        let config = test_config();
        let periods = vec![
            payroll(period(1, 2025, PeriodStatus::Closed)),
            payroll(period(3, 2025, PeriodStatus::Paid)),
            payroll(period(4, 2025, PeriodStatus::Open)),
        ];

        let year = build_year_report(2025, &periods, &config).unwrap();

        assert_eq!(year.year, 2025);
        assert_eq!(year.periods_included, vec!["MONTHLY 1/2025", "MONTHLY 3/2025"]);
        assert_eq!(year.periods_skipped, vec!["MONTHLY 4/2025"]);
        assert_eq!(year.report.summary.total_employees, 8);

        let single = build_report(&employees(), &config, Decimal::ONE).unwrap();
        assert_eq!(
            year.report.grand_total_employer_cost,
            single.grand_total_employer_cost * Decimal::from(2)
        );
    }

    #[test]
    fn test_year_report_skips_other_years() {
        let periods = vec![
            payroll(period(11, 2024, PeriodStatus::Closed)),
            payroll(period(1, 2025, PeriodStatus::Liquidated)),
        ];

        let year = build_year_report(2025, &periods, &test_config()).unwrap();

        assert_eq!(year.periods_included, vec!["MONTHLY 1/2025"]);
        assert_eq!(year.periods_skipped, vec!["MONTHLY 11/2024"]);
    }

    #[test]
    fn test_year_report_prorates_each_period() {
        let config = test_config();
        let mut fortnight = period(1, 2025, PeriodStatus::Liquidated);
        fortnight.period_type = PeriodType::Biweekly;
        fortnight.end_date = chrono::NaiveDate::from_ymd_opt(2025, 1, 15);

        let year = build_year_report(2025, &[payroll(fortnight)], &config).unwrap();
        let half = build_report(&employees(), &config, dec("0.5")).unwrap();

        assert_eq!(year.report, half);
    }

    #[test]
    fn test_year_report_with_only_open_periods_is_empty() {
        let periods = vec![payroll(period(2, 2025, PeriodStatus::Open))];

        let year = build_year_report(2025, &periods, &test_config()).unwrap();

        assert!(year.periods_included.is_empty());
        assert!(year.report.cost_centers.is_empty());
        assert_eq!(year.report.grand_total_employer_cost, Decimal::ZERO);
    }

    #[test]
    fn test_percentages_do_not_overflow_for_large_costs() {
        let config = test_config();
        let employees = vec![
            Employee::new("a", Decimal::from(crate::calculation::MAX_AMOUNT)),
            Employee::new("b", Decimal::from(crate::calculation::MAX_AMOUNT)),
        ];
        let factor = Decimal::from(crate::calculation::MAX_PERIOD_FACTOR);

        let report = build_report(&employees, &config, factor).unwrap();
        assert_eq!(report.cost_centers[0].percentage_of_total, Decimal::ONE_HUNDRED);
    }
}
