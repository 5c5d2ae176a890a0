//! Monthly aggregation.
//!
//! Folds one planner's records, restricted by a scenario filter and the
//! effective include cascade, into a single [`MonthlyTotals`] snapshot.

use common::MonthlyTotals;
use rust_decimal::Decimal;
use tracing::debug;

use model::entities::{asset, bill, expense, income, liability};

use crate::effective::ToggleIndex;
use crate::error::{ComputeError, Result};
use crate::filter::{applies, ScenarioFilter};

/// Rejects bill intervals the monthly average is undefined for. The read
/// path never trusts this and treats a non-positive interval as a zero
/// average instead of dividing.
pub fn validate_interval_months(interval_months: i32) -> Result<()> {
    if interval_months < 1 {
        return Err(ComputeError::InvalidInterval(interval_months));
    }
    Ok(())
}

/// Computes the monthly totals for one planner under a scenario filter.
///
/// All sums run over records that pass the resolver; expenses, bills and
/// liabilities additionally pass the effective include cascade. A missing
/// liability principal counts as zero.
pub fn monthly_totals(
    assets: &[asset::Model],
    liabilities: &[liability::Model],
    incomes: &[income::Model],
    expenses: &[expense::Model],
    bills: &[bill::Model],
    filter: &ScenarioFilter,
) -> MonthlyTotals {
    let index = ToggleIndex::new(assets, liabilities);

    let monthly_income: Decimal = incomes
        .iter()
        .filter(|i| applies(*i, filter))
        .map(|i| i.monthly_amount)
        .sum();

    let monthly_expenses: Decimal = expenses
        .iter()
        .filter(|e| applies(*e, filter) && index.effective_expense(e))
        .map(|e| e.monthly_amount)
        .sum();

    let monthly_bills: Decimal = bills
        .iter()
        .filter(|b| applies(*b, filter) && index.effective_bill(b))
        .map(|b| b.monthly_average())
        .sum();

    let (monthly_liabilities, liability_principal) = liabilities
        .iter()
        .filter(|l| applies(*l, filter) && index.effective_liability(l))
        .fold((Decimal::ZERO, Decimal::ZERO), |(cost, principal), l| {
            (
                cost + l.monthly_cost,
                principal + l.principal.unwrap_or(Decimal::ZERO),
            )
        });

    let asset_sales: Decimal = assets
        .iter()
        .filter(|a| applies(*a, filter))
        .map(|a| a.sale_value)
        .sum();

    let totals = MonthlyTotals::from_sums(
        monthly_income,
        monthly_expenses,
        monthly_bills,
        monthly_liabilities,
        asset_sales,
        liability_principal,
    );
    debug!(?filter, ?totals, "computed monthly totals");
    totals
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDateTime, Utc};
    use model::entities::asset::IncludeToggle;

    use super::*;

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn income_row(amount: i64, scenario: &str, toggle: IncludeToggle) -> income::Model {
        income::Model {
            id: 0,
            planner_id: 1,
            name: "income".to_string(),
            include_toggle: toggle,
            scenario: scenario.to_string(),
            monthly_amount: dec(amount),
            notes: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn expense_row(amount: i64, scenario: &str, toggle: IncludeToggle) -> expense::Model {
        expense::Model {
            id: 0,
            planner_id: 1,
            name: "expense".to_string(),
            include_toggle: toggle,
            scenario: scenario.to_string(),
            monthly_amount: dec(amount),
            category_id: None,
            linked_asset_id: None,
            linked_liability_id: None,
            notes: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn bill_row(amount: i64, interval: i32, scenario: &str, toggle: IncludeToggle) -> bill::Model {
        bill::Model {
            id: 0,
            planner_id: 1,
            name: "bill".to_string(),
            include_toggle: toggle,
            scenario: scenario.to_string(),
            bill_amount: dec(amount),
            interval_months: interval,
            category_id: None,
            linked_asset_id: None,
            linked_liability_id: None,
            notes: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn liability_row(
        cost: i64,
        principal: Option<i64>,
        scenario: &str,
        toggle: IncludeToggle,
    ) -> liability::Model {
        liability::Model {
            id: 0,
            planner_id: 1,
            name: "liability".to_string(),
            include_toggle: toggle,
            scenario: scenario.to_string(),
            monthly_cost: dec(cost),
            principal: principal.map(dec),
            linked_asset_id: None,
            notes: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn asset_row(value: i64, scenario: &str, toggle: IncludeToggle) -> asset::Model {
        asset::Model {
            id: 0,
            planner_id: 1,
            name: "asset".to_string(),
            include_toggle: toggle,
            scenario: scenario.to_string(),
            sale_value: dec(value),
            notes: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn worked_example() {
        // Income 2000 (ALL), expense 500 (ALL), yearly bill 1200 -> 100,
        // liability 300/month toggled off with principal 5000.
        let incomes = vec![income_row(2000, "ALL", IncludeToggle::On)];
        let expenses = vec![expense_row(500, "ALL", IncludeToggle::On)];
        let bills = vec![bill_row(1200, 12, "ALL", IncludeToggle::On)];
        let liabilities = vec![liability_row(300, Some(5000), "ALL", IncludeToggle::Off)];

        let totals = monthly_totals(
            &[],
            &liabilities,
            &incomes,
            &expenses,
            &bills,
            &ScenarioFilter::All,
        );

        assert_eq!(totals.monthly_income, dec(2000));
        assert_eq!(totals.monthly_expenses, dec(500));
        assert_eq!(totals.monthly_bills, dec(100));
        assert_eq!(totals.monthly_liabilities, dec(0));
        assert_eq!(totals.total_monthly_outgoings, dec(600));
        assert_eq!(totals.net_cash_flow, dec(1400));
        assert_eq!(totals.liability_principal, dec(0));
        assert_eq!(totals.asset_sales, dec(0));
        assert_eq!(totals.net_value, dec(0));
    }

    #[test]
    fn zero_interval_bill_contributes_nothing() {
        let bills = vec![bill_row(1200, 0, "ALL", IncludeToggle::On)];
        let totals = monthly_totals(&[], &[], &[], &[], &bills, &ScenarioFilter::All);
        assert_eq!(totals.monthly_bills, dec(0));
        assert!(validate_interval_months(0).is_err());
        assert!(validate_interval_months(1).is_ok());
    }

    #[test]
    fn scenario_filter_partitions_records() {
        let incomes = vec![
            income_row(1000, "ALL", IncludeToggle::On),
            income_row(200, "A", IncludeToggle::On),
            income_row(50, "B", IncludeToggle::On),
        ];

        let under_a = monthly_totals(
            &[],
            &[],
            &incomes,
            &[],
            &[],
            &ScenarioFilter::Code("A".to_string()),
        );
        assert_eq!(under_a.monthly_income, dec(1200));

        let under_b = monthly_totals(
            &[],
            &[],
            &incomes,
            &[],
            &[],
            &ScenarioFilter::Code("B".to_string()),
        );
        assert_eq!(under_b.monthly_income, dec(1050));

        let under_all = monthly_totals(&[], &[], &incomes, &[], &[], &ScenarioFilter::All);
        assert_eq!(under_all.monthly_income, dec(1250));
    }

    #[test]
    fn excluded_records_change_nothing() {
        let incomes = vec![
            income_row(1000, "ALL", IncludeToggle::On),
            income_row(9999, "ALL", IncludeToggle::Off),
        ];
        let totals = monthly_totals(&[], &[], &incomes, &[], &[], &ScenarioFilter::All);
        assert_eq!(totals.monthly_income, dec(1000));
    }

    #[test]
    fn asset_sales_and_principal_feed_net_value() {
        let assets = vec![
            asset_row(350_000, "A", IncludeToggle::On),
            asset_row(12_000, "B", IncludeToggle::On),
        ];
        let liabilities = vec![liability_row(1200, Some(200_000), "A", IncludeToggle::On)];

        let totals = monthly_totals(
            &assets,
            &liabilities,
            &[],
            &[],
            &[],
            &ScenarioFilter::Code("A".to_string()),
        );
        assert_eq!(totals.asset_sales, dec(350_000));
        assert_eq!(totals.liability_principal, dec(200_000));
        assert_eq!(totals.net_value, dec(150_000));
        // Missing principal counts as zero
        let no_principal = vec![liability_row(100, None, "ALL", IncludeToggle::On)];
        let totals = monthly_totals(&[], &no_principal, &[], &[], &[], &ScenarioFilter::All);
        assert_eq!(totals.liability_principal, dec(0));
        assert_eq!(totals.monthly_liabilities, dec(100));
    }

    #[test]
    fn toggled_off_asset_silences_its_liability() {
        let assets = vec![{
            let mut a = asset_row(50_000, "ALL", IncludeToggle::Off);
            a.id = 7;
            a
        }];
        let liabilities = vec![{
            let mut l = liability_row(400, Some(30_000), "ALL", IncludeToggle::On);
            l.linked_asset_id = Some(7);
            l
        }];

        let totals = monthly_totals(&assets, &liabilities, &[], &[], &[], &ScenarioFilter::All);
        assert_eq!(totals.asset_sales, dec(0));
        assert_eq!(totals.monthly_liabilities, dec(0));
        assert_eq!(totals.liability_principal, dec(0));
    }

    #[test]
    fn identities_hold_exactly() {
        let incomes = vec![income_row(3210, "ALL", IncludeToggle::On)];
        let expenses = vec![expense_row(450, "ALL", IncludeToggle::On)];
        let bills = vec![bill_row(100, 3, "ALL", IncludeToggle::On)];
        let liabilities = vec![liability_row(1200, Some(200_000), "ALL", IncludeToggle::On)];
        let assets = vec![asset_row(350_000, "ALL", IncludeToggle::On)];

        let t = monthly_totals(
            &assets,
            &liabilities,
            &incomes,
            &expenses,
            &bills,
            &ScenarioFilter::All,
        );
        assert_eq!(
            t.total_monthly_outgoings,
            t.monthly_expenses + t.monthly_bills + t.monthly_liabilities
        );
        assert_eq!(t.net_cash_flow, t.monthly_income - t.total_monthly_outgoings);
        assert_eq!(t.net_value, t.asset_sales - t.liability_principal);
    }
}
