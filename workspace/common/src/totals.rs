use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregated monthly totals for one planner under one scenario filter.
///
/// The derived fields (`total_monthly_outgoings`, `net_cash_flow`,
/// `net_value`) are always consistent with the base sums; construct values
/// through [`MonthlyTotals::from_sums`] to keep them that way.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct MonthlyTotals {
    /// Sum of monthly amounts over included income records
    pub monthly_income: Decimal,
    /// Sum of monthly amounts over included expense records
    pub monthly_expenses: Decimal,
    /// Sum of derived monthly averages over included bills
    pub monthly_bills: Decimal,
    /// Sum of monthly costs over included liabilities
    pub monthly_liabilities: Decimal,
    /// Expenses + bills + liabilities
    pub total_monthly_outgoings: Decimal,
    /// Income minus total outgoings
    pub net_cash_flow: Decimal,
    /// Sum of sale values over included assets
    pub asset_sales: Decimal,
    /// Sum of outstanding principals over included liabilities
    pub liability_principal: Decimal,
    /// Asset sales minus liability principal
    pub net_value: Decimal,
}

impl MonthlyTotals {
    /// Builds totals from the six base sums, computing the derived fields.
    pub fn from_sums(
        monthly_income: Decimal,
        monthly_expenses: Decimal,
        monthly_bills: Decimal,
        monthly_liabilities: Decimal,
        asset_sales: Decimal,
        liability_principal: Decimal,
    ) -> Self {
        let total_monthly_outgoings = monthly_expenses + monthly_bills + monthly_liabilities;
        Self {
            monthly_income,
            monthly_expenses,
            monthly_bills,
            monthly_liabilities,
            total_monthly_outgoings,
            net_cash_flow: monthly_income - total_monthly_outgoings,
            asset_sales,
            liability_principal,
            net_value: asset_sales - liability_principal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_sums_computes_derived_fields() {
        let totals = MonthlyTotals::from_sums(
            Decimal::new(2000, 0),
            Decimal::new(500, 0),
            Decimal::new(100, 0),
            Decimal::new(250, 0),
            Decimal::new(30000, 0),
            Decimal::new(5000, 0),
        );

        assert_eq!(totals.total_monthly_outgoings, Decimal::new(850, 0));
        assert_eq!(totals.net_cash_flow, Decimal::new(1150, 0));
        assert_eq!(totals.net_value, Decimal::new(25000, 0));
    }

    #[test]
    fn serializes_decimals_as_strings() {
        let totals = MonthlyTotals::from_sums(
            Decimal::new(100, 0),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        );

        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["monthly_income"], "100");
        assert_eq!(json["net_cash_flow"], "100");
    }
}
