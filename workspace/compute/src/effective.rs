//! Effective include status.
//!
//! Toggling off an asset or a liability also silences everything hanging off
//! it: a liability linked to an excluded asset is effectively excluded, and
//! an expense or bill linked to an excluded asset or liability is too. The
//! cascade is one level deep through the liability, which itself folds in
//! its asset link.

use std::collections::HashMap;

use model::entities::asset::IncludeToggle;
use model::entities::{asset, bill, expense, liability};

/// Precomputed toggle lookups for one planner's assets and liabilities.
///
/// Links pointing at records outside the index (e.g. cleared by a cascade
/// delete mid-flight) impose no constraint.
#[derive(Debug, Default)]
pub struct ToggleIndex {
    asset_on: HashMap<i32, bool>,
    liability_on: HashMap<i32, bool>,
}

impl ToggleIndex {
    pub fn new(assets: &[asset::Model], liabilities: &[liability::Model]) -> Self {
        let asset_on: HashMap<i32, bool> = assets
            .iter()
            .map(|a| (a.id, a.include_toggle == IncludeToggle::On))
            .collect();

        // The liability entry is already effective: its own toggle folded
        // with its asset link.
        let liability_on = liabilities
            .iter()
            .map(|l| {
                let own = l.include_toggle == IncludeToggle::On;
                let via_asset = l
                    .linked_asset_id
                    .map_or(true, |id| asset_on.get(&id).copied().unwrap_or(true));
                (l.id, own && via_asset)
            })
            .collect();

        Self {
            asset_on,
            liability_on,
        }
    }

    fn asset_link_on(&self, id: Option<i32>) -> bool {
        id.map_or(true, |id| self.asset_on.get(&id).copied().unwrap_or(true))
    }

    fn liability_link_on(&self, id: Option<i32>) -> bool {
        id.map_or(true, |id| {
            self.liability_on.get(&id).copied().unwrap_or(true)
        })
    }

    /// Effective status of a liability: its own toggle and its asset link.
    pub fn effective_liability(&self, liability: &liability::Model) -> bool {
        liability.include_toggle == IncludeToggle::On
            && self.asset_link_on(liability.linked_asset_id)
    }

    /// Effective status of an expense: its own toggle plus both links.
    pub fn effective_expense(&self, expense: &expense::Model) -> bool {
        expense.include_toggle == IncludeToggle::On
            && self.asset_link_on(expense.linked_asset_id)
            && self.liability_link_on(expense.linked_liability_id)
    }

    /// Effective status of a bill: its own toggle plus both links.
    pub fn effective_bill(&self, bill: &bill::Model) -> bool {
        bill.include_toggle == IncludeToggle::On
            && self.asset_link_on(bill.linked_asset_id)
            && self.liability_link_on(bill.linked_liability_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn make_asset(id: i32, toggle: IncludeToggle) -> asset::Model {
        let now = Utc::now().naive_utc();
        asset::Model {
            id,
            planner_id: 1,
            name: format!("asset-{id}"),
            include_toggle: toggle,
            scenario: "ALL".to_string(),
            sale_value: Decimal::ZERO,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn make_liability(id: i32, toggle: IncludeToggle, linked_asset_id: Option<i32>) -> liability::Model {
        let now = Utc::now().naive_utc();
        liability::Model {
            id,
            planner_id: 1,
            name: format!("liability-{id}"),
            include_toggle: toggle,
            scenario: "ALL".to_string(),
            monthly_cost: Decimal::ZERO,
            principal: None,
            linked_asset_id,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn make_bill(
        id: i32,
        toggle: IncludeToggle,
        linked_asset_id: Option<i32>,
        linked_liability_id: Option<i32>,
    ) -> bill::Model {
        let now = Utc::now().naive_utc();
        bill::Model {
            id,
            planner_id: 1,
            name: format!("bill-{id}"),
            include_toggle: toggle,
            scenario: "ALL".to_string(),
            bill_amount: Decimal::ZERO,
            interval_months: 1,
            category_id: None,
            linked_asset_id,
            linked_liability_id,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn make_expense(
        id: i32,
        toggle: IncludeToggle,
        linked_asset_id: Option<i32>,
        linked_liability_id: Option<i32>,
    ) -> expense::Model {
        let now = Utc::now().naive_utc();
        expense::Model {
            id,
            planner_id: 1,
            name: format!("expense-{id}"),
            include_toggle: toggle,
            scenario: "ALL".to_string(),
            monthly_amount: Decimal::ZERO,
            category_id: None,
            linked_asset_id,
            linked_liability_id,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn liability_follows_its_asset_toggle() {
        let assets = vec![make_asset(1, IncludeToggle::Off)];
        let liabilities = vec![
            make_liability(10, IncludeToggle::On, Some(1)),
            make_liability(11, IncludeToggle::On, None),
        ];
        let index = ToggleIndex::new(&assets, &liabilities);

        assert!(!index.effective_liability(&liabilities[0]));
        assert!(index.effective_liability(&liabilities[1]));
    }

    #[test]
    fn expense_and_bill_cascade_through_both_links() {
        let assets = vec![make_asset(1, IncludeToggle::Off), make_asset(2, IncludeToggle::On)];
        let liabilities = vec![make_liability(10, IncludeToggle::On, Some(1))];
        let index = ToggleIndex::new(&assets, &liabilities);

        // Off via the asset link
        assert!(!index.effective_expense(&make_expense(20, IncludeToggle::On, Some(1), None)));
        // Off via a liability that is itself silenced by its asset
        assert!(!index.effective_bill(&make_bill(30, IncludeToggle::On, None, Some(10))));
        // On when the links are on
        assert!(index.effective_expense(&make_expense(21, IncludeToggle::On, Some(2), None)));
        // Own toggle always wins
        assert!(!index.effective_bill(&make_bill(31, IncludeToggle::Off, Some(2), None)));
    }

    #[test]
    fn dangling_links_impose_no_constraint() {
        let index = ToggleIndex::new(&[], &[]);
        assert!(index.effective_expense(&make_expense(1, IncludeToggle::On, Some(99), Some(99))));
    }
}
