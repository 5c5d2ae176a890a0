//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the budget-planning application here:
//! flat record tables carrying a scenario tag and an include toggle,
//! plus the scenario settings that name the alternative timelines.

pub mod asset;
pub mod bill;
pub mod category;
pub mod expense;
pub mod income;
pub mod liability;
pub mod planner;
pub mod scenario;
pub mod scenario_item;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::asset::Entity as Asset;
    pub use super::bill::Entity as Bill;
    pub use super::category::Entity as Category;
    pub use super::expense::Entity as Expense;
    pub use super::income::Entity as Income;
    pub use super::liability::Entity as Liability;
    pub use super::planner::Entity as Planner;
    pub use super::scenario::Entity as Scenario;
    pub use super::scenario_item::Entity as ScenarioItem;
}

#[cfg(test)]
mod test {
    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, QueryFilter, Set,
    };

    use super::*;
    use asset::IncludeToggle;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        // Try to apply migrations first
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let now = Utc::now().naive_utc();

        // Create a planner
        let planner = planner::ActiveModel {
            name: Set("Household plan".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a category for bills
        let category = category::ActiveModel {
            planner_id: Set(planner.id),
            kind: Set(category::CategoryKind::Bill),
            name: Set("Insurance".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create an asset
        let house = asset::ActiveModel {
            planner_id: Set(planner.id),
            name: Set("House".to_string()),
            include_toggle: Set(IncludeToggle::On),
            scenario: Set("A".to_string()),
            sale_value: Set(Decimal::new(35000000, 2)), // 350000.00
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a liability linked to the asset
        let mortgage = liability::ActiveModel {
            planner_id: Set(planner.id),
            name: Set("Mortgage".to_string()),
            include_toggle: Set(IncludeToggle::On),
            scenario: Set("A".to_string()),
            monthly_cost: Set(Decimal::new(120000, 2)), // 1200.00
            principal: Set(Some(Decimal::new(20000000, 2))), // 200000.00
            linked_asset_id: Set(Some(house.id)),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create income, expense and bill rows
        let salary = income::ActiveModel {
            planner_id: Set(planner.id),
            name: Set("Salary".to_string()),
            include_toggle: Set(IncludeToggle::On),
            scenario: Set("ALL".to_string()),
            monthly_amount: Set(Decimal::new(300000, 2)), // 3000.00
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let groceries = expense::ActiveModel {
            planner_id: Set(planner.id),
            name: Set("Groceries".to_string()),
            include_toggle: Set(IncludeToggle::On),
            scenario: Set("ALL".to_string()),
            monthly_amount: Set(Decimal::new(45000, 2)), // 450.00
            category_id: Set(None),
            linked_asset_id: Set(None),
            linked_liability_id: Set(None),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let insurance = bill::ActiveModel {
            planner_id: Set(planner.id),
            name: Set("Home insurance".to_string()),
            include_toggle: Set(IncludeToggle::On),
            scenario: Set("ALL".to_string()),
            bill_amount: Set(Decimal::new(120000, 2)), // 1200.00 yearly
            interval_months: Set(12),
            category_id: Set(Some(category.id)),
            linked_asset_id: Set(Some(house.id)),
            linked_liability_id: Set(None),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a scenario and attach the house to it
        let scenario_a = scenario::ActiveModel {
            planner_id: Set(planner.id),
            scenario: Set("A".to_string()),
            display_name: Set("Sell House".to_string()),
            sale_month: Set(6),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let item = scenario_item::ActiveModel {
            scenario_id: Set(scenario_a.id),
            item_id: Set(house.id),
            item_type: Set(scenario_item::ItemType::Asset),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Read back and verify

        let planners = Planner::find().all(&db).await?;
        assert_eq!(planners.len(), 1);

        let assets = Asset::find()
            .filter(asset::Column::PlannerId.eq(planner.id))
            .all(&db)
            .await?;
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].sale_value, Decimal::new(35000000, 2));

        let liabilities = Liability::find().all(&db).await?;
        assert_eq!(liabilities.len(), 1);
        assert_eq!(liabilities[0].linked_asset_id, Some(house.id));
        assert_eq!(liabilities[0].id, mortgage.id);

        let incomes = Income::find().all(&db).await?;
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0].id, salary.id);
        assert_eq!(incomes[0].scenario, "ALL");

        let expenses = Expense::find().all(&db).await?;
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, groceries.id);

        let bills = Bill::find().all(&db).await?;
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].id, insurance.id);
        // Derived monthly average, never stored
        assert_eq!(bills[0].monthly_average(), Decimal::new(10000, 2));

        let items = ScenarioItem::find()
            .filter(scenario_item::Column::ScenarioId.eq(scenario_a.id))
            .all(&db)
            .await?;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, item.id);
        assert_eq!(items[0].item_type, scenario_item::ItemType::Asset);

        // Scenario codes are unique per planner
        let duplicate = scenario::ActiveModel {
            planner_id: Set(planner.id),
            scenario: Set("A".to_string()),
            display_name: Set("Duplicate".to_string()),
            sale_month: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await;
        assert!(duplicate.is_err());

        Ok(())
    }
}
