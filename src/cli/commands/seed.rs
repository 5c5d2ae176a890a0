use anyhow::Result;
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use model::entities::{
    asset, bill, category,
    category::CategoryKind,
    expense, income, liability, planner, scenario,
};
use model::entities::asset::IncludeToggle;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use tracing::{debug, error, info, trace};

/// Populates the database with one sample planner holding a realistic
/// mix of records, handy for poking at the API during development.
pub async fn seed_database(database_url: &str) -> Result<()> {
    trace!("Entering seed_database function");
    info!("Seeding database with sample data");
    debug!("Database URL: {}", database_url);

    let db: DatabaseConnection = match Database::connect(database_url).await {
        Ok(connection) => {
            info!("Successfully connected to database");
            connection
        }
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database_url, e);
            return Err(e.into());
        }
    };

    trace!("Ensuring migrations are applied before seeding");
    Migrator::up(&db, None).await?;

    let now = Utc::now().naive_utc();

    let planner = planner::ActiveModel {
        name: Set("Main Budget Plan".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    info!("Created planner: id={}, name={}", planner.id, planner.name);

    for (code, display_name, sale_month) in [
        ("A", "Scenario A", 0),
        ("B", "Scenario B", 3),
        ("C", "Scenario C", 1),
    ] {
        scenario::ActiveModel {
            planner_id: Set(planner.id),
            scenario: Set(code.to_string()),
            display_name: Set(display_name.to_string()),
            sale_month: Set(sale_month),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }
    debug!("Created scenarios A, B and C");

    let mut category_ids = Vec::new();
    for name in ["Housing", "Transportation", "Utilities", "Food", "Entertainment"] {
        let created = category::ActiveModel {
            planner_id: Set(planner.id),
            kind: Set(CategoryKind::Expense),
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        category_ids.push(created.id);
    }
    let housing = category_ids[0];
    let transportation = category_ids[1];
    let utilities = category_ids[2];
    let food = category_ids[3];
    debug!("Created {} categories", category_ids.len());

    let house = asset::ActiveModel {
        planner_id: Set(planner.id),
        name: Set("Family House".to_string()),
        include_toggle: Set(IncludeToggle::On),
        scenario: Set("ALL".to_string()),
        sale_value: Set(Decimal::new(25_000_000, 2)),
        notes: Set(Some("Primary residence".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let car = asset::ActiveModel {
        planner_id: Set(planner.id),
        name: Set("Family Car".to_string()),
        include_toggle: Set(IncludeToggle::On),
        scenario: Set("ALL".to_string()),
        sale_value: Set(Decimal::new(1_500_000, 2)),
        notes: Set(Some("Main family vehicle".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    liability::ActiveModel {
        planner_id: Set(planner.id),
        name: Set("House Mortgage".to_string()),
        include_toggle: Set(IncludeToggle::On),
        scenario: Set("ALL".to_string()),
        monthly_cost: Set(Decimal::new(120_000, 2)),
        principal: Set(Some(Decimal::new(18_000_000, 2))),
        linked_asset_id: Set(Some(house.id)),
        notes: Set(Some("Primary mortgage".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    liability::ActiveModel {
        planner_id: Set(planner.id),
        name: Set("Car Loan".to_string()),
        include_toggle: Set(IncludeToggle::On),
        scenario: Set("ALL".to_string()),
        monthly_cost: Set(Decimal::new(30_000, 2)),
        principal: Set(Some(Decimal::new(800_000, 2))),
        linked_asset_id: Set(Some(car.id)),
        notes: Set(Some("Car financing".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    income::ActiveModel {
        planner_id: Set(planner.id),
        name: Set("Primary Salary".to_string()),
        include_toggle: Set(IncludeToggle::On),
        scenario: Set("ALL".to_string()),
        monthly_amount: Set(Decimal::new(400_000, 2)),
        notes: Set(Some("Main employment income".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    expense::ActiveModel {
        planner_id: Set(planner.id),
        name: Set("Groceries".to_string()),
        include_toggle: Set(IncludeToggle::On),
        scenario: Set("ALL".to_string()),
        monthly_amount: Set(Decimal::new(60_000, 2)),
        category_id: Set(Some(food)),
        notes: Set(Some("Monthly grocery shopping".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    expense::ActiveModel {
        planner_id: Set(planner.id),
        name: Set("Gas & Fuel".to_string()),
        include_toggle: Set(IncludeToggle::On),
        scenario: Set("ALL".to_string()),
        monthly_amount: Set(Decimal::new(20_000, 2)),
        category_id: Set(Some(transportation)),
        linked_asset_id: Set(Some(car.id)),
        notes: Set(Some("Car fuel expenses".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    // Bills with mixed intervals: two monthly, two annual
    for (name, amount, interval, cat, linked_asset, notes) in [
        (
            "Electricity Bill",
            Decimal::new(15_000, 2),
            1,
            utilities,
            Some(house.id),
            "Monthly electricity",
        ),
        (
            "Internet & Phone",
            Decimal::new(8_000, 2),
            1,
            utilities,
            None,
            "Internet and phone service",
        ),
        (
            "Home Insurance",
            Decimal::new(120_000, 2),
            12,
            housing,
            Some(house.id),
            "Annual home insurance premium",
        ),
        (
            "Property Tax",
            Decimal::new(240_000, 2),
            12,
            housing,
            Some(house.id),
            "Annual property tax",
        ),
    ] {
        bill::ActiveModel {
            planner_id: Set(planner.id),
            name: Set(name.to_string()),
            include_toggle: Set(IncludeToggle::On),
            scenario: Set("ALL".to_string()),
            bill_amount: Set(amount),
            interval_months: Set(interval),
            category_id: Set(Some(cat)),
            linked_asset_id: Set(linked_asset),
            notes: Set(Some(notes.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }

    info!("Seed data created successfully for planner id={}", planner.id);
    trace!("seed_database function completed");

    Ok(())
}
