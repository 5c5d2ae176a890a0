use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create planners table
        manager
            .create_table(
                Table::create()
                    .table(Planners::Table)
                    .if_not_exists()
                    .col(pk_auto(Planners::Id))
                    .col(string(Planners::Name))
                    .col(date_time(Planners::CreatedAt).default(Expr::current_timestamp()))
                    .col(date_time(Planners::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(integer(Categories::PlannerId))
                    .col(string_len(Categories::Kind, 10))
                    .col(string(Categories::Name))
                    .col(date_time(Categories::CreatedAt).default(Expr::current_timestamp()))
                    .col(date_time(Categories::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_planner")
                            .from(Categories::Table, Categories::PlannerId)
                            .to(Planners::Table, Planners::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_categories_planner_kind_name")
                    .table(Categories::Table)
                    .col(Categories::PlannerId)
                    .col(Categories::Kind)
                    .col(Categories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create assets table
        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(pk_auto(Assets::Id))
                    .col(integer(Assets::PlannerId))
                    .col(string(Assets::Name))
                    .col(string_len(Assets::IncludeToggle, 3).default("on"))
                    .col(string(Assets::Scenario).default("ALL"))
                    .col(decimal_len(Assets::SaleValue, 14, 2).default(0))
                    .col(string_null(Assets::Notes))
                    .col(date_time(Assets::CreatedAt).default(Expr::current_timestamp()))
                    .col(date_time(Assets::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_planner")
                            .from(Assets::Table, Assets::PlannerId)
                            .to(Planners::Table, Planners::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create liabilities table
        manager
            .create_table(
                Table::create()
                    .table(Liabilities::Table)
                    .if_not_exists()
                    .col(pk_auto(Liabilities::Id))
                    .col(integer(Liabilities::PlannerId))
                    .col(string(Liabilities::Name))
                    .col(string_len(Liabilities::IncludeToggle, 3).default("on"))
                    .col(string(Liabilities::Scenario).default("ALL"))
                    .col(decimal_len(Liabilities::MonthlyCost, 14, 2).default(0))
                    .col(decimal_len_null(Liabilities::Principal, 14, 2))
                    .col(integer_null(Liabilities::LinkedAssetId))
                    .col(string_null(Liabilities::Notes))
                    .col(date_time(Liabilities::CreatedAt).default(Expr::current_timestamp()))
                    .col(date_time(Liabilities::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_liability_planner")
                            .from(Liabilities::Table, Liabilities::PlannerId)
                            .to(Planners::Table, Planners::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_liability_linked_asset")
                            .from(Liabilities::Table, Liabilities::LinkedAssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create income table
        manager
            .create_table(
                Table::create()
                    .table(Income::Table)
                    .if_not_exists()
                    .col(pk_auto(Income::Id))
                    .col(integer(Income::PlannerId))
                    .col(string(Income::Name))
                    .col(string_len(Income::IncludeToggle, 3).default("on"))
                    .col(string(Income::Scenario).default("ALL"))
                    .col(decimal_len(Income::MonthlyAmount, 14, 2).default(0))
                    .col(string_null(Income::Notes))
                    .col(date_time(Income::CreatedAt).default(Expr::current_timestamp()))
                    .col(date_time(Income::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_income_planner")
                            .from(Income::Table, Income::PlannerId)
                            .to(Planners::Table, Planners::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create expenses table
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(pk_auto(Expenses::Id))
                    .col(integer(Expenses::PlannerId))
                    .col(string(Expenses::Name))
                    .col(string_len(Expenses::IncludeToggle, 3).default("on"))
                    .col(string(Expenses::Scenario).default("ALL"))
                    .col(decimal_len(Expenses::MonthlyAmount, 14, 2).default(0))
                    .col(integer_null(Expenses::CategoryId))
                    .col(integer_null(Expenses::LinkedAssetId))
                    .col(integer_null(Expenses::LinkedLiabilityId))
                    .col(string_null(Expenses::Notes))
                    .col(date_time(Expenses::CreatedAt).default(Expr::current_timestamp()))
                    .col(date_time(Expenses::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_planner")
                            .from(Expenses::Table, Expenses::PlannerId)
                            .to(Planners::Table, Planners::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_category")
                            .from(Expenses::Table, Expenses::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_linked_asset")
                            .from(Expenses::Table, Expenses::LinkedAssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_linked_liability")
                            .from(Expenses::Table, Expenses::LinkedLiabilityId)
                            .to(Liabilities::Table, Liabilities::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create bills table
        manager
            .create_table(
                Table::create()
                    .table(Bills::Table)
                    .if_not_exists()
                    .col(pk_auto(Bills::Id))
                    .col(integer(Bills::PlannerId))
                    .col(string(Bills::Name))
                    .col(string_len(Bills::IncludeToggle, 3).default("on"))
                    .col(string(Bills::Scenario).default("ALL"))
                    .col(decimal_len(Bills::BillAmount, 14, 2).default(0))
                    .col(integer(Bills::IntervalMonths).default(1))
                    .col(integer_null(Bills::CategoryId))
                    .col(integer_null(Bills::LinkedAssetId))
                    .col(integer_null(Bills::LinkedLiabilityId))
                    .col(string_null(Bills::Notes))
                    .col(date_time(Bills::CreatedAt).default(Expr::current_timestamp()))
                    .col(date_time(Bills::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bill_planner")
                            .from(Bills::Table, Bills::PlannerId)
                            .to(Planners::Table, Planners::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bill_category")
                            .from(Bills::Table, Bills::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bill_linked_asset")
                            .from(Bills::Table, Bills::LinkedAssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bill_linked_liability")
                            .from(Bills::Table, Bills::LinkedLiabilityId)
                            .to(Liabilities::Table, Liabilities::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Income::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Liabilities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Planners::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Planners {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    PlannerId,
    Kind,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assets {
    Table,
    Id,
    PlannerId,
    Name,
    IncludeToggle,
    Scenario,
    SaleValue,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Liabilities {
    Table,
    Id,
    PlannerId,
    Name,
    IncludeToggle,
    Scenario,
    MonthlyCost,
    Principal,
    LinkedAssetId,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Income {
    Table,
    Id,
    PlannerId,
    Name,
    IncludeToggle,
    Scenario,
    MonthlyAmount,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    PlannerId,
    Name,
    IncludeToggle,
    Scenario,
    MonthlyAmount,
    CategoryId,
    LinkedAssetId,
    LinkedLiabilityId,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Bills {
    Table,
    Id,
    PlannerId,
    Name,
    IncludeToggle,
    Scenario,
    BillAmount,
    IntervalMonths,
    CategoryId,
    LinkedAssetId,
    LinkedLiabilityId,
    Notes,
    CreatedAt,
    UpdatedAt,
}
