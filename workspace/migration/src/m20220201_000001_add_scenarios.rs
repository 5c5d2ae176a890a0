use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Create scenario_settings table
        manager
            .create_table(
                Table::create()
                    .table(ScenarioSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScenarioSettings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScenarioSettings::PlannerId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScenarioSettings::Scenario)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScenarioSettings::DisplayName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ScenarioSettings::SaleMonth)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ScenarioSettings::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ScenarioSettings::UpdatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scenario_settings_planner")
                            .from(ScenarioSettings::Table, ScenarioSettings::PlannerId)
                            .to(Alias::new("planners"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Scenario codes are unique within one planner
        manager
            .create_index(
                Index::create()
                    .name("idx_scenario_settings_planner_scenario")
                    .table(ScenarioSettings::Table)
                    .col(ScenarioSettings::PlannerId)
                    .col(ScenarioSettings::Scenario)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 2. Create scenario_items table
        manager
            .create_table(
                Table::create()
                    .table(ScenarioItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScenarioItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScenarioItems::ScenarioId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScenarioItems::ItemId).integer().not_null())
                    .col(
                        ColumnDef::new(ScenarioItems::ItemType)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScenarioItems::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scenario_items_scenario")
                            .from(ScenarioItems::Table, ScenarioItems::ScenarioId)
                            .to(ScenarioSettings::Table, ScenarioSettings::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One record can be attached to a scenario at most once
        manager
            .create_index(
                Index::create()
                    .name("idx_scenario_items_scenario_item")
                    .table(ScenarioItems::Table)
                    .col(ScenarioItems::ScenarioId)
                    .col(ScenarioItems::ItemId)
                    .col(ScenarioItems::ItemType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScenarioItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScenarioSettings::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ScenarioSettings {
    Table,
    Id,
    PlannerId,
    Scenario,
    DisplayName,
    SaleMonth,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ScenarioItems {
    Table,
    Id,
    ScenarioId,
    ItemId,
    ItemType,
    CreatedAt,
}
