use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

/// Settings for one named alternative financial timeline, e.g. scenario "A"
/// displayed as "Sell House". The short code is what record rows carry in
/// their `scenario` column; it is unique per planner.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "scenario_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub planner_id: i32,
    /// Short code such as "A", "B", "C". Never "ALL".
    pub scenario: String,
    pub display_name: String,
    /// Month assets are disposed of in this timeline; 0 means never.
    pub sale_month: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::planner::Entity",
        from = "Column::PlannerId",
        to = "super::planner::Column::Id"
    )]
    Planner,
    #[sea_orm(has_many = "super::scenario_item::Entity")]
    ScenarioItem,
}

impl Related<super::planner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Planner.def()
    }
}

impl Related<super::scenario_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScenarioItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
