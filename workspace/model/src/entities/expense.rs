use super::asset::IncludeToggle;
use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

/// A recurring monthly expense. Optional links to an asset or liability
/// make the expense follow their toggles: running costs of a sold house
/// disappear together with the house.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub planner_id: i32,
    pub name: String,
    pub include_toggle: IncludeToggle,
    pub scenario: String,
    pub monthly_amount: Decimal,
    pub category_id: Option<i32>,
    pub linked_asset_id: Option<i32>,
    pub linked_liability_id: Option<i32>,
    pub notes: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::asset::Entity",
        from = "Column::LinkedAssetId",
        to = "super::asset::Column::Id"
    )]
    Asset,
    #[sea_orm(
        belongs_to = "super::liability::Entity",
        from = "Column::LinkedLiabilityId",
        to = "super::liability::Column::Id"
    )]
    Liability,
}

impl Related<super::planner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Planner.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
