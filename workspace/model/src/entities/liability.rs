use super::asset::IncludeToggle;
use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

/// A recurring debt obligation. `monthly_cost` feeds the outgoings total;
/// `principal` (absent means zero) feeds net value. A liability may be
/// linked to the asset it finances, in which case toggling the asset off
/// also takes the liability out of the totals.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "liabilities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub planner_id: i32,
    pub name: String,
    pub include_toggle: IncludeToggle,
    pub scenario: String,
    pub monthly_cost: Decimal,
    pub principal: Option<Decimal>,
    pub linked_asset_id: Option<i32>,
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
        belongs_to = "super::asset::Entity",
        from = "Column::LinkedAssetId",
        to = "super::asset::Column::Id"
    )]
    Asset,
}

impl Related<super::planner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Planner.def()
    }
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
