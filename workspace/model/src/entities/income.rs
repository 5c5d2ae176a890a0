use super::asset::IncludeToggle;
use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

/// A recurring income source, e.g. a salary.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "income")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub planner_id: i32,
    pub name: String,
    pub include_toggle: IncludeToggle,
    pub scenario: String,
    pub monthly_amount: Decimal,
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
}

impl Related<super::planner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Planner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
