use super::asset::IncludeToggle;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A bill paid every `interval_months` months (an annual insurance premium
/// has interval 12). Only `bill_amount` and the interval are stored; the
/// monthly average is derived on every read.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub planner_id: i32,
    pub name: String,
    pub include_toggle: IncludeToggle,
    pub scenario: String,
    pub bill_amount: Decimal,
    /// Months between payments; writes reject values below 1.
    pub interval_months: i32,
    pub category_id: Option<i32>,
    pub linked_asset_id: Option<i32>,
    pub linked_liability_id: Option<i32>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Model {
    /// Derived monthly cost of the bill. A non-positive interval (possible
    /// only in data written outside the API) yields zero rather than a
    /// division panic.
    pub fn monthly_average(&self) -> Decimal {
        if self.interval_months <= 0 {
            Decimal::ZERO
        } else {
            self.bill_amount / Decimal::from(self.interval_months)
        }
    }
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
