use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Which record table a scenario item points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum ItemType {
    #[sea_orm(string_value = "asset")]
    Asset,
    #[sea_orm(string_value = "liability")]
    Liability,
    #[sea_orm(string_value = "income")]
    Income,
    #[sea_orm(string_value = "expense")]
    Expense,
    #[sea_orm(string_value = "bill")]
    Bill,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemType::Asset => "asset",
            ItemType::Liability => "liability",
            ItemType::Income => "income",
            ItemType::Expense => "expense",
            ItemType::Bill => "bill",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asset" => Ok(ItemType::Asset),
            "liability" => Ok(ItemType::Liability),
            "income" => Ok(ItemType::Income),
            "expense" => Ok(ItemType::Expense),
            "bill" => Ok(ItemType::Bill),
            other => Err(format!(
                "invalid item type '{other}' (expected asset, liability, income, expense or bill)"
            )),
        }
    }
}

/// Association between a scenario and one record row. The pair
/// (item_id, item_type) identifies the record since ids are only unique
/// within a table. Deleting a scenario removes its items.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "scenario_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub scenario_id: i32,
    pub item_id: i32,
    pub item_type: ItemType,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scenario::Entity",
        from = "Column::ScenarioId",
        to = "super::scenario::Column::Id"
    )]
    Scenario,
}

impl Related<super::scenario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scenario.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
