use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Which table a category classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum CategoryKind {
    #[sea_orm(string_value = "expense")]
    Expense,
    #[sea_orm(string_value = "bill")]
    Bill,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::Expense => write!(f, "expense"),
            CategoryKind::Bill => write!(f, "bill"),
        }
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(CategoryKind::Expense),
            "bill" => Ok(CategoryKind::Bill),
            other => Err(format!("invalid category kind '{other}' (expected 'expense' or 'bill')")),
        }
    }
}

/// A label for grouping expenses or bills. Unique per (planner, kind, name).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub planner_id: i32,
    pub kind: CategoryKind,
    pub name: String,
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
    #[sea_orm(has_many = "super::expense::Entity")]
    Expense,
    #[sea_orm(has_many = "super::bill::Entity")]
    Bill,
}

impl Related<super::planner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Planner.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expense.def()
    }
}

impl Related<super::bill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bill.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
