use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Whether a record counts toward aggregation. Toggled-off records still
/// appear in editable listings; they are only skipped by the totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
pub enum IncludeToggle {
    #[sea_orm(string_value = "on")]
    On,
    #[sea_orm(string_value = "off")]
    Off,
}

impl fmt::Display for IncludeToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncludeToggle::On => write!(f, "on"),
            IncludeToggle::Off => write!(f, "off"),
        }
    }
}

impl FromStr for IncludeToggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(IncludeToggle::On),
            "off" => Ok(IncludeToggle::Off),
            other => Err(format!("invalid include toggle '{other}' (expected 'on' or 'off')")),
        }
    }
}

/// An asset the user could dispose of, e.g. a house or a car. `sale_value`
/// is the total value realized when sold; the scenario tag decides in which
/// alternative futures the asset participates.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub planner_id: i32,
    pub name: String,
    pub include_toggle: IncludeToggle,
    /// "ALL" applies to every scenario; otherwise a short code like "A".
    pub scenario: String,
    pub sale_value: Decimal,
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
    #[sea_orm(has_many = "super::liability::Entity")]
    Liability,
}

impl Related<super::planner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Planner.def()
    }
}

impl Related<super::liability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Liability.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
