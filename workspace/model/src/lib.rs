//! SeaORM entities for the budget planner: planners, categories, the five
//! record types and the scenario tables.

pub mod entities;
