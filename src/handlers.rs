pub mod assets;
pub mod bills;
pub mod categories;
pub mod expenses;
pub mod health;
pub mod income;
pub mod kpis;
pub mod liabilities;
pub mod planners;
pub mod scenarios;
