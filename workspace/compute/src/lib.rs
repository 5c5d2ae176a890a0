//! Pure computation over planner records: scenario resolution, the effective
//! include cascade, and the monthly totals aggregation. Nothing in here
//! touches the database; callers load the records and hand in slices.

pub mod effective;
pub mod error;
pub mod filter;
pub mod totals;

pub use effective::ToggleIndex;
pub use error::{ComputeError, Result};
pub use filter::{applies, ScenarioFilter, ScenarioScoped, ALL_TAG};
pub use totals::{monthly_totals, validate_interval_months};
