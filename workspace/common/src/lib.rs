//! Common transport-layer types shared between the compute crate and the
//! API handlers. These structs mirror the JSON payloads returned by the
//! backend so both sides agree on one shape.

mod totals;

pub use totals::MonthlyTotals;
