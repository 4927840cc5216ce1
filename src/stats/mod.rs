//! Stats module - Aggregates over the titles table

mod aggregator;
mod summary;

pub use aggregator::{Aggregator, CountryCount, StatsError};
pub use summary::DashboardSummary;
