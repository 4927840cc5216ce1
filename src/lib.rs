//! Netflix Titles Dashboard - data pipeline
//!
//! Loads the titles CSV, derives per-record views and computes the
//! aggregates shown by the dashboard.

pub mod charts;
pub mod config;
pub mod data;
pub mod stats;

pub use config::DashboardConfig;
