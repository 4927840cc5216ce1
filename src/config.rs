//! Dashboard configuration.

use std::path::PathBuf;

/// Dataset location shipped with the dashboard.
pub const DEFAULT_DATA_PATH: &str = "data/netflix_titles.csv";

/// Year preselected in the year input when the data covers it.
pub const DEFAULT_YEAR: i64 = 2005;

/// Number of countries shown in the pie chart.
pub const TOP_COUNTRIES_LIMIT: usize = 10;

/// Runtime settings for the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub default_year: i64,
    pub top_countries_limit: usize,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Pixel size of exported PNG charts.
    pub export_size: (u32, u32),
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            default_year: DEFAULT_YEAR,
            top_countries_limit: TOP_COUNTRIES_LIMIT,
            window_size: [1200.0, 900.0],
            min_window_size: [900.0, 600.0],
            export_size: (900, 900),
        }
    }
}
