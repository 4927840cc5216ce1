//! Charts module - Chart rendering

pub mod geometry;
mod plotter;
mod renderer;

pub use geometry::{pie_slices, PieSlice};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};

/// Title of the pie chart for `year`.
pub fn top_countries_title(year: i64, limit: usize) -> String {
    format!("Top {} Countries in {}", limit, year)
}
