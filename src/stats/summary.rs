//! Dashboard summary: every aggregate computed independently so that one
//! failing aggregate does not hide the others.

use super::{Aggregator, CountryCount, StatsError};
use crate::data::columns;
use polars::prelude::DataFrame;
use tracing::{debug, warn};

/// Placeholder shown for a metric that could not be computed.
pub const MISSING_METRIC: &str = "-";

/// Year-independent aggregates of one loaded table.
#[derive(Debug)]
pub struct DashboardSummary {
    pub year_range: Result<(i64, i64), StatsError>,
    pub missing_directors: Result<usize, StatsError>,
    pub distinct_countries: Result<usize, StatsError>,
    pub avg_title_length: Result<Option<f64>, StatsError>,
    pub avg_duration_by_year: Result<Vec<(i64, f64)>, StatsError>,
}

impl DashboardSummary {
    pub fn compute(df: &DataFrame) -> Self {
        let summary = Self {
            year_range: Aggregator::year_range(df),
            missing_directors: Aggregator::count_missing(df, columns::DIRECTOR),
            distinct_countries: Aggregator::distinct_countries(df),
            avg_title_length: Aggregator::avg_title_length(df),
            avg_duration_by_year: Aggregator::avg_movie_duration_by_year(df),
        };
        summary.log_failures();
        debug!(rows = df.height(), "Computed dashboard summary");
        summary
    }

    /// Top countries for the selected year, logged on failure.
    pub fn top_countries(
        df: &DataFrame,
        year: i64,
        limit: usize,
    ) -> Result<Vec<CountryCount>, StatsError> {
        let result = Aggregator::top_countries_for_year(df, year, limit);
        match &result {
            Ok(top) => debug!(year, countries = top.len(), "Computed top countries"),
            Err(e) => warn!(year, error = %e, "Top countries aggregate failed"),
        }
        result
    }

    fn log_failures(&self) {
        let failures = [
            ("year_range", self.year_range.as_ref().err()),
            ("missing_directors", self.missing_directors.as_ref().err()),
            ("distinct_countries", self.distinct_countries.as_ref().err()),
            ("avg_title_length", self.avg_title_length.as_ref().err()),
            ("avg_duration_by_year", self.avg_duration_by_year.as_ref().err()),
        ];
        for (aggregate, error) in failures {
            if let Some(e) = error {
                warn!(aggregate, error = %e, "Aggregate failed");
            }
        }
    }

    pub fn min_year_label(&self) -> String {
        match &self.year_range {
            Ok((min, _)) => min.to_string(),
            Err(_) => MISSING_METRIC.to_string(),
        }
    }

    pub fn max_year_label(&self) -> String {
        match &self.year_range {
            Ok((_, max)) => max.to_string(),
            Err(_) => MISSING_METRIC.to_string(),
        }
    }

    pub fn missing_directors_label(&self) -> String {
        Self::count_label(&self.missing_directors)
    }

    pub fn countries_label(&self) -> String {
        Self::count_label(&self.distinct_countries)
    }

    /// Average title length rounded to 2 decimals.
    pub fn avg_title_length_label(&self) -> String {
        match &self.avg_title_length {
            Ok(Some(avg)) => format!("{:.2}", avg),
            _ => MISSING_METRIC.to_string(),
        }
    }

    fn count_label(value: &Result<usize, StatsError>) -> String {
        value
            .as_ref()
            .map(|n| n.to_string())
            .unwrap_or_else(|_| MISSING_METRIC.to_string())
    }
}
