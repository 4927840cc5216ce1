//! Aggregator Module
//! Pure aggregate computations over the titles table.

use crate::data::{columns, ProcessorError, TitleProcessor};
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// A country and the number of (record, country) pairs it appears in.
pub type CountryCount = (String, usize);

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error("Table has no release years")]
    EmptyTable,
}

/// Computes the dashboard aggregates. Every function is independent.
pub struct Aggregator;

impl Aggregator {
    /// Minimum and maximum release year.
    pub fn year_range(df: &DataFrame) -> Result<(i64, i64), StatsError> {
        let years = df.column(columns::RELEASE_YEAR)?.cast(&DataType::Int64)?;
        let years = years.i64()?;

        match (years.min(), years.max()) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(StatsError::EmptyTable),
        }
    }

    /// Number of records where `field` is null.
    pub fn count_missing(df: &DataFrame, field: &str) -> Result<usize, StatsError> {
        Ok(df.column(field)?.null_count())
    }

    /// Number of distinct countries after normalization.
    pub fn distinct_countries(df: &DataFrame) -> Result<usize, StatsError> {
        let unique: HashSet<String> = TitleProcessor::normalized_countries(df)?
            .into_iter()
            .flatten()
            .collect();
        Ok(unique.len())
    }

    /// Mean title length in characters, `None` for an empty table.
    pub fn avg_title_length(df: &DataFrame) -> Result<Option<f64>, StatsError> {
        let mean = TitleProcessor::with_title_length(df)?
            .lazy()
            .select([col(columns::TITLE_LENGTH)
                .cast(DataType::Float64)
                .mean()])
            .collect()?;

        Ok(mean.column(columns::TITLE_LENGTH)?.f64()?.get(0))
    }

    /// Countries with the most titles released in `year`.
    ///
    /// A record listing N countries counts once for each of them.
    /// Ordered by count descending; ties keep first-encountered order.
    /// Empty when no record matches the year.
    pub fn top_countries_for_year(
        df: &DataFrame,
        year: i64,
        limit: usize,
    ) -> Result<Vec<CountryCount>, StatsError> {
        let titles_of_year = df
            .clone()
            .lazy()
            .filter(col(columns::RELEASE_YEAR).cast(DataType::Int64).eq(lit(year)))
            .collect()?;

        let mut counts: Vec<CountryCount> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for country in TitleProcessor::normalized_countries(&titles_of_year)?
            .into_iter()
            .flatten()
        {
            match positions.get(&country) {
                Some(&pos) => counts[pos].1 += 1,
                None => {
                    positions.insert(country.clone(), counts.len());
                    counts.push((country, 1));
                }
            }
        }

        // sort_by is stable
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(limit);
        Ok(counts)
    }

    /// Average movie duration in minutes per release year, ascending.
    ///
    /// TV shows are excluded. Fails if a movie duration is not of the
    /// form "<number> min".
    pub fn avg_movie_duration_by_year(df: &DataFrame) -> Result<Vec<(i64, f64)>, StatsError> {
        let means = TitleProcessor::movie_durations(df)?
            .lazy()
            .filter(col(columns::RELEASE_YEAR).is_not_null())
            .group_by([col(columns::RELEASE_YEAR)])
            .agg([col(columns::DURATION).mean()])
            .sort([columns::RELEASE_YEAR], SortMultipleOptions::default())
            .collect()?;

        let years = means.column(columns::RELEASE_YEAR)?.i64()?;
        let durations = means.column(columns::DURATION)?.f64()?;

        Ok(years
            .into_iter()
            .zip(durations.into_iter())
            .filter_map(|(year, duration)| Some((year?, duration?)))
            .collect())
    }

    /// Year to preselect: `preferred` clamped into the data's range.
    pub fn clamp_year((min, max): (i64, i64), preferred: i64) -> i64 {
        preferred.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn titles() -> DataFrame {
        df!(
            "show_id" => ["s1", "s2", "s3", "s4", "s5"],
            "title" => ["Roma", "Dark", "Okja", "Narcos", "Up"],
            "type" => ["Movie", "TV Show", "Movie", "TV Show", "Movie"],
            "director" => [Some("Alfonso Cuarón"), None, Some("Bong Joon Ho"), None, None],
            "country" => [
                Some("Mexico"),
                Some("Germany"),
                Some(" South Korea, United States "),
                None,
                Some("United States"),
            ],
            "release_year" => [2018i64, 2017, 2017, 2017, 2009],
            "duration" => ["135 min", "3 Seasons", "121 min", "3 Seasons", "96 min"],
        )
        .unwrap()
    }

    fn empty_titles() -> DataFrame {
        titles().head(Some(0))
    }

    #[test]
    fn test_year_range() {
        assert_eq!(Aggregator::year_range(&titles()).unwrap(), (2009, 2018));
    }

    #[test]
    fn test_year_range_empty_table() {
        assert!(matches!(
            Aggregator::year_range(&empty_titles()),
            Err(StatsError::EmptyTable)
        ));
    }

    #[test]
    fn test_count_missing() {
        let df = titles();
        assert_eq!(Aggregator::count_missing(&df, "director").unwrap(), 3);
        assert_eq!(Aggregator::count_missing(&df, "country").unwrap(), 1);
        assert_eq!(Aggregator::count_missing(&df, "title").unwrap(), 0);
        assert!(Aggregator::count_missing(&df, "cast").is_err());
    }

    #[test]
    fn test_distinct_countries_counts_unknown() {
        // Mexico, Germany, South Korea, United States, Unknown
        assert_eq!(Aggregator::distinct_countries(&titles()).unwrap(), 5);
    }

    #[test]
    fn test_distinct_countries_ignores_surrounding_whitespace() {
        let padded = df!("country" => ["  US, UK  ", "UK ,US"]).unwrap();
        let plain = df!("country" => ["US,UK", "UK,US"]).unwrap();
        assert_eq!(Aggregator::distinct_countries(&padded).unwrap(), 2);
        assert_eq!(Aggregator::distinct_countries(&plain).unwrap(), 2);
    }

    #[test]
    fn test_distinct_countries_is_case_sensitive() {
        let df = df!("country" => ["US", "us"]).unwrap();
        assert_eq!(Aggregator::distinct_countries(&df).unwrap(), 2);
    }

    #[test]
    fn test_avg_title_length() {
        // 4 + 4 + 4 + 6 + 2
        let avg = Aggregator::avg_title_length(&titles()).unwrap().unwrap();
        assert!((avg - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_avg_title_length_single_record() {
        let df = df!("title" => ["The Irishman"]).unwrap();
        assert_eq!(Aggregator::avg_title_length(&df).unwrap(), Some(12.0));
    }

    #[test]
    fn test_avg_title_length_empty_table() {
        assert_eq!(Aggregator::avg_title_length(&empty_titles()).unwrap(), None);
    }

    #[test]
    fn test_top_countries_for_year_explodes_lists() {
        let top = Aggregator::top_countries_for_year(&titles(), 2017, 10).unwrap();
        assert_eq!(
            top,
            vec![
                ("Germany".to_string(), 1),
                ("South Korea".to_string(), 1),
                ("United States".to_string(), 1),
                ("Unknown".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_countries_orders_by_count_then_first_seen() {
        let df = df!(
            "country" => ["France", "Spain, Italy", "Italy", "Spain", "Italy, Spain"],
            "release_year" => [2019i64, 2019, 2019, 2019, 2019],
        )
        .unwrap();

        let top = Aggregator::top_countries_for_year(&df, 2019, 10).unwrap();
        assert_eq!(
            top,
            vec![
                ("Spain".to_string(), 3),
                ("Italy".to_string(), 3),
                ("France".to_string(), 1),
            ]
        );

        let total_pairs: usize = top.iter().map(|(_, n)| n).sum();
        assert_eq!(total_pairs, 7);
    }

    #[test]
    fn test_top_countries_respects_limit() {
        let df = df!(
            "country" => ["A", "B", "C", "B"],
            "release_year" => [2000i64, 2000, 2000, 2000],
        )
        .unwrap();

        let top = Aggregator::top_countries_for_year(&df, 2000, 2).unwrap();
        assert_eq!(top, vec![("B".to_string(), 2), ("A".to_string(), 1)]);
    }

    #[test]
    fn test_top_countries_no_matching_year() {
        let top = Aggregator::top_countries_for_year(&titles(), 1950, 10).unwrap();
        assert!(top.is_empty());
    }

    #[test]
    fn test_avg_movie_duration_by_year() {
        let series = Aggregator::avg_movie_duration_by_year(&titles()).unwrap();
        assert_eq!(series, vec![(2009, 96.0), (2017, 121.0), (2018, 135.0)]);
    }

    #[test]
    fn test_avg_movie_duration_averages_within_year() {
        let df = df!(
            "show_id" => ["a", "b", "c"],
            "type" => ["Movie", "Movie", "Movie"],
            "release_year" => [2001i64, 1999, 2001],
            "duration" => ["100 min", "90 min", "81 min"],
        )
        .unwrap();

        let series = Aggregator::avg_movie_duration_by_year(&df).unwrap();
        assert_eq!(series, vec![(1999, 90.0), (2001, 90.5)]);
    }

    #[test]
    fn test_avg_movie_duration_fails_on_malformed_duration() {
        let df = df!(
            "show_id" => ["a"],
            "type" => ["Movie"],
            "release_year" => [2001i64],
            "duration" => ["ninety minutes"],
        )
        .unwrap();

        assert!(matches!(
            Aggregator::avg_movie_duration_by_year(&df),
            Err(StatsError::Processor(ProcessorError::MalformedDuration { .. }))
        ));
    }

    #[test]
    fn test_clamp_year() {
        assert_eq!(Aggregator::clamp_year((1990, 2021), 2005), 2005);
        assert_eq!(Aggregator::clamp_year((2010, 2021), 2005), 2010);
        assert_eq!(Aggregator::clamp_year((1990, 2000), 2005), 2000);
    }
}
