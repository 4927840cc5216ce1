//! Data Processor Module
//! Builds derived views of the titles table. The loaded table is never
//! modified; every operation returns new data.

use super::{columns, MOVIE_TYPE, UNKNOWN_COUNTRY};
use polars::prelude::*;
use thiserror::Error;

/// Unit suffix of a movie duration, e.g. "90 min".
const MINUTES_SUFFIX: &str = " min";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Movie '{show_id}' has malformed duration '{value}'")]
    MalformedDuration { show_id: String, value: String },
}

/// Derives per-record views used by the aggregates.
pub struct TitleProcessor;

impl TitleProcessor {
    /// Normalize one raw `country` cell into a list of country names.
    ///
    /// Missing values become "Unknown". The cell is trimmed, split on
    /// commas and each piece trimmed again. No case folding.
    pub fn normalize_country(raw: Option<&str>) -> Vec<String> {
        raw.unwrap_or(UNKNOWN_COUNTRY)
            .trim()
            .split(',')
            .map(|country| country.trim().to_string())
            .collect()
    }

    /// Normalized country list for every record, in table order.
    pub fn normalized_countries(df: &DataFrame) -> Result<Vec<Vec<String>>, ProcessorError> {
        let countries = df.column(columns::COUNTRY)?.cast(&DataType::String)?;
        Ok(countries
            .str()?
            .into_iter()
            .map(Self::normalize_country)
            .collect())
    }

    /// Copy of `df` with a `title_length` column (character count).
    pub fn with_title_length(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let titles = df.column(columns::TITLE)?.cast(&DataType::String)?;
        let lengths: Vec<Option<u32>> = titles
            .str()?
            .into_iter()
            .map(|title| title.map(|t| t.chars().count() as u32))
            .collect();

        let mut view = df.clone();
        view.with_column(Column::new(columns::TITLE_LENGTH.into(), lengths))?;
        Ok(view)
    }

    /// Parse a movie duration such as "90 min" into minutes.
    ///
    /// Only plain non-negative decimals are accepted ("90", "92.5");
    /// signs, exponents and special values are rejected.
    pub fn parse_minutes(value: &str) -> Option<f64> {
        let minutes = value.trim().strip_suffix(MINUTES_SUFFIX)?.trim();
        let is_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        let well_formed = match minutes.split_once('.') {
            Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
            None => is_digits(minutes),
        };
        if !well_formed {
            return None;
        }
        minutes.parse::<f64>().ok()
    }

    /// Movie records only, as `[release_year, duration]` with the
    /// duration in minutes.
    ///
    /// Output columns: ["release_year" (i64), "duration" (f64)]
    pub fn movie_durations(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let movies = df
            .clone()
            .lazy()
            .filter(col(columns::TYPE).eq(lit(MOVIE_TYPE)))
            .select([
                col(columns::SHOW_ID).cast(DataType::String),
                col(columns::RELEASE_YEAR).cast(DataType::Int64),
                col(columns::DURATION).cast(DataType::String),
            ])
            .collect()?;

        let ids = movies.column(columns::SHOW_ID)?.str()?;
        let raw_durations = movies.column(columns::DURATION)?.str()?;

        let mut minutes: Vec<f64> = Vec::with_capacity(movies.height());
        for (id, raw) in ids.into_iter().zip(raw_durations.into_iter()) {
            let parsed = raw.and_then(Self::parse_minutes).ok_or_else(|| {
                ProcessorError::MalformedDuration {
                    show_id: id.unwrap_or_default().to_string(),
                    value: raw.unwrap_or_default().to_string(),
                }
            })?;
            minutes.push(parsed);
        }

        let durations = DataFrame::new(vec![
            movies.column(columns::RELEASE_YEAR)?.clone(),
            Column::new(columns::DURATION.into(), minutes),
        ])?;

        Ok(durations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn titles() -> DataFrame {
        df!(
            "show_id" => ["s1", "s2", "s3"],
            "title" => ["Up", "Dark", "Roma"],
            "type" => ["Movie", "TV Show", "Movie"],
            "country" => [Some("  United States, India "), None, Some("Mexico")],
            "release_year" => [2009i64, 2017, 2018],
            "duration" => ["96 min", "3 Seasons", "135 min"],
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_country() {
        assert_eq!(TitleProcessor::normalize_country(None), vec!["Unknown"]);
        assert_eq!(
            TitleProcessor::normalize_country(Some(" France,  Belgium ")),
            vec!["France", "Belgium"]
        );
        // Case and inner spacing are kept as-is
        assert_eq!(
            TitleProcessor::normalize_country(Some("united  states,United States")),
            vec!["united  states", "United States"]
        );
    }

    #[test]
    fn test_normalized_countries_keeps_row_order() {
        let lists = TitleProcessor::normalized_countries(&titles()).unwrap();
        assert_eq!(
            lists,
            vec![
                vec!["United States".to_string(), "India".to_string()],
                vec!["Unknown".to_string()],
                vec!["Mexico".to_string()],
            ]
        );
    }

    #[test]
    fn test_with_title_length_leaves_source_untouched() {
        let df = titles();
        let view = TitleProcessor::with_title_length(&df).unwrap();

        assert_eq!(df.width(), 6);
        assert!(df.column(columns::TITLE_LENGTH).is_err());

        let lengths: Vec<Option<u32>> = view
            .column(columns::TITLE_LENGTH)
            .unwrap()
            .u32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(lengths, vec![Some(2), Some(4), Some(4)]);
    }

    #[test]
    fn test_title_length_counts_characters() {
        let df = df!("title" => ["Amélie"]).unwrap();
        let view = TitleProcessor::with_title_length(&df).unwrap();
        let len = view.column(columns::TITLE_LENGTH).unwrap().u32().unwrap().get(0);
        assert_eq!(len, Some(6));
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(TitleProcessor::parse_minutes("90 min"), Some(90.0));
        assert_eq!(TitleProcessor::parse_minutes(" 125 min "), Some(125.0));
        assert_eq!(TitleProcessor::parse_minutes("2 Seasons"), None);
        assert_eq!(TitleProcessor::parse_minutes("90"), None);
        assert_eq!(TitleProcessor::parse_minutes("abc min"), None);
        assert_eq!(TitleProcessor::parse_minutes("92.5 min"), Some(92.5));
        assert_eq!(TitleProcessor::parse_minutes("-90 min"), None);
        assert_eq!(TitleProcessor::parse_minutes("+90 min"), None);
        assert_eq!(TitleProcessor::parse_minutes("1e2 min"), None);
        assert_eq!(TitleProcessor::parse_minutes("NaN min"), None);
        assert_eq!(TitleProcessor::parse_minutes("inf min"), None);
        assert_eq!(TitleProcessor::parse_minutes(".5 min"), None);
        assert_eq!(TitleProcessor::parse_minutes(" min"), None);
    }

    #[test]
    fn test_movie_durations_excludes_tv_shows() {
        let durations = TitleProcessor::movie_durations(&titles()).unwrap();
        assert_eq!(durations.height(), 2);

        let minutes: Vec<Option<f64>> = durations
            .column(columns::DURATION)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(minutes, vec![Some(96.0), Some(135.0)]);
    }

    #[test]
    fn test_movie_durations_rejects_malformed_value() {
        let df = df!(
            "show_id" => ["s1", "s2"],
            "type" => ["Movie", "Movie"],
            "release_year" => [2020i64, 2020],
            "duration" => ["90 min", "1 Season"],
        )
        .unwrap();

        match TitleProcessor::movie_durations(&df) {
            Err(ProcessorError::MalformedDuration { show_id, value }) => {
                assert_eq!(show_id, "s2");
                assert_eq!(value, "1 Season");
            }
            other => panic!("expected malformed duration, got {:?}", other.map(|df| df.height())),
        }
    }

    #[test]
    fn test_movie_durations_rejects_signed_and_exponent_values() {
        for raw in ["-90 min", "1e2 min"] {
            let df = df!(
                "show_id" => ["s1"],
                "type" => ["Movie"],
                "release_year" => [2020i64],
                "duration" => [raw],
            )
            .unwrap();

            assert!(
                matches!(
                    TitleProcessor::movie_durations(&df),
                    Err(ProcessorError::MalformedDuration { .. })
                ),
                "{} should be rejected",
                raw
            );
        }
    }
}
