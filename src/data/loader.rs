//! CSV Data Loader Module
//! Loads the titles CSV using Polars and keeps the parsed table cached
//! until it is explicitly invalidated.

use super::columns;
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Columns the aggregates read. Other columns are kept for display.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    columns::SHOW_ID,
    columns::TITLE,
    columns::TYPE,
    columns::DIRECTOR,
    columns::COUNTRY,
    columns::RELEASE_YEAR,
    columns::DURATION,
];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Column '{column}' has type {dtype}, expected integers")]
    InvalidColumnType { column: String, dtype: String },
    #[error("Missing identifier at row {0}")]
    MissingId(usize),
    #[error("Duplicate identifier '{0}'")]
    DuplicateId(String),
}

/// Lazily loaded, cached handle to the titles table.
///
/// The first call to [`DataLoader::table`] parses the file; later calls
/// return the same frame until [`DataLoader::invalidate`] is called.
pub struct DataLoader {
    df: Option<Arc<DataFrame>>,
    file_path: PathBuf,
    generation: u64,
}

impl DataLoader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            df: None,
            file_path: file_path.into(),
            generation: 0,
        }
    }

    /// Get the table, parsing the file if nothing is cached.
    pub fn table(&mut self) -> Result<Arc<DataFrame>, LoadError> {
        if let Some(df) = &self.df {
            debug!(path = %self.file_path.display(), "Using cached table");
            return Ok(Arc::clone(df));
        }

        let df = Arc::new(Self::load_csv(&self.file_path)?);
        self.generation += 1;
        self.df = Some(Arc::clone(&df));
        Ok(df)
    }

    /// Drop the cached table so the next access re-reads the file.
    pub fn invalidate(&mut self) {
        if self.df.take().is_some() {
            info!(path = %self.file_path.display(), "Invalidated cached table");
        }
    }

    /// Point the loader at another file. Invalidates the cache.
    pub fn set_path(&mut self, file_path: impl Into<PathBuf>) {
        self.file_path = file_path.into();
        self.invalidate();
    }

    /// Parse a titles CSV and validate it.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, LoadError> {
        info!(path = %file_path.display(), "Loading titles CSV");

        // Identifiers are kept as written ("001" and "1" are distinct)
        let mut overrides = Schema::default();
        overrides.with_column(columns::SHOW_ID.into(), DataType::String);

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_dtype_overwrite(Some(Arc::new(overrides)))
            .finish()?
            .collect()?;

        Self::validate(&df)?;

        info!(
            rows = df.height(),
            columns = df.width(),
            "Loaded titles table"
        );
        Ok(df)
    }

    fn validate(df: &DataFrame) -> Result<(), LoadError> {
        let names: HashSet<&str> = df
            .get_column_names()
            .into_iter()
            .map(|s| s.as_str())
            .collect();
        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !names.contains(*c)) {
            return Err(LoadError::MissingColumn(missing.to_string()));
        }

        // A header-only file infers every column as a string.
        let years = df.column(columns::RELEASE_YEAR)?;
        if df.height() > 0 && !years.dtype().is_integer() {
            return Err(LoadError::InvalidColumnType {
                column: columns::RELEASE_YEAR.to_string(),
                dtype: years.dtype().to_string(),
            });
        }

        let ids = df.column(columns::SHOW_ID)?.cast(&DataType::String)?;
        let mut seen = HashSet::with_capacity(df.height());
        for (row, id) in ids.str()?.into_iter().enumerate() {
            let id = id.ok_or(LoadError::MissingId(row))?;
            if !seen.insert(id) {
                return Err(LoadError::DuplicateId(id.to_string()));
            }
        }

        Ok(())
    }

    /// Get list of column names from the cached table.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the cached table.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    pub fn is_loaded(&self) -> bool {
        self.df.is_some()
    }

    /// Number of times the file has been parsed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}
