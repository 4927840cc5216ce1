//! Data module - CSV loading and derived views

mod loader;
mod processor;

pub use loader::{DataLoader, LoadError, REQUIRED_COLUMNS};
pub use processor::{ProcessorError, TitleProcessor};

/// Column names of the titles dataset.
pub mod columns {
    pub const SHOW_ID: &str = "show_id";
    pub const TITLE: &str = "title";
    pub const TYPE: &str = "type";
    pub const DIRECTOR: &str = "director";
    pub const COUNTRY: &str = "country";
    pub const RELEASE_YEAR: &str = "release_year";
    pub const DURATION: &str = "duration";
    /// Derived, never present in the loaded table.
    pub const TITLE_LENGTH: &str = "title_length";
}

/// Value of the `type` column for movies.
pub const MOVIE_TYPE: &str = "Movie";

/// Substituted for a missing country before splitting.
pub const UNKNOWN_COUNTRY: &str = "Unknown";
