/// Error types for loading the startup tables
use thiserror::Error;

/// Failure while reading or joining the observation and site tables.
///
/// Any of these aborts startup; there is no partial-load mode.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Failed to read an input file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// In-memory database failure
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A required header is absent
    #[error("Missing required column '{column}' in {table} table")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    /// A date_time cell could not be parsed
    #[error("Unparseable timestamp {value:?} in observations row {row}")]
    InvalidTimestamp { row: usize, value: String },

    /// The same site name appears twice with different metadata
    #[error("Site '{site_name}' is listed more than once with different metadata")]
    ConflictingSite { site_name: String },

    /// The site table has no usable rows
    #[error("No sites found in site metadata")]
    NoSites,
}

/// Type alias for Results using LoadError
pub type Result<T> = std::result::Result<T, LoadError>;
