// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Timed out after {secs}s waiting for {url}")]
    Timeout { url: String, secs: u64 },

    #[error("Network request failed: {0}")]
    Network(reqwest::Error),

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("Browserless error (status {status}): {message}")]
    Browserless { status: u16, message: String },

    #[error("Page not cached and offline mode is on: {0}")]
    CacheMiss(String),

    #[error("Page cache I/O error: {0}")]
    Cache(#[from] std::io::Error),
}

impl FetchError {
    /// Maps a reqwest failure, keeping client-side timeouts distinct from other network errors.
    pub fn from_reqwest(err: reqwest::Error, url: &str, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            FetchError::Network(err)
        }
    }
}

#[derive(Error, Debug)]
pub enum AlmanacError {
    #[error("No year links found on index page {0}")]
    EmptyIndex(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Per-page extraction outcomes that degrade a year rather than fail the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No table looked like a standings table")]
    NoCandidateTable,

    #[error("Row {row} skipped: {reason}")]
    RowParse { row: usize, reason: String },

    #[error("Standings table had no parseable rows")]
    NoStandingsRows,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Almanac interaction failed: {0}")]
    Almanac(#[from] AlmanacError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Processing year {year} failed: {source}")]
    PageProcessing {
        year: u32,
        #[source]
        source: Box<AppError>,
    },

    #[error("Data processing failed: {0}")]
    Processing(String),
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Almanac(AlmanacError::Fetch(err))
    }
}

impl AppError {
    /// Wraps any error raised while handling a single year page.
    pub fn for_year(year: u32, err: impl Into<AppError>) -> Self {
        AppError::PageProcessing {
            year,
            source: Box::new(err.into()),
        }
    }

    /// Only an empty year index aborts a run once processing has started.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AppError::PageProcessing { .. })
    }
}
