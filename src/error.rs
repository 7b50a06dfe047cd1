use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to download the dataset. Status code: {0}")]
    Fetch(StatusCode),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid header: {0}")]
    Schema(String),

    /// `line` is the 1-based line of the record in the CSV body.
    #[error("Failed to insert line {line}: {reason}")]
    Insertion { line: u64, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    DuckDb(#[from] duckdb::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
