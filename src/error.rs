//! Error types for ranking ingestion and report building.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankingError {
    /// A performance string that is not `M:SS`, `MM:SS` or `H:MM:SS`.
    /// The normalizer drops the row instead of surfacing this.
    #[error("unparseable time: {0:?}")]
    UnparseableTime(String),

    /// A required column is absent from the input table.
    #[error("malformed input: the '{0}' column was not found, cannot group results")]
    MissingField(&'static str),

    #[error("invalid date {value:?} on row {row}")]
    InvalidDate { row: usize, value: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, RankingError>;
