use crate::db::DbError;

/// Failures of the climate queries.
///
/// The three `Invalid*` variants are caller mistakes; the rest mean the
/// snapshot cannot answer the question.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("No measurement data available")]
    NoData,
    #[error("Invalid start date. Date must be between {earliest} and {latest}")]
    InvalidStartDate { earliest: String, latest: String },
    #[error("Invalid end date. Date must be between {earliest} and {latest}")]
    InvalidEndDate { earliest: String, latest: String },
    #[error("Invalid date range. Start date must be before end date.")]
    InvalidRange { start: String, end: String },
    #[error("No temperature observations between {start} and {end}")]
    NoDataInRange { start: String, end: String },
    #[error("Stored date {0:?} is not a valid YYYY-MM-DD date")]
    CorruptDate(String),
    #[error(transparent)]
    Store(#[from] DbError),
}

impl QueryError {
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QueryError::InvalidStartDate { .. }
                | QueryError::InvalidEndDate { .. }
                | QueryError::InvalidRange { .. }
        )
    }
}
