use chrono::{Duration, NaiveDate};

use crate::services::QueryError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the recency window. A fixed day count, not a calendar year.
pub const RECENCY_WINDOW_DAYS: i64 = 365;

/// First date of the recency window ending at `latest`, as an ISO string
pub fn window_start(latest: &str) -> Result<String, QueryError> {
    let latest_date = NaiveDate::parse_from_str(latest, DATE_FORMAT)
        .map_err(|_| QueryError::CorruptDate(latest.to_string()))?;

    let start = latest_date - Duration::days(RECENCY_WINDOW_DAYS);
    Ok(start.format(DATE_FORMAT).to_string())
}

/// Check a requested range against the dataset bounds.
///
/// Raw string comparison, first failing check wins: start bounds, end
/// bounds, then ordering.
pub fn validate_range(
    earliest: &str,
    latest: &str,
    start: &str,
    end: Option<&str>,
) -> Result<(), QueryError> {
    let out_of_bounds = |date: &str| date < earliest || date > latest;

    if out_of_bounds(start) {
        return Err(QueryError::InvalidStartDate {
            earliest: earliest.to_string(),
            latest: latest.to_string(),
        });
    }

    if let Some(end) = end {
        if out_of_bounds(end) {
            return Err(QueryError::InvalidEndDate {
                earliest: earliest.to_string(),
                latest: latest.to_string(),
            });
        }
        if start > end {
            return Err(QueryError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
    }

    Ok(())
}
