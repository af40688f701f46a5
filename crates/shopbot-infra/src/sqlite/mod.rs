//! SQLite persistence: connection pool and repository implementations.

pub mod cart;
pub mod catalog;
pub mod conversation;
pub mod pool;

use chrono::{DateTime, SecondsFormat, Utc};
use shopbot_types::error::RepositoryError;

/// Parse an RFC 3339 timestamp column into a UTC datetime.
pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Format a UTC datetime for storage.
///
/// Fixed microsecond precision keeps the TEXT column lexicographically
/// ordered, which the expiry cutoff comparison relies on.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_datetime_roundtrip() {
        let now = Utc::now();
        let parsed = parse_datetime(&format_datetime(&now)).unwrap();
        // Microsecond precision loses the nanosecond tail only.
        assert!((now - parsed).num_microseconds().unwrap().abs() < 1);
    }

    #[test]
    fn test_format_is_lexicographically_ordered() {
        let earlier = Utc::now();
        let later = earlier + Duration::seconds(90);
        assert!(format_datetime(&earlier) < format_datetime(&later));
    }
}
