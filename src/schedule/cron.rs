//! Cron expression evaluation
//!
//! Rendered slot expressions are handed to an external cron-equivalent
//! scheduler; this module validates them and answers "when next" queries
//! for diagnostics.

use chrono::{DateTime, Utc};
use croner::Cron;

use super::errors::ScheduleError;

/// Parse and validate a five-field cron expression.
pub fn validate(expression: &str) -> Result<(), ScheduleError> {
    Cron::new(expression)
        .parse()
        .map(|_| ())
        .map_err(|e| ScheduleError::invalid_cron(expression, e))
}

/// The next time `expression` fires strictly after `after`.
pub fn next_occurrence(
    expression: &str,
    after: &DateTime<Utc>,
) -> Result<DateTime<Utc>, ScheduleError> {
    let cron = Cron::new(expression)
        .parse()
        .map_err(|e| ScheduleError::invalid_cron(expression, e))?;
    cron.find_next_occurrence(after, false)
        .map_err(|e| ScheduleError::invalid_cron(expression, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_validate_accepts_hourly() {
        assert!(validate("30 * * * *").is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_minute() {
        assert!(validate("61 * * * *").is_err());
    }

    #[test]
    fn test_next_occurrence_matches_minute() {
        let now = Utc::now();
        let next = next_occurrence("30 * * * *", &now).unwrap();
        assert_eq!(next.minute(), 30);
        assert!(next > now);
    }

    #[test]
    fn test_next_occurrence_daily_slot() {
        let now = Utc::now();
        let next = next_occurrence("5 3 * * *", &now).unwrap();
        assert_eq!(next.hour(), 3);
        assert_eq!(next.minute(), 5);
    }
}
