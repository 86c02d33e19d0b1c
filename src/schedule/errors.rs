//! Schedule error types

use thiserror::Error;

/// Schedule errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// A rendered cron expression failed validation or evaluation.
    #[error("invalid cron expression {expression:?}: {message}")]
    InvalidCron { expression: String, message: String },
}

impl ScheduleError {
    pub fn invalid_cron(expression: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidCron {
            expression: expression.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_expression() {
        let err = ScheduleError::invalid_cron("61 * * * *", "minute out of range");
        let rendered = err.to_string();
        assert!(rendered.contains("61 * * * *"));
        assert!(rendered.contains("minute out of range"));
    }
}
