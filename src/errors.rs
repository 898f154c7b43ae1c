use thiserror::Error;

/// Rejected input, reported against the offending field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "is required")
    }

    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        Self::new(
            field,
            format!("must be between {} and {}, got {}", min, max, actual),
        )
    }

    pub fn unknown_variant(field: impl Into<String>, value: &str, expected: &[&str]) -> Self {
        Self::new(
            field,
            format!("unknown value '{}', expected one of: {}", value, expected.join(", ")),
        )
    }
}

#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("{0} not found")]
    NotFound(String),
    #[error("External service error: {0}")]
    ExternalService(String),
    #[error("External service returned {status}: {message}")]
    Upstream { status: u16, message: String },
}

impl CoachError {
    pub fn not_found(what: impl Into<String>) -> Self {
        CoachError::NotFound(what.into())
    }

    /// Network failures, throttling and 5xx responses are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            CoachError::ExternalService(_) => true,
            CoachError::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for CoachError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => CoachError::Upstream {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => CoachError::ExternalService(err.to_string()),
        }
    }
}

pub type CoachResult<T> = Result<T, CoachError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::out_of_range("schedule.days_per_week", 1, 7, 9);
        assert_eq!(
            err.to_string(),
            "schedule.days_per_week: must be between 1 and 7, got 9"
        );

        let err = ValidationError::missing("goal");
        assert_eq!(err.to_string(), "goal: is required");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(CoachError::ExternalService("connection reset".into()).is_retryable());
        assert!(CoachError::Upstream { status: 503, message: String::new() }.is_retryable());
        assert!(CoachError::Upstream { status: 429, message: String::new() }.is_retryable());
        assert!(!CoachError::Upstream { status: 401, message: String::new() }.is_retryable());
        assert!(!CoachError::not_found("Workout plan").is_retryable());
        assert!(!CoachError::from(ValidationError::missing("goal")).is_retryable());
    }
}
