use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use std::fmt;

/// Errors raised by the siting core.
///
/// `Unknown` feature values are never errors; they score as zero bonus.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SitingError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid input for {subject}: {detail}")]
    InvalidInput { subject: String, detail: String },
}

impl SitingError {
    pub(crate) fn invalid(subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidInput {
            subject: subject.into(),
            detail: detail.into(),
        }
    }
}

/// Top-level error for hosts wiring configuration, telemetry, and the siting core together.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Siting(SitingError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Siting(err) => write!(f, "siting error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Siting(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<SitingError> for AppError {
    fn from(value: SitingError) -> Self {
        Self::Siting(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn wraps_siting_errors_with_source() {
        let err = AppError::from(SitingError::Configuration(
            "scoring weights must sum to 1.0, got 1.100000".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "siting error: configuration error: scoring weights must sum to 1.0, got 1.100000"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_input_names_subject() {
        let err = SitingError::invalid("parcel p-9", "area 0 m2 must be positive");
        assert_eq!(
            err.to_string(),
            "invalid input for parcel p-9: area 0 m2 must be positive"
        );
    }
}
