use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromoError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Metadata access failed: {message}")]
    MetadataError { message: String },

    #[error("Order update failed: {message}")]
    OrderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Collaborator,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PromoError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PromoError::ConfigValidationError { .. }
            | PromoError::InvalidConfigValueError { .. }
            | PromoError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PromoError::MetadataError { .. } | PromoError::OrderError { .. } => {
                ErrorCategory::Collaborator
            }
            PromoError::IoError(_) | PromoError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Collaborator failures are swallowed at the hook boundary;
            // they only surface in logs.
            PromoError::MetadataError { .. } | PromoError::OrderError { .. } => ErrorSeverity::Low,
            PromoError::ConfigValidationError { .. }
            | PromoError::InvalidConfigValueError { .. }
            | PromoError::MissingConfigError { .. } => ErrorSeverity::High,
            PromoError::IoError(_) => ErrorSeverity::High,
            PromoError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PromoError::IoError(_) => {
                "Check that the configuration file exists and is readable".to_string()
            }
            PromoError::SerializationError(_) => {
                "Report this as a bug; serialized state should always round-trip".to_string()
            }
            PromoError::ConfigValidationError { field, .. } => {
                format!("Review the '{field}' setting and re-run")
            }
            PromoError::InvalidConfigValueError { field, reason, .. } => {
                format!("Fix '{field}': {reason}")
            }
            PromoError::MissingConfigError { field } => {
                format!("Set the '{field}' option in your configuration")
            }
            PromoError::MetadataError { .. } => {
                "Inspect the subscription store; the renewal itself was not blocked".to_string()
            }
            PromoError::OrderError { .. } => {
                "Inspect the order store; the renewal itself was not blocked".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {self}"),
            ErrorCategory::Collaborator => format!("Billing system problem: {self}"),
            ErrorCategory::System => format!("System problem: {self}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, PromoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_and_severity_mapping() {
        let err = PromoError::MissingConfigError {
            field: "promo.coupon_code".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = PromoError::MetadataError {
            message: "store offline".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Collaborator);
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }
}
