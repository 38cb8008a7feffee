/// Shared error types for the bet composer and its terminal
///
/// Design:
/// - Standardized error codes shared by the composer core and the API client
/// - Categorized by error domain (Validation, Network, Session, BusinessRule, Internal)
/// - Includes context fields for debugging (error_code, message, context)
///
/// Usage:
/// - Composer and terminal errors convert into ServiceError for reporting
/// - Error codes follow pattern: <CATEGORY>_<SPECIFIC>_<DETAIL>
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error categories that decide how a failure is surfaced and logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// The user asked for something the draft does not allow
    /// Reported and recoverable, state is left untouched
    Validation,

    /// The betting API could not be reached or timed out
    Network,

    /// The session is stale; handed over to the auth collaborator
    Session,

    /// The backend rejected the bet for a business reason (throw closed, ...)
    BusinessRule,

    /// Unexpected failures, malformed responses, programming errors
    Internal,
}

impl ErrorCategory {
    /// Whether the user can fix the problem and try again in the same session
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ErrorCategory::Session)
    }

    /// Map error category to log level
    pub fn log_level(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "warn",
            ErrorCategory::Network => "error",
            ErrorCategory::Session => "warn",
            ErrorCategory::BusinessRule => "warn",
            ErrorCategory::Internal => "error",
        }
    }
}

/// Standard error codes used across the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    // Validation errors
    pub const VALIDATION_EMPTY_DRAFT: ErrorCode = ErrorCode("VALIDATION_EMPTY_DRAFT");
    pub const VALIDATION_NO_PLAY_TYPE: ErrorCode = ErrorCode("VALIDATION_NO_PLAY_TYPE");
    pub const VALIDATION_ZERO_AMOUNT: ErrorCode = ErrorCode("VALIDATION_ZERO_AMOUNT");
    pub const VALIDATION_AMOUNT_OVERFLOW: ErrorCode = ErrorCode("VALIDATION_AMOUNT_OVERFLOW");
    pub const VALIDATION_DUPLICATE_NUMBERS: ErrorCode = ErrorCode("VALIDATION_DUPLICATE_NUMBERS");
    pub const VALIDATION_AL_TOKEN_COUNT: ErrorCode = ErrorCode("VALIDATION_AL_TOKEN_COUNT");
    pub const VALIDATION_AL_RANGE: ErrorCode = ErrorCode("VALIDATION_AL_RANGE");
    pub const VALIDATION_PLAY_TYPE_UNAVAILABLE: ErrorCode =
        ErrorCode("VALIDATION_PLAY_TYPE_UNAVAILABLE");
    pub const VALIDATION_INVALID_NUMBER: ErrorCode = ErrorCode("VALIDATION_INVALID_NUMBER");
    pub const VALIDATION_NOTHING_TO_SUBMIT: ErrorCode = ErrorCode("VALIDATION_NOTHING_TO_SUBMIT");
    pub const VALIDATION_UNKNOWN_PLAY: ErrorCode = ErrorCode("VALIDATION_UNKNOWN_PLAY");
    pub const VALIDATION_UNKNOWN_COMMAND: ErrorCode = ErrorCode("VALIDATION_UNKNOWN_COMMAND");
    pub const VALIDATION_NO_THROW: ErrorCode = ErrorCode("VALIDATION_NO_THROW");

    // Network errors
    pub const NETWORK_BACKEND_UNAVAILABLE: ErrorCode = ErrorCode("NETWORK_BACKEND_UNAVAILABLE");

    // Session errors
    pub const SESSION_EXPIRED: ErrorCode = ErrorCode("SESSION_EXPIRED");

    // Business rule errors
    pub const BUSINESS_THROW_CLOSED: ErrorCode = ErrorCode("BUSINESS_THROW_CLOSED");
    pub const BUSINESS_REJECTED: ErrorCode = ErrorCode("BUSINESS_REJECTED");

    // Internal errors
    pub const INTERNAL_UNEXPECTED: ErrorCode = ErrorCode("INTERNAL_UNEXPECTED");
    pub const INTERNAL_DESERIALIZATION: ErrorCode = ErrorCode("INTERNAL_DESERIALIZATION");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Standardized error structure used across the workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceError {
    /// Error category (determines recoverability and log level)
    pub category: ErrorCategory,

    /// Structured error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context (e.g. offending numbers, HTTP status)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ServiceError {
    pub fn new(category: ErrorCategory, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            category,
            code: code.as_str().to_string(),
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Validation, code, message)
    }

    pub fn duplicate_numbers(numbers: &[String]) -> Self {
        Self::validation(
            ErrorCode::VALIDATION_DUPLICATE_NUMBERS,
            "Duplicate numbers are only allowed in Parlet plays",
        )
        .with_context(numbers.join(", "))
    }

    pub fn backend_unavailable(error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Network,
            ErrorCode::NETWORK_BACKEND_UNAVAILABLE,
            "Betting API unavailable",
        )
        .with_context(error.to_string())
    }

    pub fn session_expired() -> Self {
        Self::new(
            ErrorCategory::Session,
            ErrorCode::SESSION_EXPIRED,
            "Session expired, please sign in again",
        )
    }

    pub fn throw_closed(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCategory::BusinessRule,
            ErrorCode::BUSINESS_THROW_CLOSED,
            message,
        )
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::BusinessRule, ErrorCode::BUSINESS_REJECTED, message)
            .with_context(format!("status: {}", status))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Internal, ErrorCode::INTERNAL_UNEXPECTED, message)
    }

    pub fn deserialization_error(error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Internal,
            ErrorCode::INTERNAL_DESERIALIZATION,
            "Malformed response",
        )
        .with_context(error.to_string())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "[{}] {}: {}", self.code, self.message, context)
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ServiceError {}

// Convenience type alias
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_recoverability() {
        assert!(ErrorCategory::Validation.is_recoverable());
        assert!(ErrorCategory::BusinessRule.is_recoverable());
        assert!(!ErrorCategory::Session.is_recoverable());
        assert_eq!(ErrorCategory::Network.log_level(), "error");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(
            ErrorCode::VALIDATION_DUPLICATE_NUMBERS.to_string(),
            "VALIDATION_DUPLICATE_NUMBERS"
        );
    }

    #[test]
    fn test_duplicate_numbers_context() {
        let error = ServiceError::duplicate_numbers(&["25".to_string(), "07".to_string()]);
        assert_eq!(error.category, ErrorCategory::Validation);
        assert_eq!(error.code, "VALIDATION_DUPLICATE_NUMBERS");
        assert!(error.to_string().contains("25, 07"));
    }

    #[test]
    fn test_error_serialization() {
        let error = ServiceError::throw_closed("Throw closed at 13:00");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("BUSINESS_THROW_CLOSED"));
        assert!(json.contains("BUSINESS_RULE"));
        assert!(!json.contains("context"));
    }
}
