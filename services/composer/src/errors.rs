use shared::errors::{ErrorCode, ServiceError};
use shared::{PlayType, ValidationError};
use uuid::Uuid;

/// Validation failures surfaced to the user
///
/// Every variant leaves the draft and the separated plays untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposerError {
    #[error("Enter at least one number")]
    EmptyDraft,

    #[error("Select at least one play type")]
    NoPlayTypeSelected,

    #[error("The play has no amount")]
    ZeroAmount,

    #[error("Duplicate numbers are only allowed in Parlet plays: {}", .0.join(", "))]
    DuplicateNumbers(Vec<String>),

    #[error("AL needs exactly one number entered, found {0}")]
    AlTokenCount(usize),

    #[error("No AL range between {first} and {second}")]
    InvalidAlRange { first: String, second: String },

    #[error("{0} is not available for the entered numbers")]
    PlayTypeUnavailable(PlayType),

    #[error("{0} is not selected")]
    PlayTypeNotSelected(PlayType),

    #[error("Play not found: {0}")]
    PlayNotFound(Uuid),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("There are no priced plays to submit")]
    NothingToSubmit,

    #[error("The amounts are too large to price")]
    AmountOverflow,
}

impl ComposerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ComposerError::EmptyDraft => ErrorCode::VALIDATION_EMPTY_DRAFT,
            ComposerError::NoPlayTypeSelected => ErrorCode::VALIDATION_NO_PLAY_TYPE,
            ComposerError::ZeroAmount => ErrorCode::VALIDATION_ZERO_AMOUNT,
            ComposerError::DuplicateNumbers(_) => ErrorCode::VALIDATION_DUPLICATE_NUMBERS,
            ComposerError::AlTokenCount(_) => ErrorCode::VALIDATION_AL_TOKEN_COUNT,
            ComposerError::InvalidAlRange { .. } => ErrorCode::VALIDATION_AL_RANGE,
            ComposerError::PlayTypeUnavailable(_) | ComposerError::PlayTypeNotSelected(_) => {
                ErrorCode::VALIDATION_PLAY_TYPE_UNAVAILABLE
            }
            ComposerError::PlayNotFound(_) => ErrorCode::INTERNAL_UNEXPECTED,
            ComposerError::InvalidNumber(_) => ErrorCode::VALIDATION_INVALID_NUMBER,
            ComposerError::NothingToSubmit => ErrorCode::VALIDATION_NOTHING_TO_SUBMIT,
            ComposerError::AmountOverflow => ErrorCode::VALIDATION_AMOUNT_OVERFLOW,
        }
    }
}

impl From<ValidationError> for ComposerError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::AmountOverflow => ComposerError::AmountOverflow,
            ValidationError::InvalidAmount(text) | ValidationError::UnknownPlayType(text) => {
                ComposerError::InvalidNumber(text)
            }
        }
    }
}

impl From<ComposerError> for ServiceError {
    fn from(err: ComposerError) -> Self {
        match &err {
            ComposerError::DuplicateNumbers(numbers) => ServiceError::duplicate_numbers(numbers),
            ComposerError::PlayNotFound(_) => ServiceError::internal(err.to_string()),
            _ => ServiceError::validation(err.code(), err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ComposerError>;
