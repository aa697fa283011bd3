//! Error taxonomy for the user use cases.
//!
//! [`UserError`] is what the service and request parsing raise. Inbound
//! adapters convert it into the transport-agnostic [`Error`] payload, whose
//! [`ErrorCode`] alone decides the response status.

use serde_json::{Value, json};

use super::ports::UserRepositoryError;
use super::{Error, ErrorCode, MIN_AGE, UserLookup, UserValidationError};

/// Failures raised by user operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    #[error("user with {lookup} not found")]
    NotFound { lookup: UserLookup },
    #[error("user name {name:?} is already taken")]
    NameTaken { name: String },
    #[error("user age must be at least {min}, got {age}", min = MIN_AGE)]
    InvalidAge { age: i64 },
    #[error("invalid user name: {0}")]
    InvalidName(UserValidationError),
    #[error("invalid email: {0}")]
    InvalidEmail(UserValidationError),
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },
    #[error("user id was not transmitted")]
    IdNotTransmitted,
    #[error("user id {raw:?} is not a valid non-negative integer")]
    IdNotValid { raw: String },
    #[error("request body could not be decoded: {message}")]
    Decode { message: String },
    #[error(transparent)]
    Persistence(#[from] UserRepositoryError),
}

impl UserError {
    /// Transport-agnostic classification of this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::NameTaken { .. } => ErrorCode::Conflict,
            Self::InvalidAge { .. }
            | Self::InvalidName(_)
            | Self::InvalidEmail(_)
            | Self::MissingField { .. }
            | Self::IdNotTransmitted
            | Self::IdNotValid { .. } => ErrorCode::InvalidRequest,
            Self::Decode { .. } => ErrorCode::InternalError,
            Self::Persistence(err) => match err {
                UserRepositoryError::NotFound { .. } => ErrorCode::NotFound,
                UserRepositoryError::Duplicate { .. } => ErrorCode::Conflict,
                UserRepositoryError::Connection { .. } => ErrorCode::ServiceUnavailable,
                UserRepositoryError::Query { .. } => ErrorCode::InternalError,
            },
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "user_not_found",
            Self::NameTaken { .. } => "name_taken",
            Self::InvalidAge { .. } => "invalid_age",
            Self::InvalidName(_) => "invalid_name",
            Self::InvalidEmail(_) => "invalid_email",
            Self::MissingField { .. } => "missing_field",
            Self::IdNotTransmitted => "id_not_transmitted",
            Self::IdNotValid { .. } => "id_not_valid",
            Self::Decode { .. } => "decode_error",
            Self::Persistence(UserRepositoryError::Duplicate { .. }) => "duplicate_user",
            Self::Persistence(_) => "persistence_error",
        }
    }

    fn details(&self) -> Value {
        let reason = self.reason();
        match self {
            Self::InvalidAge { age } => json!({ "code": reason, "age": age, "minimum": MIN_AGE }),
            Self::InvalidName(_) => json!({ "code": reason, "field": "name" }),
            Self::InvalidEmail(_) => json!({ "code": reason, "field": "email" }),
            Self::MissingField { field } => json!({ "code": reason, "field": field }),
            Self::IdNotValid { raw } => json!({ "code": reason, "value": raw }),
            Self::NameTaken { name } => json!({ "code": reason, "name": name }),
            _ => json!({ "code": reason }),
        }
    }
}

impl From<UserValidationError> for UserError {
    fn from(value: UserValidationError) -> Self {
        match value.field() {
            "email" => Self::InvalidEmail(value),
            _ => Self::InvalidName(value),
        }
    }
}

impl From<UserError> for Error {
    fn from(value: UserError) -> Self {
        Error::new(value.code(), value.to_string()).with_details(value.details())
    }
}
