//! Parse-then-validate helpers shared by the user handlers.
//!
//! Path segments and JSON bodies are decoded first and checked second; every
//! violation surfaces as a [`UserError`] so the classification in
//! [`crate::domain::user_error`] decides the response status.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::error::Category;

use crate::domain::{Error, UserError, UserId};

/// Parse a user id taken from the request path.
///
/// # Examples
/// ```
/// use user_api::domain::{UserError, UserId};
/// use user_api::inbound::http::validation::parse_user_id;
///
/// assert_eq!(parse_user_id("42"), Ok(UserId::new(42)));
/// assert_eq!(parse_user_id(""), Err(UserError::IdNotTransmitted));
/// ```
pub fn parse_user_id(raw: &str) -> Result<UserId, UserError> {
    if raw.is_empty() {
        return Err(UserError::IdNotTransmitted);
    }
    let not_valid = || UserError::IdNotValid {
        raw: raw.to_owned(),
    };
    // `u64::from_str` accepts a leading '+', which is not a plain id.
    if !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(not_valid());
    }
    raw.parse::<u64>().map(UserId::new).map_err(|_| not_valid())
}

/// Convert a JSON age into the domain type. Out-of-range values, negative
/// ones included, are reported as invalid ages.
pub fn parse_age(raw: i64) -> Result<u32, UserError> {
    u32::try_from(raw).map_err(|_| UserError::InvalidAge { age: raw })
}

/// Classify body decoding failures.
///
/// A body that is not JSON at all is a decode error; JSON of the wrong shape
/// is the client's fault.
pub fn classify_json_error(err: &JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::Deserialize(inner) => match inner.classify() {
            Category::Data => Error::invalid_request(format!("invalid request body: {inner}")),
            Category::Syntax | Category::Eof | Category::Io => UserError::Decode {
                message: inner.to_string(),
            }
            .into(),
        },
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            Error::invalid_request("request body is too large")
        }
        JsonPayloadError::ContentType => {
            Error::invalid_request("request body must be application/json")
        }
        other => UserError::Decode {
            message: other.to_string(),
        }
        .into(),
    }
}

/// JSON extractor configuration used by every body-accepting route.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req: &HttpRequest| classify_json_error(&err).into())
}
