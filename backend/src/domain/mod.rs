//! Domain entities, errors and services for the user API.
//!
//! Nothing here depends on a transport or storage technology. Inbound
//! adapters call the driving ports in [`ports`]; outbound adapters implement
//! [`ports::UserRepository`].

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_error;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{
    EMAIL_MAX, Email, MIN_AGE, NAME_MAX, NewUser, User, UserChanges, UserId, UserLookup,
    UserName, UserPatch, UserValidationError,
};
pub use self::user_error::UserError;
pub use self::user_service::UserService;

/// Result alias for handlers returning the shared error payload.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use user_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("user with id 1 not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
