//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::json;

use crate::domain::{UserError, UserId};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("connection string leaked: host=db password=hunter2")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "code": "persistence_error" }))
}

async fn body_of(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error JSON");
    (status, header, payload)
}

#[rstest]
#[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case(ErrorCode::Conflict, StatusCode::CONFLICT)]
#[case(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
#[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
fn status_follows_code(#[case] code: ErrorCode, #[case] status: StatusCode) {
    assert_eq!(status_for(code), status);
    assert_eq!(ResponseError::status_code(&Error::new(code, "x")), status);
}

#[rstest]
#[case(UserError::IdNotValid { raw: "abc".into() }, StatusCode::BAD_REQUEST)]
#[case(UserError::IdNotTransmitted, StatusCode::BAD_REQUEST)]
#[case(UserError::InvalidAge { age: 10 }, StatusCode::BAD_REQUEST)]
#[case(UserError::NotFound { lookup: UserId::new(1).into() }, StatusCode::NOT_FOUND)]
#[case(UserError::NameTaken { name: "Bob".into() }, StatusCode::CONFLICT)]
#[case(UserError::Decode { message: "eof".into() }, StatusCode::INTERNAL_SERVER_ERROR)]
fn user_errors_map_to_documented_statuses(#[case] error: UserError, #[case] status: StatusCode) {
    let error: Error = error.into();
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error: Error) {
    let (status, header, payload) = body_of(&internal_error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.message(), INTERNAL_ERROR_MESSAGE);
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::invalid_request("user id \"abc\" is not a valid non-negative integer")
        .with_details(json!({ "code": "id_not_valid", "value": "abc" }));
    let (status, header, payload) = body_of(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(header.is_none());
    assert_eq!(payload, error);
}

#[rstest]
fn actix_errors_become_internal() {
    let actix_error = actix_web::error::ErrorBadGateway("upstream");
    let error = Error::from(actix_error);
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), INTERNAL_ERROR_MESSAGE);
}
