//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn envelope_of(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace id is ascii").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, trace_id, body)
}

#[rstest]
#[case(Error::bad_request(json!("bad")), StatusCode::BAD_REQUEST, "Bad Request Found")]
#[case(Error::unauthorized(json!("who")), StatusCode::UNAUTHORIZED, "Unauthorized Error")]
#[case(Error::forbidden(json!("no")), StatusCode::OK, "Forbidden Error")]
#[case(Error::not_found(json!("gone")), StatusCode::NOT_FOUND, "Request Not Found")]
#[case(Error::validation("bad"), StatusCode::BAD_REQUEST, "JOI validation error")]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error Found")]
fn classification_selects_status_and_label(
    #[case] error: Error,
    #[case] status: StatusCode,
    #[case] label: &str,
) {
    let classified = classify(&error);

    assert_eq!(classified.status, status);
    assert_eq!(classified.label, label);
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[case(400, StatusCode::BAD_REQUEST)]
#[case(401, StatusCode::UNAUTHORIZED)]
#[case(404, StatusCode::NOT_FOUND)]
#[case(409, StatusCode::INTERNAL_SERVER_ERROR)]
#[case(503, StatusCode::INTERNAL_SERVER_ERROR)]
fn raw_status_values_classify_like_named_constructors(
    #[case] status: u16,
    #[case] expected: StatusCode,
) {
    let classified = classify(&Error::from_status(status, json!("info")));
    assert_eq!(classified.status, expected);
}

#[rstest]
#[actix_web::test]
async fn passthrough_envelope_carries_info_only() {
    let (status, _, body) = envelope_of(&Error::not_found(json!({ "id": "abc" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "Status": 404, "Info": { "id": "abc" } }));
}

#[rstest]
#[actix_web::test]
async fn forbidden_reports_403_inside_a_200_response() {
    let (status, _, body) = envelope_of(&Error::forbidden(json!("read only"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "Status": 403, "Info": "read only" }));
}

#[rstest]
#[actix_web::test]
async fn validation_envelope_strips_double_quotes() {
    let error = Error::validation("\"name\" is required");

    let (status, _, body) = envelope_of(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "Status": 400,
            "Info": [{ "Error": "name is required" }],
            "message": "Check Request Data",
        })
    );
}

#[rstest]
#[actix_web::test]
async fn internal_envelope_falls_back_to_name_and_message() {
    let (_, _, body) = envelope_of(&Error::internal("boom")).await;

    assert_eq!(
        body,
        json!({ "Status": 500, "Info": "Error", "Error": "boom" })
    );
}

#[rstest]
#[actix_web::test]
async fn internal_envelope_prefers_explicit_info_and_detail() {
    let error = Error::from_status(502, json!("upstream"))
        .with_detail(json!({ "code": "ECONNRESET" }));

    let (status, _, body) = envelope_of(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "Status": 500, "Info": "upstream", "Error": { "code": "ECONNRESET" } })
    );
}

#[rstest]
#[actix_web::test]
async fn trace_id_header_accompanies_error(expected_trace_id: String) {
    let error = Error::not_found(json!("missing")).with_trace_id(expected_trace_id.clone());

    let (_, trace_id, _) = envelope_of(&error).await;

    assert_eq!(trace_id.as_deref(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[actix_web::test]
async fn no_trace_header_without_trace_id() {
    let (_, trace_id, _) = envelope_of(&Error::bad_request(json!("bad"))).await;
    assert!(trace_id.is_none());
}

#[rstest]
#[case(DocumentRepositoryError::connection("refused"), "database unavailable")]
#[case(DocumentRepositoryError::timeout(10_000_u64), "database operation timed out")]
#[case(DocumentRepositoryError::query("E11000"), "database operation failed")]
#[case(DocumentRepositoryError::mapping("bad _id"), "stored document could not be read")]
fn repository_failures_become_redacted_internal_errors(
    #[case] failure: DocumentRepositoryError,
    #[case] message: &str,
) {
    let error = Error::from(failure);

    assert_eq!(error.code(), ErrorCode::Internal);
    assert_eq!(error.name(), DATABASE_ERROR_NAME);
    assert_eq!(error.message(), message);
}

#[rstest]
fn unstorable_bodies_become_validation_errors() {
    let error = Error::from(DocumentRepositoryError::unstorable(
        "u64 cannot be represented as i64",
    ));

    assert_eq!(error.code(), ErrorCode::Validation);
    let classified = classify(&error);
    assert_eq!(classified.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        classified.envelope.info,
        Some(json!([{ "Error": "u64 cannot be represented as i64" }]))
    );
    assert_eq!(classified.envelope.message.as_deref(), Some(VALIDATION_MESSAGE));
}

#[rstest]
fn document_validation_errors_become_validation_errors() {
    let error = Error::from(DocumentValidationError::InvalidId);

    assert_eq!(error.code(), ErrorCode::Validation);
    let classified = classify(&error);
    assert_eq!(
        classified.envelope.info,
        Some(json!([{ "Error": "id must be a valid 24 character hex string" }]))
    );
}

#[rstest]
fn envelope_round_trips_through_serde() {
    let envelope: ErrorEnvelope =
        serde_json::from_value(json!({ "Status": 401, "Info": "token expired" }))
            .expect("envelope deserialises");

    assert_eq!(envelope.status, 401);
    assert!(envelope.error.is_none());
    assert!(envelope.message.is_none());
}
