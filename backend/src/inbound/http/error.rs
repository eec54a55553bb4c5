//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning every
//! failure into the gateway's `Status`/`Info` envelope.
//!
//! | category | HTTP | body |
//! |---|---|---|
//! | validation | 400 | `Status`, `Info: [{"Error": ..}]`, `message` |
//! | 400 / 401 / 404 | same | `Status`, `Info` |
//! | 403 | 200 | `Status`, `Info` |
//! | anything else | 500 | `Status`, `Info`, `Error` |

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use crate::domain::ports::DocumentRepositoryError;
use crate::domain::{DocumentValidationError, Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Top-level message attached to validation envelopes.
pub const VALIDATION_MESSAGE: &str = "Check Request Data";

/// Exception name reported for database failures.
pub const DATABASE_ERROR_NAME: &str = "MongoError";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorEnvelope {
    /// Status-like value of the failure; not always the HTTP status.
    #[serde(rename = "Status")]
    pub status: u16,
    /// Client-facing payload.
    #[serde(rename = "Info", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub info: Option<Value>,
    /// Underlying failure, internal errors only.
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub error: Option<Value>,
    /// Summary, validation errors only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of classifying an [`Error`].
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// Response body.
    pub envelope: ErrorEnvelope,
    /// Log label for the category.
    pub label: &'static str,
}

/// Map an error to its response status, envelope and log label.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use serde_json::json;
/// use vendor_gateway::domain::Error;
/// use vendor_gateway::inbound::http::error::classify;
///
/// let classified = classify(&Error::forbidden(json!("read only")));
/// assert_eq!(classified.status, StatusCode::OK);
/// assert_eq!(classified.envelope.status, 403);
/// ```
#[must_use]
pub fn classify(error: &Error) -> Classified {
    let status_value = error.code().status();
    let passthrough = |status: StatusCode, label: &'static str| Classified {
        status,
        envelope: ErrorEnvelope {
            status: status_value,
            info: error.info().cloned(),
            error: None,
            message: None,
        },
        label,
    };

    match error.code() {
        ErrorCode::Validation => Classified {
            status: StatusCode::BAD_REQUEST,
            envelope: ErrorEnvelope {
                status: status_value,
                info: Some(json!([{ "Error": error.message().replace('"', "") }])),
                error: None,
                message: Some(VALIDATION_MESSAGE.to_owned()),
            },
            label: "JOI validation error",
        },
        ErrorCode::BadRequest => passthrough(StatusCode::BAD_REQUEST, "Bad Request Found"),
        ErrorCode::NotFound => passthrough(StatusCode::NOT_FOUND, "Request Not Found"),
        ErrorCode::Unauthorized => passthrough(StatusCode::UNAUTHORIZED, "Unauthorized Error"),
        // Clients of the gateway read `Status` rather than the HTTP code here.
        ErrorCode::Forbidden => passthrough(StatusCode::OK, "Forbidden Error"),
        _ => Classified {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            envelope: ErrorEnvelope {
                status: status_value,
                info: Some(
                    error
                        .info()
                        .cloned()
                        .unwrap_or_else(|| Value::String(error.name().to_owned())),
                ),
                error: Some(
                    error
                        .detail()
                        .cloned()
                        .unwrap_or_else(|| Value::String(error.message().to_owned())),
                ),
                message: None,
            },
            label: "Internal Server Error Found",
        },
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        classify(self).status
    }

    fn error_response(&self) -> HttpResponse {
        let classified = classify(self);
        let mut builder = HttpResponse::build(classified.status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(classified.envelope)
    }
}

impl From<DocumentValidationError> for Error {
    fn from(err: DocumentValidationError) -> Self {
        Error::validation(err.to_string())
    }
}

impl From<DocumentRepositoryError> for Error {
    fn from(err: DocumentRepositoryError) -> Self {
        let message = match &err {
            DocumentRepositoryError::Unstorable { message } => {
                return Error::validation(message.clone());
            }
            DocumentRepositoryError::Connection { .. } => "database unavailable",
            DocumentRepositoryError::Timeout { .. } => "database operation timed out",
            DocumentRepositoryError::Query { .. } => "database operation failed",
            DocumentRepositoryError::Mapping { .. } => "stored document could not be read",
        };
        warn!(error = %err, "document repository failure");
        Error::internal(message).with_name(DATABASE_ERROR_NAME)
    }
}

#[cfg(test)]
mod tests;
