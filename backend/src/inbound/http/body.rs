//! Request body and query parsing.
//!
//! JSON and urlencoded bodies share one size limit. Extractor failures are
//! reported through the error envelope: oversized bodies as bad requests,
//! everything else as validation errors.

use std::collections::HashMap;

use actix_web::error::{JsonPayloadError, QueryPayloadError, UrlencodedError};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde_json::{Map, Value, json};

use crate::domain::{DocumentBody, Error};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn oversized(limit: usize) -> Error {
    Error::bad_request(json!(format!("request body exceeds {limit} bytes")))
}

fn json_error(err: JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::Overflow { limit }
        | JsonPayloadError::OverflowKnownLength { limit, .. } => oversized(limit),
        other => Error::validation(other.to_string()),
    }
}

fn form_error(err: UrlencodedError) -> Error {
    match err {
        UrlencodedError::Overflow { limit, .. } => oversized(limit),
        other => Error::validation(other.to_string()),
    }
}

/// JSON extractor configuration honouring `limit`.
#[must_use]
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| json_error(err).into())
}

/// Urlencoded extractor configuration honouring `limit`.
#[must_use]
pub fn form_config(limit: usize) -> web::FormConfig {
    web::FormConfig::default()
        .limit(limit)
        .error_handler(|err, _req| form_error(err).into())
}

/// Query string extractor configuration.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err: QueryPayloadError, _req| Error::validation(err.to_string()).into())
}

/// Document body read from a JSON or urlencoded request.
///
/// Urlencoded fields become string values.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPayload(pub DocumentBody);

impl DocumentPayload {
    /// Unwrap the parsed body.
    pub fn into_inner(self) -> DocumentBody {
        self.0
    }
}

impl FromRequest for DocumentPayload {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if req.content_type() == FORM_CONTENT_TYPE {
            let fut = web::Form::<HashMap<String, String>>::from_request(req, payload);
            Box::pin(async move {
                let fields: Map<String, Value> = fut
                    .await?
                    .into_inner()
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect();
                Ok(Self(DocumentBody::new(fields)))
            })
        } else {
            let fut = web::Json::<Value>::from_request(req, payload);
            Box::pin(async move {
                let value = fut.await?.into_inner();
                DocumentBody::try_from(value)
                    .map(Self)
                    .map_err(|err| Error::from(err).into())
            })
        }
    }
}
