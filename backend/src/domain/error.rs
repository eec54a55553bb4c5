//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter classifies them into
//! a status code and the gateway's `Status`/`Info` JSON envelope.

use serde_json::Value;

use crate::domain::TraceId;

/// Fallback exception name reported for internal errors.
pub const DEFAULT_ERROR_NAME: &str = "Error";

/// Stable error category.
///
/// Every category except [`ErrorCode::Validation`] corresponds to a
/// status-like value carried by the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Request payload failed schema validation.
    Validation,
    /// The request is malformed.
    BadRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested route or document does not exist.
    NotFound,
    /// Anything else.
    Internal,
}

impl ErrorCode {
    /// Classify a raw status-like value.
    ///
    /// Only 400, 401, 403 and 404 have dedicated categories; every other
    /// value is treated as an internal failure.
    ///
    /// # Examples
    /// ```
    /// use vendor_gateway::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::from_status(404), ErrorCode::NotFound);
    /// assert_eq!(ErrorCode::from_status(418), ErrorCode::Internal);
    /// ```
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            _ => Self::Internal,
        }
    }

    /// Status value reported in the envelope's `Status` field.
    #[must_use]
    pub fn status(self) -> u16 {
        match self {
            Self::Validation | Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

/// Domain error payload.
///
/// `info` and `detail` mirror the `Info` and `Error` envelope fields. For
/// internal errors the HTTP layer falls back to `name` and `message` when
/// they are absent.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use vendor_gateway::domain::{Error, ErrorCode};
///
/// let err = Error::not_found(json!("vendor not found"));
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.info(), Some(&json!("vendor not found")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    info: Option<Value>,
    name: String,
    message: String,
    detail: Option<Value>,
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error with no `Info` payload.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// payload is correlated automatically.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            info: None,
            name: DEFAULT_ERROR_NAME.to_owned(),
            message: message.into(),
            detail: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Build an error from a status-like value and its `Info` payload.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use vendor_gateway::domain::{Error, ErrorCode};
    ///
    /// let err = Error::from_status(403, json!("read only"));
    /// assert_eq!(err.code(), ErrorCode::Forbidden);
    /// ```
    pub fn from_status(status: u16, info: Value) -> Self {
        let code = ErrorCode::from_status(status);
        let message = match &info {
            Value::String(text) => text.clone(),
            _ => format!("request failed with status {status}"),
        };
        Self::new(code, message).with_info(info)
    }

    /// Schema validation failure. `message` becomes the first envelope entry.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Convenience constructor for [`ErrorCode::BadRequest`].
    pub fn bad_request(info: Value) -> Self {
        Self::from_status(400, info)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(info: Value) -> Self {
        Self::from_status(401, info)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(info: Value) -> Self {
        Self::from_status(403, info)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(info: Value) -> Self {
        Self::from_status(404, info)
    }

    /// Convenience constructor for [`ErrorCode::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Attach an `Info` payload.
    pub fn with_info(mut self, info: Value) -> Self {
        self.info = Some(info);
        self
    }

    /// Override the exception name reported for internal errors.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach an explicit `Error` payload for internal errors.
    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Error category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// `Info` payload, if any.
    #[must_use]
    pub fn info(&self) -> Option<&Value> {
        self.info.as_ref()
    }

    /// Exception name, `Error` unless overridden.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Explicit `Error` payload, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&Value> {
        self.detail.as_ref()
    }

    /// Correlation identifier captured at construction time.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
