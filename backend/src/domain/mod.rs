//! Domain primitives and ports.
//!
//! Purpose: keep the gateway's error model, resource registry and document
//! primitives independent of actix and the MongoDB driver.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failures and their categories.
//! - Resource: registry of mounted document resources.
//! - DocumentId, DocumentBody, StoredDocument, PageRequest, Page.
//! - TraceId: request correlation identifier.

pub mod document;
pub mod error;
pub mod ports;
pub mod resource;
pub mod trace_id;

pub use self::document::{
    DocumentBody, DocumentId, DocumentValidationError, Page, PageRequest, StoredDocument,
};
pub use self::error::{Error, ErrorCode};
pub use self::resource::{Resource, UnknownResource};
pub use self::trace_id::TraceId;

/// Header carrying the trace identifier on responses.
pub const TRACE_ID_HEADER: &str = "trace-id";
