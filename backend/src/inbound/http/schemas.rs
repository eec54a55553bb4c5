//! OpenAPI schema definitions for document payloads.
//!
//! Documents are free-form JSON objects, so the schema only pins the
//! identifier every stored document carries.

use utoipa::ToSchema;

/// OpenAPI schema for a stored document.
///
/// Any other fields are returned exactly as they were stored.
#[derive(ToSchema)]
#[schema(as = Document)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DocumentSchema {
    /// 24 hex-digit identifier assigned on creation.
    #[schema(rename = "_id", example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    id: String,
}
