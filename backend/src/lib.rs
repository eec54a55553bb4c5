//! Vendor gateway library modules.
//!
//! An HTTP gateway exposing CRUD routes over MongoDB collections with a
//! centralised `Status`/`Info` error envelope.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod telemetry;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
