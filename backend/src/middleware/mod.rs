//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns: trace correlation,
//! CORS, security headers and error response logging.

pub mod cors;
pub mod error_log;
pub mod security_headers;
pub mod trace;

pub use error_log::ErrorLog;
pub use security_headers::security_headers;
pub use trace::Trace;
