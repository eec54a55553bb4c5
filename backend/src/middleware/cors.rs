//! Cross-origin resource sharing.
//!
//! Every origin is allowed and preflight requests are answered for any path,
//! including paths that would otherwise fall through to the not-found
//! handler.

use actix_cors::Cors;

use crate::domain::TRACE_ID_HEADER;
use crate::inbound::http::documents::TOTAL_COUNT_HEADER;

/// Preflight cache lifetime in seconds.
pub const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Permissive CORS policy exposing the pagination and trace headers.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use vendor_gateway::middleware::cors;
///
/// let _app = App::new().wrap(cors::permissive());
/// ```
#[must_use]
pub fn permissive() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .expose_headers([TOTAL_COUNT_HEADER, TRACE_ID_HEADER])
        .max_age(PREFLIGHT_MAX_AGE_SECS)
}
