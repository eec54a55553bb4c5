//! Security response headers applied to every response.
//!
//! Handlers may override any of these; `DefaultHeaders` only fills in
//! headers that are missing.

use actix_web::middleware::DefaultHeaders;

/// Header name and value pairs added to every response.
pub const SECURITY_HEADERS: [(&str, &str); 8] = [
    (
        "x-xss-protection",
        "1; mode=block; report=/report-xss-violation",
    ),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-dns-prefetch-control", "off"),
    (
        "strict-transport-security",
        "max-age=15552000; includeSubDomains",
    ),
    ("x-download-options", "noopen"),
    ("referrer-policy", "no-referrer"),
    ("x-permitted-cross-domain-policies", "none"),
];

/// Middleware inserting [`SECURITY_HEADERS`].
#[must_use]
pub fn security_headers() -> DefaultHeaders {
    SECURITY_HEADERS
        .into_iter()
        .fold(DefaultHeaders::new(), |headers, pair| headers.add(pair))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn every_header_is_present() {
        let app = test::init_service(
            App::new()
                .wrap(security_headers())
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        for (name, value) in SECURITY_HEADERS {
            assert_eq!(
                res.headers().get(name).and_then(|v| v.to_str().ok()),
                Some(value),
                "header {name}"
            );
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn handler_values_win() {
        let app = test::init_service(App::new().wrap(security_headers()).route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok()
                    .insert_header(("x-frame-options", "DENY"))
                    .finish()
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(
            res.headers().get("x-frame-options").and_then(|v| v.to_str().ok()),
            Some("DENY")
        );
    }
}
