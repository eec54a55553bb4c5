//! Root and fallback handlers.

use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, get};
use serde_json::json;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::documents::ROUTE_NOT_FOUND;

/// Body returned by `GET /`.
pub const INDEX_BODY: &str = "response from get ";

/// `GET /` answers 400 with a fixed text body.
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::BadRequest()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_BODY)
}

/// Default service for unmatched routes.
///
/// `OPTIONS` requests that reach this point carried no CORS preflight
/// headers and are acknowledged with 204.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    if req.method() == Method::OPTIONS {
        return Ok(HttpResponse::NoContent().finish());
    }
    Err(Error::not_found(json!(ROUTE_NOT_FOUND)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn root_answers_bad_request_with_text() {
        let app = test::init_service(App::new().service(index)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(res).await;
        assert_eq!(body.as_ref(), INDEX_BODY.as_bytes());
    }

    #[rstest]
    #[case(actix_web::http::Method::GET, StatusCode::NOT_FOUND)]
    #[case(actix_web::http::Method::POST, StatusCode::NOT_FOUND)]
    #[case(actix_web::http::Method::OPTIONS, StatusCode::NO_CONTENT)]
    #[actix_web::test]
    async fn fallback_reports_route_not_found(
        #[case] method: actix_web::http::Method,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(App::new().default_service(web::to(not_found))).await;

        let req = test::TestRequest::default()
            .method(method)
            .uri("/no/such/route")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), expected);
        if expected == StatusCode::NOT_FOUND {
            let body: serde_json::Value = test::read_body_json(res).await;
            assert_eq!(body, json!({ "Status": 404, "Info": ROUTE_NOT_FOUND }));
        }
    }
}
