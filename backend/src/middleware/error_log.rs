//! Error response logging.
//!
//! Every response produced from a domain [`Error`] logs the endpoint at info
//! level, then the category label and the envelope sent to the client at
//! error level.

use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, info};

use crate::domain::Error;
use crate::inbound::http::error::classify;

/// Formats the endpoint line for a request.
pub(crate) fn endpoint_hit(scheme: &str, host: &str, path: &str) -> String {
    format!("API Endpoint Hit : {scheme}://{host}{path}")
}

fn log_error_response<B>(res: &ServiceResponse<B>) {
    let Some(domain_error) = res
        .response()
        .error()
        .and_then(|err| err.as_error::<Error>())
    else {
        return;
    };

    let request = res.request();
    let connection = request.connection_info();
    let target = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.path(), |pq| pq.as_str());
    info!("{}", endpoint_hit(connection.scheme(), connection.host(), target));

    let classified = classify(domain_error);
    let envelope = serde_json::to_string(&classified.envelope).unwrap_or_default();
    error!(
        label = classified.label,
        status = classified.envelope.status,
        envelope = %envelope,
        trace_id = domain_error.trace_id(),
        "{}",
        classified.label
    );
}

/// Middleware logging error responses.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use vendor_gateway::middleware::ErrorLog;
///
/// let _app = App::new().wrap(ErrorLog);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ErrorLog;

impl<S, B> Transform<S, ServiceRequest> for ErrorLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = ErrorLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorLogMiddleware { service }))
    }
}

/// Service wrapper produced by [`ErrorLog`].
pub struct ErrorLogMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            log_error_response(&res);
            Ok(res)
        })
    }
}
