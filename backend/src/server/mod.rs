//! Server construction and middleware wiring.

mod config;
pub mod shutdown;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::{Config as SwaggerConfig, SwaggerUi};

use crate::doc::ApiDoc;
use crate::domain::ports::DocumentRepository;
use crate::inbound::http::body::{form_config, json_config, query_config};
use crate::inbound::http::documents::{
    create_document, delete_document, get_document, list_documents, replace_document,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::index::{index, not_found};
use crate::inbound::http::state::HttpState;
use crate::middleware::{ErrorLog, Trace, cors, security_headers};

/// Path Swagger UI is served under.
pub const SWAGGER_PATH: &str = "/apiSpec";

/// Shared state handed to every worker's [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags served by the probes.
    pub health_state: web::Data<HealthState>,
    /// Ports used by the document handlers.
    pub http_state: web::Data<HttpState>,
    /// Maximum JSON or urlencoded body size in bytes.
    pub body_limit: usize,
}

/// Assemble the application: middleware, extractor limits, routes and docs.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        body_limit,
    } = deps;

    let api = web::scope("/api/v1")
        .service(list_documents)
        .service(get_document)
        .service(create_document)
        .service(replace_document)
        .service(delete_document);

    let swagger = SwaggerUi::new(format!("{SWAGGER_PATH}/{{_:.*}}"))
        .url(format!("{SWAGGER_PATH}/openapi.json"), ApiDoc::openapi())
        .config(SwaggerConfig::default().doc_expansion("none"));

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config(body_limit))
        .app_data(form_config(body_limit))
        .app_data(query_config())
        .wrap(ErrorLog)
        .wrap(cors::permissive())
        .wrap(security_headers())
        .wrap(Trace)
        .service(index)
        .service(api)
        .service(ready)
        .service(live)
        .service(web::redirect(SWAGGER_PATH, format!("{SWAGGER_PATH}/")))
        .service(swagger)
        .default_service(web::to(not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Signal handling is left to the caller; see [`shutdown::stop_on_signal`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    documents: Arc<dyn DocumentRepository>,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(HttpState::new(documents));
    let ServerConfig {
        bind_addr,
        body_limit,
    } = config;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            body_limit,
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
