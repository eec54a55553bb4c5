//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the document CRUD handlers, the health probes and the
//! error envelope schema. The shared `{resource}` path parameter is narrowed
//! to the registered resource segments after generation.
//!
//! The document is served by Swagger UI under `/apiSpec/` and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::path::{Operation, PathItem};
use utoipa::openapi::schema::{ObjectBuilder, Type};
use utoipa::openapi::{RefOr, Schema};
use utoipa::{Modify, OpenApi};

use crate::domain::Resource;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::schemas::DocumentSchema;

/// Path parameter naming the resource collection.
const RESOURCE_PARAM: &str = "resource";

fn operations_mut(item: &mut PathItem) -> impl Iterator<Item = &mut Operation> {
    [
        &mut item.get,
        &mut item.put,
        &mut item.post,
        &mut item.delete,
    ]
    .into_iter()
    .flatten()
}

/// Restrict `{resource}` to the registered path segments.
struct ResourceParamAddon;

impl Modify for ResourceParamAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let segments: RefOr<Schema> = ObjectBuilder::new()
            .schema_type(Type::String)
            .enum_values(Some(Resource::ALL.iter().map(|r| r.path_segment())))
            .into();

        for item in openapi.paths.paths.values_mut() {
            for operation in operations_mut(item) {
                let params = operation.parameters.iter_mut().flatten();
                for param in params.filter(|p| p.name == RESOURCE_PARAM) {
                    param.schema = Some(segments.clone());
                }
            }
        }
    }
}

/// OpenAPI document for the gateway.
#[derive(OpenApi)]
#[openapi(
    modifiers(&ResourceParamAddon),
    info(
        title = "Vendor gateway API",
        description = "CRUD access to vendor management collections and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::documents::list_documents,
        crate::inbound::http::documents::get_document,
        crate::inbound::http::documents::create_document,
        crate::inbound::http::documents::replace_document,
        crate::inbound::http::documents::delete_document,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(DocumentSchema, ErrorEnvelope)),
    tags(
        (name = "documents", description = "Document CRUD shared by every resource"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
