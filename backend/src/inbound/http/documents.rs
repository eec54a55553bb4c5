//! Document CRUD handlers shared by every registered resource.
//!
//! ```text
//! GET    /api/v1/{resource}?skip=0&limit=50
//! GET    /api/v1/{resource}/{id}
//! POST   /api/v1/{resource}         {"name":"Acme"}
//! PUT    /api/v1/{resource}/{id}    {"name":"Acme Ltd"}
//! DELETE /api/v1/{resource}/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::IntoParams;

use crate::domain::{DocumentId, Error, PageRequest, Resource};
use crate::inbound::http::ApiResult;
use crate::inbound::http::body::DocumentPayload;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::schemas::DocumentSchema;
use crate::inbound::http::state::HttpState;

/// Response header carrying the collection size on list responses.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// `Info` reported when the path names no route.
pub const ROUTE_NOT_FOUND: &str = "Route Not Found";

/// `Info` reported when a document does not exist.
pub const DOCUMENT_NOT_FOUND: &str = "Document Not Found";

/// Pagination query for list requests.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Documents to skip. Defaults to 0.
    pub skip: Option<u64>,
    /// Page size. Defaults to 50 and is capped at 500.
    pub limit: Option<u64>,
}

fn resolve(segment: &str) -> Result<Resource, Error> {
    segment
        .parse()
        .map_err(|_| Error::not_found(json!(ROUTE_NOT_FOUND)))
}

fn document_not_found() -> Error {
    Error::not_found(json!(DOCUMENT_NOT_FOUND))
}

fn target(path: (String, String)) -> Result<(Resource, DocumentId), Error> {
    let (segment, raw_id) = path;
    let resource = resolve(&segment)?;
    let id = DocumentId::new(raw_id)?;
    Ok((resource, id))
}

/// List one page of documents.
#[utoipa::path(
    get,
    path = "/api/v1/{resource}",
    params(
        ("resource" = String, Path, description = "Resource path segment, e.g. `vendors`"),
        ListParams,
    ),
    responses(
        (status = 200, description = "Documents in identifier order", body = [DocumentSchema],
            headers(("x-total-count" = u64, description = "Documents in the collection"))),
        (status = 400, description = "Invalid pagination", body = ErrorEnvelope),
        (status = 404, description = "Unknown resource", body = ErrorEnvelope),
        (status = 500, description = "Database failure", body = ErrorEnvelope)
    ),
    tags = ["documents"],
    operation_id = "listDocuments"
)]
#[get("/{resource}")]
pub async fn list_documents(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<ListParams>,
) -> ApiResult<HttpResponse> {
    let resource = resolve(&path)?;
    let ListParams { skip, limit } = query.into_inner();
    let page = PageRequest::new(skip, limit)?;

    let page = state.documents.list(resource, page).await?;
    let items: Vec<Value> = page.items.into_iter().map(|doc| doc.into_json()).collect();
    Ok(HttpResponse::Ok()
        .insert_header((TOTAL_COUNT_HEADER, page.total.to_string()))
        .json(items))
}

/// Fetch one document.
#[utoipa::path(
    get,
    path = "/api/v1/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Resource path segment"),
        ("id" = String, Path, description = "24 hex-digit document identifier"),
    ),
    responses(
        (status = 200, description = "Stored document", body = DocumentSchema),
        (status = 400, description = "Invalid identifier", body = ErrorEnvelope),
        (status = 404, description = "Unknown resource or document", body = ErrorEnvelope),
        (status = 500, description = "Database failure", body = ErrorEnvelope)
    ),
    tags = ["documents"],
    operation_id = "getDocument"
)]
#[get("/{resource}/{id}")]
pub async fn get_document(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Value>> {
    let (resource, id) = target(path.into_inner())?;
    let stored = state
        .documents
        .get(resource, &id)
        .await?
        .ok_or_else(document_not_found)?;
    Ok(web::Json(stored.into_json()))
}

/// Create a document from a JSON or urlencoded object body.
#[utoipa::path(
    post,
    path = "/api/v1/{resource}",
    params(("resource" = String, Path, description = "Resource path segment")),
    request_body(content = Object, description = "Document fields; `_id` is ignored"),
    responses(
        (status = 201, description = "Created document", body = DocumentSchema),
        (status = 400, description = "Body is not an object", body = ErrorEnvelope),
        (status = 404, description = "Unknown resource", body = ErrorEnvelope),
        (status = 500, description = "Database failure", body = ErrorEnvelope)
    ),
    tags = ["documents"],
    operation_id = "createDocument"
)]
#[post("/{resource}")]
pub async fn create_document(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: DocumentPayload,
) -> ApiResult<HttpResponse> {
    let resource = resolve(&path)?;
    let stored = state
        .documents
        .create(resource, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(stored.into_json()))
}

/// Replace a document's fields, keeping its identifier.
#[utoipa::path(
    put,
    path = "/api/v1/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Resource path segment"),
        ("id" = String, Path, description = "24 hex-digit document identifier"),
    ),
    request_body(content = Object, description = "Replacement fields; `_id` is ignored"),
    responses(
        (status = 200, description = "Updated document", body = DocumentSchema),
        (status = 400, description = "Invalid identifier or body", body = ErrorEnvelope),
        (status = 404, description = "Unknown resource or document", body = ErrorEnvelope),
        (status = 500, description = "Database failure", body = ErrorEnvelope)
    ),
    tags = ["documents"],
    operation_id = "replaceDocument"
)]
#[put("/{resource}/{id}")]
pub async fn replace_document(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: DocumentPayload,
) -> ApiResult<web::Json<Value>> {
    let (resource, id) = target(path.into_inner())?;
    let stored = state
        .documents
        .replace(resource, &id, payload.into_inner())
        .await?
        .ok_or_else(document_not_found)?;
    Ok(web::Json(stored.into_json()))
}

/// Delete a document.
#[utoipa::path(
    delete,
    path = "/api/v1/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Resource path segment"),
        ("id" = String, Path, description = "24 hex-digit document identifier"),
    ),
    responses(
        (status = 204, description = "Document removed"),
        (status = 400, description = "Invalid identifier", body = ErrorEnvelope),
        (status = 404, description = "Unknown resource or document", body = ErrorEnvelope),
        (status = 500, description = "Database failure", body = ErrorEnvelope)
    ),
    tags = ["documents"],
    operation_id = "deleteDocument"
)]
#[delete("/{resource}/{id}")]
pub async fn delete_document(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (resource, id) = target(path.into_inner())?;
    if state.documents.delete(resource, &id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(document_not_found())
    }
}
