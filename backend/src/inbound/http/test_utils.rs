//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::InMemoryDocumentRepository;
use crate::inbound::http::body::{form_config, json_config, query_config};
use crate::inbound::http::state::HttpState;

/// Body limit used by handler tests.
pub const TEST_BODY_LIMIT: usize = 4 * 1024;

/// HTTP state backed by a fresh in-memory repository.
pub fn in_memory_state() -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::new(InMemoryDocumentRepository::new())))
}

/// Register the extractor configurations the server installs.
pub fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config(TEST_BODY_LIMIT))
        .app_data(form_config(TEST_BODY_LIMIT))
        .app_data(query_config());
}
