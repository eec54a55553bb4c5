//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::DocumentRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Document persistence for every resource collection.
    pub documents: Arc<dyn DocumentRepository>,
}

impl HttpState {
    /// Construct state from the document repository port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use vendor_gateway::domain::ports::InMemoryDocumentRepository;
    /// use vendor_gateway::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryDocumentRepository::new()));
    /// let _documents = state.documents.clone();
    /// ```
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }
}
