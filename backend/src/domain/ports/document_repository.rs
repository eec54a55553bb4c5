//! Port for document persistence.
//!
//! HTTP handlers depend on this trait only. Production wires the MongoDB
//! adapter; tests use [`InMemoryDocumentRepository`].

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{DocumentBody, DocumentId, Page, PageRequest, Resource, StoredDocument};

define_port_error! {
    /// Errors raised by document persistence adapters.
    pub enum DocumentRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "document store connection failed: {message}",
        /// The operation exceeded the socket timeout.
        Timeout { millis: u64 } => "document store operation timed out after {millis} ms",
        /// The store rejected or failed the operation.
        Query { message: String } => "document store query failed: {message}",
        /// A stored document could not be converted to JSON.
        Mapping { message: String } => "stored document could not be mapped: {message}",
        /// The store cannot represent a submitted body.
        Unstorable { message: String } => "document body cannot be stored: {message}",
    }
}

/// CRUD operations over one resource collection at a time.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Documents in `page`, ordered by identifier, plus the collection total.
    async fn list(
        &self,
        resource: Resource,
        page: PageRequest,
    ) -> Result<Page, DocumentRepositoryError>;

    /// Fetch one document.
    async fn get(
        &self,
        resource: Resource,
        id: &DocumentId,
    ) -> Result<Option<StoredDocument>, DocumentRepositoryError>;

    /// Insert a document under a freshly allocated identifier.
    async fn create(
        &self,
        resource: Resource,
        body: DocumentBody,
    ) -> Result<StoredDocument, DocumentRepositoryError>;

    /// Replace a document's fields. Returns `None` when it does not exist.
    async fn replace(
        &self,
        resource: Resource,
        id: &DocumentId,
        body: DocumentBody,
    ) -> Result<Option<StoredDocument>, DocumentRepositoryError>;

    /// Remove a document. Returns whether anything was deleted.
    async fn delete(
        &self,
        resource: Resource,
        id: &DocumentId,
    ) -> Result<bool, DocumentRepositoryError>;
}

type Collections = HashMap<Resource, BTreeMap<DocumentId, DocumentBody>>;

/// Process-local repository backing tests and database-less runs.
///
/// Identifiers are allocated from a counter, so they sort in insertion order
/// like ObjectIds do.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    collections: Mutex<Collections>,
    next_id: AtomicU64,
}

impl InMemoryDocumentRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> Result<DocumentId, DocumentRepositoryError> {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        DocumentId::new(format!("{n:024x}"))
            .map_err(|err| DocumentRepositoryError::mapping(err.to_string()))
    }

    fn with_collections<T>(
        &self,
        f: impl FnOnce(&mut Collections) -> T,
    ) -> Result<T, DocumentRepositoryError> {
        let mut guard = self
            .collections
            .lock()
            .map_err(|_| DocumentRepositoryError::query("in-memory store lock poisoned"))?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn list(
        &self,
        resource: Resource,
        page: PageRequest,
    ) -> Result<Page, DocumentRepositoryError> {
        self.with_collections(|collections| {
            let Some(documents) = collections.get(&resource) else {
                return Page {
                    items: Vec::new(),
                    total: 0,
                };
            };
            let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
            let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
            let items = documents
                .iter()
                .skip(skip)
                .take(limit)
                .map(|(id, body)| StoredDocument::new(id.clone(), body.clone()))
                .collect();
            Page {
                items,
                total: documents.len() as u64,
            }
        })
    }

    async fn get(
        &self,
        resource: Resource,
        id: &DocumentId,
    ) -> Result<Option<StoredDocument>, DocumentRepositoryError> {
        self.with_collections(|collections| {
            collections
                .get(&resource)
                .and_then(|documents| documents.get(id))
                .map(|body| StoredDocument::new(id.clone(), body.clone()))
        })
    }

    async fn create(
        &self,
        resource: Resource,
        body: DocumentBody,
    ) -> Result<StoredDocument, DocumentRepositoryError> {
        let id = self.allocate_id()?;
        self.with_collections(|collections| {
            collections
                .entry(resource)
                .or_default()
                .insert(id.clone(), body.clone());
        })?;
        Ok(StoredDocument::new(id, body))
    }

    async fn replace(
        &self,
        resource: Resource,
        id: &DocumentId,
        body: DocumentBody,
    ) -> Result<Option<StoredDocument>, DocumentRepositoryError> {
        self.with_collections(|collections| {
            let slot = collections
                .get_mut(&resource)
                .and_then(|documents| documents.get_mut(id))?;
            *slot = body.clone();
            Some(StoredDocument::new(id.clone(), body))
        })
    }

    async fn delete(
        &self,
        resource: Resource,
        id: &DocumentId,
    ) -> Result<bool, DocumentRepositoryError> {
        self.with_collections(|collections| {
            collections
                .get_mut(&resource)
                .is_some_and(|documents| documents.remove(id).is_some())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn repository() -> InMemoryDocumentRepository {
        InMemoryDocumentRepository::new()
    }

    fn body(name: &str) -> DocumentBody {
        DocumentBody::try_from(json!({ "name": name })).expect("object body")
    }

    #[rstest]
    #[tokio::test]
    async fn create_then_get_returns_the_document(repository: InMemoryDocumentRepository) {
        let created = repository
            .create(Resource::Vendors, body("Acme"))
            .await
            .expect("create succeeds");

        let fetched = repository
            .get(Resource::Vendors, created.id())
            .await
            .expect("get succeeds");
        assert_eq!(fetched, Some(created));
    }

    #[rstest]
    #[tokio::test]
    async fn collections_are_isolated_per_resource(repository: InMemoryDocumentRepository) {
        let created = repository
            .create(Resource::Vendors, body("Acme"))
            .await
            .expect("create succeeds");

        let other = repository
            .get(Resource::Contracts, created.id())
            .await
            .expect("get succeeds");
        assert!(other.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn list_pages_in_identifier_order(repository: InMemoryDocumentRepository) {
        for name in ["a", "b", "c"] {
            repository
                .create(Resource::Regions, body(name))
                .await
                .expect("create succeeds");
        }

        let page = repository
            .list(Resource::Regions, PageRequest::new(Some(1), Some(1)).expect("window"))
            .await
            .expect("list succeeds");

        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].body(), &body("b"));
    }

    #[rstest]
    #[tokio::test]
    async fn replace_and_delete_report_missing_documents(repository: InMemoryDocumentRepository) {
        let missing = DocumentId::new("ffffffffffffffffffffffff").expect("valid id");

        let replaced = repository
            .replace(Resource::States, &missing, body("x"))
            .await
            .expect("replace succeeds");
        let deleted = repository
            .delete(Resource::States, &missing)
            .await
            .expect("delete succeeds");

        assert!(replaced.is_none());
        assert!(!deleted);
    }

    #[rstest]
    #[tokio::test]
    async fn replace_overwrites_fields(repository: InMemoryDocumentRepository) {
        let created = repository
            .create(Resource::States, body("old"))
            .await
            .expect("create succeeds");

        let replaced = repository
            .replace(Resource::States, created.id(), body("new"))
            .await
            .expect("replace succeeds")
            .expect("document exists");

        assert_eq!(replaced.body(), &body("new"));
        assert!(repository
            .delete(Resource::States, created.id())
            .await
            .expect("delete succeeds"));
    }
}
