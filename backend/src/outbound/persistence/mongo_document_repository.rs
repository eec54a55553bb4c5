//! MongoDB-backed implementation of [`DocumentRepository`].
//!
//! Each [`Resource`] maps to one collection. Every operation runs under the
//! configured socket timeout.

use std::future::Future;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::error::ErrorKind;
use mongodb::options::ReturnDocument;
use tracing::debug;

use super::bson_mapping::{from_bson, object_id, to_bson};
use super::mongo::MongoConnection;
use crate::domain::document::ID_FIELD;
use crate::domain::ports::{DocumentRepository, DocumentRepositoryError};
use crate::domain::{DocumentBody, DocumentId, Page, PageRequest, Resource, StoredDocument};

/// Map driver failures to port errors, logging the driver detail.
fn map_mongo_error(error: mongodb::error::Error) -> DocumentRepositoryError {
    debug!(error = %error, "mongodb operation failed");
    match error.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => {
            DocumentRepositoryError::connection(error.to_string())
        }
        _ => DocumentRepositoryError::query(error.to_string()),
    }
}

/// Document repository over a shared [`MongoConnection`].
#[derive(Clone)]
pub struct MongoDocumentRepository {
    connection: MongoConnection,
}

impl MongoDocumentRepository {
    /// Wrap an open connection.
    pub fn new(connection: MongoConnection) -> Self {
        Self { connection }
    }

    fn collection(&self, resource: Resource) -> Collection<Document> {
        self.connection
            .database()
            .collection::<Document>(resource.collection())
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, DocumentRepositoryError>
    where
        F: Future<Output = mongodb::error::Result<T>>,
    {
        let timeout = self.connection.socket_timeout();
        match tokio::time::timeout(timeout, operation).await {
            Ok(result) => result.map_err(map_mongo_error),
            Err(_) => Err(DocumentRepositoryError::timeout(
                u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }
}

#[async_trait]
impl DocumentRepository for MongoDocumentRepository {
    async fn list(
        &self,
        resource: Resource,
        page: PageRequest,
    ) -> Result<Page, DocumentRepositoryError> {
        let collection = self.collection(resource);
        let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
        let (total, documents) = self
            .bounded(async {
                let total = collection.count_documents(doc! {}).await?;
                let cursor = collection
                    .find(doc! {})
                    .sort(doc! { ID_FIELD: 1 })
                    .skip(page.skip())
                    .limit(limit)
                    .await?;
                let documents: Vec<Document> = cursor.try_collect().await?;
                Ok((total, documents))
            })
            .await?;

        let items = documents
            .into_iter()
            .map(from_bson)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page { items, total })
    }

    async fn get(
        &self,
        resource: Resource,
        id: &DocumentId,
    ) -> Result<Option<StoredDocument>, DocumentRepositoryError> {
        let oid = object_id(id)?;
        let collection = self.collection(resource);
        let found = self
            .bounded(async { collection.find_one(doc! { ID_FIELD: oid }).await })
            .await?;
        found.map(from_bson).transpose()
    }

    async fn create(
        &self,
        resource: Resource,
        body: DocumentBody,
    ) -> Result<StoredDocument, DocumentRepositoryError> {
        let oid = ObjectId::new();
        let document = to_bson(oid, &body)?;
        let collection = self.collection(resource);
        self.bounded(async { collection.insert_one(&document).await })
            .await?;

        let id = DocumentId::new(oid.to_hex())
            .map_err(|err| DocumentRepositoryError::mapping(err.to_string()))?;
        Ok(StoredDocument::new(id, body))
    }

    async fn replace(
        &self,
        resource: Resource,
        id: &DocumentId,
        body: DocumentBody,
    ) -> Result<Option<StoredDocument>, DocumentRepositoryError> {
        let oid = object_id(id)?;
        let replacement = to_bson(oid, &body)?;
        let collection = self.collection(resource);
        let updated = self
            .bounded(async {
                collection
                    .find_one_and_replace(doc! { ID_FIELD: oid }, &replacement)
                    .return_document(ReturnDocument::After)
                    .await
            })
            .await?;
        updated.map(from_bson).transpose()
    }

    async fn delete(
        &self,
        resource: Resource,
        id: &DocumentId,
    ) -> Result<bool, DocumentRepositoryError> {
        let oid = object_id(id)?;
        let collection = self.collection(resource);
        let result = self
            .bounded(async { collection.delete_one(doc! { ID_FIELD: oid }).await })
            .await?;
        Ok(result.deleted_count > 0)
    }
}
