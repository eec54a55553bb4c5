//! MongoDB persistence adapters.
//!
//! # Architecture
//!
//! - **Thin adapters**: [`MongoDocumentRepository`] only translates between
//!   BSON documents and domain types.
//! - **Internal mapping**: BSON conversions (`bson_mapping.rs`) never leak to
//!   the domain layer.
//! - **Bounded retries**: [`connect_with_retry`] probes the server a fixed
//!   number of times before giving up; [`watch_connection`] starts a fresh
//!   round whenever a later ping fails.
//!
//! # Example
//!
//! ```no_run
//! use vendor_gateway::outbound::persistence::{
//!     MongoConfig, MongoConnection, MongoDocumentRepository, RetryPolicy, connect_with_retry,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MongoConfig::new("mongodb://localhost:27017", "vendors");
//! let connection = MongoConnection::open(&config).await?;
//! connect_with_retry(&connection, RetryPolicy::default()).await?;
//! let repo = MongoDocumentRepository::new(connection);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod bson_mapping;
mod mongo;
mod mongo_document_repository;
mod retry;

pub use mongo::{ConnectionProbe, MongoConfig, MongoConnection, MongoError};
pub use mongo_document_repository::MongoDocumentRepository;
pub use retry::{RetryPolicy, WATCH_INTERVAL, connect_with_retry, watch_connection};
