//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod document_repository;

pub use document_repository::{
    DocumentRepository, DocumentRepositoryError, InMemoryDocumentRepository,
};
