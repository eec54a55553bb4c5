//! Opaque JSON documents and the paging window used to list them.
//!
//! The gateway does not own resource schemas. A document body is any JSON
//! object; the only field the gateway interprets is `_id`.

use serde_json::{Map, Value};

/// Field holding the document identifier.
pub const ID_FIELD: &str = "_id";

/// Default number of documents returned by a list call.
pub const DEFAULT_LIMIT: u64 = 50;

/// Upper bound applied to caller-supplied limits.
pub const MAX_LIMIT: u64 = 500;

const ID_LEN: usize = 24;

/// Validation failures for document primitives.
///
/// Messages follow the `"field" must ...` wording clients already parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentValidationError {
    /// Identifier is not 24 hexadecimal digits.
    #[error("\"id\" must be a valid 24 character hex string")]
    InvalidId,
    /// Body is not a JSON object.
    #[error("\"value\" must be of type object")]
    NotAnObject,
    /// A zero limit was requested.
    #[error("\"limit\" must be greater than or equal to 1")]
    ZeroLimit,
}

/// Document identifier, a 24 hex-digit ObjectId.
///
/// ## Invariants
/// - exactly 24 ASCII hex digits, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    /// Validate and normalise an identifier.
    ///
    /// # Examples
    /// ```
    /// use vendor_gateway::domain::DocumentId;
    ///
    /// let id = DocumentId::new("65A1F0C2E4B0A1B2C3D4E5F6").expect("valid id");
    /// assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
    /// assert!(DocumentId::new("nope").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DocumentValidationError> {
        let raw = raw.as_ref();
        if raw.len() != ID_LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DocumentValidationError::InvalidId);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Hex representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client-supplied document fields, never containing `_id`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentBody(Map<String, Value>);

impl DocumentBody {
    /// Wrap an object, dropping any client-supplied `_id`.
    #[must_use]
    pub fn new(mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_FIELD);
        Self(fields)
    }

    /// Borrow the fields.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take ownership of the fields.
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Value> for DocumentBody {
    type Error = DocumentValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self::new(fields)),
            _ => Err(DocumentValidationError::NotAnObject),
        }
    }
}

/// A persisted document.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    id: DocumentId,
    body: DocumentBody,
}

impl StoredDocument {
    /// Pair an identifier with its body.
    #[must_use]
    pub fn new(id: DocumentId, body: DocumentBody) -> Self {
        Self { id, body }
    }

    /// Document identifier.
    #[must_use]
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Document fields without `_id`.
    #[must_use]
    pub fn body(&self) -> &DocumentBody {
        &self.body
    }

    /// JSON object with `_id` rendered as a hex string.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use vendor_gateway::domain::{DocumentBody, DocumentId, StoredDocument};
    ///
    /// let id = DocumentId::new("000000000000000000000001").expect("valid id");
    /// let body = DocumentBody::try_from(json!({ "name": "Acme" })).expect("object");
    /// let json = StoredDocument::new(id, body).into_json();
    /// assert_eq!(json, json!({ "_id": "000000000000000000000001", "name": "Acme" }));
    /// ```
    #[must_use]
    pub fn into_json(self) -> Value {
        let mut fields = self.body.into_fields();
        fields.insert(ID_FIELD.to_owned(), Value::String(self.id.0));
        Value::Object(fields)
    }
}

/// Window into a collection, ordered by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    skip: u64,
    limit: u64,
}

impl PageRequest {
    /// Build a window from optional query values.
    ///
    /// Missing values take defaults; limits above [`MAX_LIMIT`] are clamped.
    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Result<Self, DocumentValidationError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 {
            return Err(DocumentValidationError::ZeroLimit);
        }
        Ok(Self {
            skip: skip.unwrap_or(0),
            limit: limit.min(MAX_LIMIT),
        })
    }

    /// Documents to skip.
    #[must_use]
    pub fn skip(&self) -> u64 {
        self.skip
    }

    /// Maximum documents to return.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of documents plus the collection total.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Documents in the window.
    pub items: Vec<StoredDocument>,
    /// Documents in the whole collection.
    pub total: u64,
}
