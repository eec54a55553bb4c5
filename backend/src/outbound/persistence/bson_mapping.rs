//! Conversions between JSON document bodies and BSON.
//!
//! Bodies are stored as they arrive. On the way out, `_id` is flattened to
//! its hex string and every other value uses relaxed extended JSON
//! (dates as `{"$date": ...}`, nested ObjectIds as `{"$oid": ...}`).

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document};
use serde_json::Value;

use crate::domain::document::ID_FIELD;
use crate::domain::ports::DocumentRepositoryError;
use crate::domain::{DocumentBody, DocumentId, StoredDocument};

/// Parse a domain identifier into an ObjectId.
pub(crate) fn object_id(id: &DocumentId) -> Result<ObjectId, DocumentRepositoryError> {
    ObjectId::parse_str(id.as_str())
        .map_err(|err| DocumentRepositoryError::mapping(err.to_string()))
}

/// BSON document for `body`, with `_id` set to `id`.
pub(crate) fn to_bson(
    id: ObjectId,
    body: &DocumentBody,
) -> Result<Document, DocumentRepositoryError> {
    let mut document = bson::to_document(body.fields())
        .map_err(|err| DocumentRepositoryError::unstorable(err.to_string()))?;
    document.insert(ID_FIELD, id);
    Ok(document)
}

/// Domain document for a stored BSON document.
pub(crate) fn from_bson(mut document: Document) -> Result<StoredDocument, DocumentRepositoryError> {
    let id = match document.remove(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => DocumentId::new(oid.to_hex())
            .map_err(|err| DocumentRepositoryError::mapping(err.to_string()))?,
        Some(other) => {
            return Err(DocumentRepositoryError::mapping(format!(
                "expected ObjectId in {ID_FIELD}, found {:?}",
                other.element_type()
            )));
        }
        None => return Err(DocumentRepositoryError::mapping(format!("missing {ID_FIELD}"))),
    };
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(fields) => Ok(StoredDocument::new(id, DocumentBody::new(fields))),
        _ => Err(DocumentRepositoryError::mapping("document did not map to a JSON object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use rstest::rstest;
    use serde_json::json;

    const HEX: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

    fn oid() -> ObjectId {
        ObjectId::parse_str(HEX).expect("valid object id")
    }

    #[rstest]
    fn to_bson_sets_identifier_and_keeps_fields() {
        let body = DocumentBody::try_from(json!({ "name": "Acme", "active": true }))
            .expect("object body");

        let document = to_bson(oid(), &body).expect("maps to bson");

        assert_eq!(document.get_object_id(ID_FIELD).expect("object id"), oid());
        assert_eq!(document.get_str("name").expect("name"), "Acme");
        assert!(document.get_bool("active").expect("active"));
    }

    #[rstest]
    fn to_bson_rejects_integers_beyond_i64() {
        let body = DocumentBody::try_from(json!({ "serial": u64::MAX })).expect("object body");

        let err = to_bson(oid(), &body).expect_err("u64 beyond i64 range");

        assert!(matches!(err, DocumentRepositoryError::Unstorable { .. }), "{err:?}");
    }

    #[rstest]
    fn from_bson_flattens_identifier() {
        let stored = from_bson(doc! { "_id": oid(), "name": "Acme", "count": 3_i64 })
            .expect("maps from bson");

        assert_eq!(stored.id().as_str(), HEX);
        assert_eq!(
            stored.into_json(),
            json!({ "_id": HEX, "name": "Acme", "count": 3 })
        );
    }

    #[rstest]
    fn from_bson_rejects_non_object_id_keys() {
        let err = from_bson(doc! { "_id": "legacy-key" }).expect_err("string id rejected");
        assert!(matches!(err, DocumentRepositoryError::Mapping { .. }));
    }

    #[rstest]
    fn from_bson_rejects_missing_identifier() {
        let err = from_bson(doc! { "name": "Acme" }).expect_err("id required");
        assert!(err.to_string().contains("missing _id"));
    }
}
