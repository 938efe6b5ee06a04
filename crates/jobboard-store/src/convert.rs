//! Conversions between typed models and store documents.
//!
//! Models carry their id as a hex string under `_id`. On the way in the id is
//! dropped (the store assigns one); on the way out ObjectIds are rendered as
//! hex and the rest of the document goes through relaxed extended JSON.

use jobboard_models::DocumentId;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc, Bson, Document};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

/// Serialize a model into a document ready for insertion.
pub fn to_document<T: Serialize>(value: &T) -> StoreResult<Document> {
    let mut document = bson::to_document(value).map_err(StoreError::serialization)?;
    document.remove("_id");
    Ok(document)
}

/// Deserialize a stored document into a model.
pub fn from_document<T: DeserializeOwned>(mut document: Document) -> StoreResult<T> {
    let hex = match document.get("_id") {
        Some(Bson::ObjectId(oid)) => Some(oid.to_hex()),
        _ => None,
    };
    if let Some(hex) = hex {
        document.insert("_id", hex);
    }

    let value = Bson::Document(document).into_relaxed_extjson();
    serde_json::from_value(value).map_err(StoreError::serialization)
}

/// Store ObjectId for a validated document id.
pub fn object_id(id: &DocumentId) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id.as_str()).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Filter matching a single document by id.
pub fn id_filter(id: &DocumentId) -> StoreResult<Document> {
    Ok(doc! { "_id": object_id(id)? })
}
