//! Write acknowledgments.
//!
//! These mirror the result documents the store driver reports for single
//! inserts and updates; handlers return them to clients unchanged.

use serde::{Deserialize, Serialize};

/// Acknowledgment of a single-document insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    /// Hex id assigned by the store
    pub inserted_id: String,
}

impl InsertAck {
    pub fn new(inserted_id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: inserted_id.into(),
        }
    }
}

/// Acknowledgment of a single-document update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
}

impl UpdateAck {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_id: None,
            upserted_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_ack_wire_shape() {
        let value = serde_json::to_value(UpdateAck::new(1, 0)).unwrap();
        assert_eq!(
            value,
            json!({
                "acknowledged": true,
                "matchedCount": 1,
                "modifiedCount": 0,
                "upsertedId": null,
                "upsertedCount": 0
            })
        );
    }

    #[test]
    fn test_insert_ack_wire_shape() {
        let value = serde_json::to_value(InsertAck::new("65f1a2b3c4d5e6f708192a3b")).unwrap();
        assert_eq!(value["acknowledged"], json!(true));
        assert_eq!(value["insertedId"], json!("65f1a2b3c4d5e6f708192a3b"));
    }
}
