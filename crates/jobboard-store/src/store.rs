//! The document store abstraction.

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use crate::error::StoreResult;

/// Collection names.
pub mod collections {
    pub const JOBS: &str = "jobs";
    pub const APPLICATIONS: &str = "job_applications";
}

/// Result of a single-document insert.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertOutcome {
    pub inserted_id: Bson,
}

impl InsertOutcome {
    /// The inserted id as a client-facing string (hex for ObjectIds).
    pub fn id_string(&self) -> String {
        match &self.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            Bson::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Result of a single-document update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Schema-less persistence queried by filter documents.
///
/// Filters are equality matches on top-level fields; updates use operator
/// documents (`$set`, `$inc`). Collections are created on first write.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in `collection` matching `filter`.
    async fn find(&self, collection: &str, filter: Document) -> StoreResult<Vec<Document>>;

    /// The first document in `collection` matching `filter`.
    async fn find_one(&self, collection: &str, filter: Document) -> StoreResult<Option<Document>>;

    /// Insert `document`, assigning an `_id` when it has none.
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<InsertOutcome>;

    /// Apply `update` to the first document matching `filter`.
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> StoreResult<UpdateOutcome>;

    /// Check that the store is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
