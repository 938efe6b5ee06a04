//! In-memory document store.
//!
//! Backs tests and local runs without a database. All operations go through a
//! single async mutex, so each call (including `$inc`) is atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::{DocumentStore, InsertOutcome, UpdateOutcome};

/// Document store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Top-level equality match.
fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

fn check_filter(filter: &Document) -> StoreResult<()> {
    match filter.keys().find(|k| k.starts_with('$')) {
        Some(op) => Err(StoreError::unsupported(format!("filter operator {}", op))),
        None => Ok(()),
    }
}

fn as_i64(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        _ => None,
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(v) => Some(*v),
        other => as_i64(other).map(|v| v as f64),
    }
}

/// `$inc` semantics: a missing field takes the increment as its value.
fn increment(current: Option<&Bson>, by: &Bson) -> StoreResult<Bson> {
    if as_f64(by).is_none() {
        return Err(StoreError::unsupported(format!("$inc by non-numeric value {}", by)));
    }
    let Some(current) = current else {
        return Ok(by.clone());
    };

    match (current, by) {
        (Bson::Int32(a), Bson::Int32(b)) => Ok(a
            .checked_add(*b)
            .map(Bson::Int32)
            .unwrap_or_else(|| Bson::Int64(i64::from(*a) + i64::from(*b)))),
        _ => match (as_i64(current), as_i64(by)) {
            (Some(a), Some(b)) => Ok(Bson::Int64(a + b)),
            _ => match as_f64(current) {
                Some(a) => Ok(Bson::Double(a + as_f64(by).unwrap_or_default())),
                None => Err(StoreError::unsupported(format!(
                    "$inc on non-numeric value {}",
                    current
                ))),
            },
        },
    }
}

/// Apply an operator update to a copy of `document`. Returns the updated
/// document, or `None` when nothing changed.
fn apply_update(document: &Document, update: &Document) -> StoreResult<Option<Document>> {
    let mut updated = document.clone();
    let mut modified = false;

    for (op, operand) in update {
        let Bson::Document(fields) = operand else {
            return Err(StoreError::unsupported(format!("{} expects a document", op)));
        };
        match op.as_str() {
            "$set" => {
                for (key, value) in fields {
                    if updated.get(key) != Some(value) {
                        updated.insert(key.clone(), value.clone());
                        modified = true;
                    }
                }
            }
            "$inc" => {
                for (key, by) in fields {
                    let next = increment(updated.get(key), by)?;
                    if updated.get(key) != Some(&next) {
                        updated.insert(key.clone(), next);
                        modified = true;
                    }
                }
            }
            other => return Err(StoreError::unsupported(format!("update operator {}", other))),
        }
    }

    Ok(modified.then_some(updated))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> StoreResult<Vec<Document>> {
        check_filter(&filter)?;
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches(d, &filter)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, filter: Document) -> StoreResult<Option<Document>> {
        check_filter(&filter)?;
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> StoreResult<InsertOutcome> {
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }
        let inserted_id = document.get("_id").cloned().unwrap_or(Bson::Null);

        let mut collections = self.collections.lock().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|d| d.get("_id") == Some(&inserted_id)) {
            return Err(StoreError::unsupported(format!(
                "duplicate _id {} in {}",
                inserted_id, collection
            )));
        }
        docs.push(document);
        debug!(collection = %collection, id = %inserted_id, "Inserted document");

        Ok(InsertOutcome { inserted_id })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> StoreResult<UpdateOutcome> {
        check_filter(&filter)?;
        let mut collections = self.collections.lock().await;
        let Some(target) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches(d, &filter)))
        else {
            return Ok(UpdateOutcome::default());
        };

        let modified_count = match apply_update(target, &update)? {
            Some(updated) => {
                *target = updated;
                1
            }
            None => 0,
        };

        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count,
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
