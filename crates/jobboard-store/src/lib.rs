//! Document store client.
//!
//! This crate provides:
//! - The `DocumentStore` abstraction (find / find-one / insert-one / update-one)
//! - A MongoDB implementation with tracing spans and metrics
//! - An in-memory implementation for tests and local runs
//! - Typed repositories for jobs and job applications

pub mod client;
pub mod convert;
pub mod error;
pub mod memory;
pub mod metrics;
pub mod repos;
pub mod store;

pub use client::{MongoStore, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use repos::{ApplicationRepository, JobRepository};
pub use store::{collections, DocumentStore, InsertOutcome, UpdateOutcome};

pub use mongodb::bson;
pub use mongodb::bson::Document;
