//! Shared data models for the job portal backend.
//!
//! This crate provides Serde-serializable types for:
//! - Job postings
//! - Job applications and their status updates
//! - Store document identifiers
//! - Write acknowledgments returned to clients

pub mod ack;
pub mod application;
pub mod id;
pub mod job;

// Re-export common types
pub use ack::{InsertAck, UpdateAck};
pub use application::{Application, StatusUpdate};
pub use id::{DocumentId, InvalidDocumentId};
pub use job::Job;
