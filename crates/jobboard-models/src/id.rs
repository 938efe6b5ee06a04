//! Store-assigned document identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a hex-encoded document id (12 bytes).
pub const DOCUMENT_ID_LEN: usize = 24;

/// Returned when a string does not have the shape of a document id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid document id: {0:?}")]
pub struct InvalidDocumentId(pub String);

/// A store-assigned document id, held in its canonical 24-char lowercase hex form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Validate and normalize a client-supplied id.
    pub fn parse(s: &str) -> Result<Self, InvalidDocumentId> {
        let trimmed = s.trim();
        if trimmed.len() != DOCUMENT_ID_LEN || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidDocumentId(s.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Get the hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = InvalidDocumentId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}
