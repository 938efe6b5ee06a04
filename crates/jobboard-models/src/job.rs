//! Job postings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Posting fields copied onto an application when its applicant lists it.
pub const LISTING_FIELDS: [&str; 6] = [
    "title",
    "location",
    "jobType",
    "company",
    "category",
    "company_logo",
];

/// A job posting.
///
/// Postings are schema-less: whatever object a client posts is stored and
/// returned as-is, field types included. `hr_email` names the owning HR
/// contact and `application_count` counts submissions (absent means zero).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Job(Map<String, Value>);

impl Job {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}
