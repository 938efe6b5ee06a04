//! Job applications.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::DocumentId;
use crate::job::{Job, LISTING_FIELDS};

/// An application submitted by a candidate for a job.
///
/// Stored as the client sent it. `job_id` holds the hex id of the job and
/// `applicant_email` the candidate; the listing fields of the job are not
/// stored but copied in when an applicant lists their own applications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Application(Map<String, Value>);

impl Application {
    /// Hex id of the job applied for, when it is a string.
    pub fn job_id(&self) -> Option<&str> {
        self.0.get("job_id").and_then(Value::as_str)
    }

    /// Replace `job_id` with its canonical form.
    pub fn set_job_id(&mut self, job_id: &DocumentId) {
        self.0
            .insert("job_id".to_string(), Value::String(job_id.to_string()));
    }

    /// Copy the listing fields of `job` onto this application, as they are
    /// on the job. Fields the job lacks are left unset.
    pub fn denormalize(&mut self, job: &Job) {
        for field in LISTING_FIELDS {
            match job.get(field) {
                Some(value) => {
                    self.0.insert(field.to_string(), value.clone());
                }
                None => {
                    self.0.remove(field);
                }
            }
        }
    }
}

/// Body of a status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}
