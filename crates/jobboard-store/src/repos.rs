//! Typed repositories for jobs and job applications.

use std::sync::Arc;

use mongodb::bson::doc;
use tracing::info;

use jobboard_models::{Application, DocumentId, InsertAck, Job, UpdateAck};

use crate::convert::{from_document, id_filter, to_document};
use crate::error::StoreResult;
use crate::store::{collections, DocumentStore};

/// Repository for job postings.
#[derive(Clone)]
pub struct JobRepository {
    store: Arc<dyn DocumentStore>,
}

impl JobRepository {
    /// Create a new job repository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// List postings, optionally only those owned by `hr_email`.
    pub async fn list(&self, hr_email: Option<&str>) -> StoreResult<Vec<Job>> {
        let filter = match hr_email {
            Some(email) => doc! { "hr_email": email },
            None => doc! {},
        };

        self.store
            .find(collections::JOBS, filter)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    /// Get a posting by id.
    pub async fn get(&self, id: &DocumentId) -> StoreResult<Option<Job>> {
        match self.store.find_one(collections::JOBS, id_filter(id)?).await? {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Store a new posting as submitted.
    pub async fn create(&self, job: &Job) -> StoreResult<InsertAck> {
        let outcome = self
            .store
            .insert_one(collections::JOBS, to_document(job)?)
            .await?;
        info!("Created job posting: {}", outcome.id_string());
        Ok(InsertAck::new(outcome.id_string()))
    }

    /// Atomically add one to the posting's application counter.
    ///
    /// A missing counter starts at 1. `matched_count` is 0 when the posting
    /// does not exist.
    pub async fn increment_application_count(&self, id: &DocumentId) -> StoreResult<UpdateAck> {
        let outcome = self
            .store
            .update_one(
                collections::JOBS,
                id_filter(id)?,
                doc! { "$inc": { "application_count": 1 } },
            )
            .await?;
        Ok(UpdateAck::new(outcome.matched_count, outcome.modified_count))
    }
}

/// Repository for job applications.
#[derive(Clone)]
pub struct ApplicationRepository {
    store: Arc<dyn DocumentStore>,
}

impl ApplicationRepository {
    /// Create a new application repository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Store a new application as submitted.
    pub async fn create(&self, application: &Application) -> StoreResult<InsertAck> {
        let outcome = self
            .store
            .insert_one(collections::APPLICATIONS, to_document(application)?)
            .await?;
        info!("Created job application: {}", outcome.id_string());
        Ok(InsertAck::new(outcome.id_string()))
    }

    /// All applications for the job with hex id `job_id`.
    pub async fn list_for_job(&self, job_id: &str) -> StoreResult<Vec<Application>> {
        self.find(doc! { "job_id": job_id }).await
    }

    /// All applications submitted by `email`.
    pub async fn list_for_applicant(&self, email: &str) -> StoreResult<Vec<Application>> {
        self.find(doc! { "applicant_email": email }).await
    }

    /// Set the review status of an application.
    pub async fn update_status(&self, id: &DocumentId, status: &str) -> StoreResult<UpdateAck> {
        let outcome = self
            .store
            .update_one(
                collections::APPLICATIONS,
                id_filter(id)?,
                doc! { "$set": { "status": status } },
            )
            .await?;
        Ok(UpdateAck::new(outcome.matched_count, outcome.modified_count))
    }

    async fn find(&self, filter: mongodb::bson::Document) -> StoreResult<Vec<Application>> {
        self.store
            .find(collections::APPLICATIONS, filter)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }
}
