//! Job application handlers.

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use jobboard_models::{Application, DocumentId, InsertAck, Job, StatusUpdate, UpdateAck};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Query parameters for the caller's own applications.
#[derive(Debug, Default, Deserialize)]
pub struct MyApplicationsQuery {
    /// Applicant email; must match the session identity
    pub email: Option<String>,
}

/// POST /job-applications
///
/// Stores the application, then bumps the job's `application_count` with
/// an atomic store-side increment. An application for a job that does not
/// exist is still stored.
pub async fn submit_application(
    State(state): State<AppState>,
    payload: Result<Json<Application>, JsonRejection>,
) -> ApiResult<Json<InsertAck>> {
    let Json(mut application) = payload?;
    let job_id = application
        .job_id()
        .ok_or_else(|| ApiError::bad_request("job_id is required"))?;
    let job_id = DocumentId::parse(job_id)?;
    application.set_job_id(&job_id);

    let ack = state.applications.create(&application).await?;
    metrics::record_application_submitted();

    let counter = state.jobs.increment_application_count(&job_id).await?;
    if counter.matched_count == 0 {
        warn!(
            job_id = %job_id,
            application_id = %ack.inserted_id,
            "Application references a missing job, count not updated"
        );
    }

    Ok(Json(ack))
}

/// GET /job-applications/jobs/:job_id
pub async fn list_job_applications(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<Vec<Application>>> {
    Ok(Json(state.applications.list_for_job(&job_id).await?))
}

/// GET /job-applications?email=
///
/// Requires a session whose identity equals `email`. Each application is
/// returned with the listing fields of its job, when that job still exists.
///
/// Returns:
/// - 200: the caller's applications
/// - 401: no valid session
/// - 403: `email` names someone else
pub async fn list_my_applications(
    State(state): State<AppState>,
    user: AuthUser,
    query: Result<Query<MyApplicationsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Application>>> {
    let Query(query) = query?;
    user.ensure_identity(query.email.as_deref())?;

    let mut applications = state.applications.list_for_applicant(&user.email).await?;

    let mut job_cache: HashMap<DocumentId, Option<Job>> = HashMap::new();
    for application in &mut applications {
        let Some(job_id) = application
            .job_id()
            .and_then(|id| DocumentId::parse(id).ok())
        else {
            continue;
        };

        if !job_cache.contains_key(&job_id) {
            let job = state.jobs.get(&job_id).await?;
            job_cache.insert(job_id.clone(), job);
        }
        if let Some(Some(job)) = job_cache.get(&job_id) {
            application.denormalize(job);
        }
    }

    Ok(Json(applications))
}

/// PATCH /job-applications/:id
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> ApiResult<Json<UpdateAck>> {
    let id = DocumentId::parse(&id)?;
    let Json(update) = payload?;

    let ack = state.applications.update_status(&id, &update.status).await?;
    info!(
        application_id = %id,
        status = %update.status,
        matched = ack.matched_count,
        "Updated application status"
    );
    Ok(Json(ack))
}
