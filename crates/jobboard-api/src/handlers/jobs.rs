//! Job posting handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use jobboard_models::{DocumentId, InsertAck, Job};

use crate::error::ApiResult;
use crate::state::AppState;

/// Query parameters for the job list.
#[derive(Debug, Default, Deserialize)]
pub struct ListJobsQuery {
    /// Only postings owned by this HR email
    pub email: Option<String>,
}

/// GET /jobs?email=
pub async fn list_jobs(
    State(state): State<AppState>,
    query: Result<Query<ListJobsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Job>>> {
    let Query(query) = query?;
    let hr_email = query.email.as_deref().filter(|e| !e.is_empty());
    Ok(Json(state.jobs.list(hr_email).await?))
}

/// GET /jobs/:id
///
/// Returns `null` when no posting has this id; a malformed id is a 400.
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<Job>>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.jobs.get(&id).await?))
}

/// POST /jobs
pub async fn create_job(
    State(state): State<AppState>,
    payload: Result<Json<Job>, JsonRejection>,
) -> ApiResult<Json<InsertAck>> {
    let Json(job) = payload?;
    Ok(Json(state.jobs.create(&job).await?))
}
