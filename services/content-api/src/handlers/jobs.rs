//! Content job handlers
//!
//! Creating a job is the only gated operation. A created job is stored as
//! `pending`; transcription and generation are done by an external worker,
//! which reports progress through the status endpoint.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::instrument;
use uuid::Uuid;

use contentmux_core::{advance_job, BillingPeriod, CreatedJob, NewJob, Submission};
use contentmux_db::{JobRepository, JobRow};
use contentmux_types::{ContentKind, JobId, JobStatus, Platform, Remaining};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::handlers::shared::{
    page_size, parse_platforms, record_op_duration, record_rejection, validate_source,
};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub content_kind: ContentKind,
    /// Inline text, or a media URL for audio and video
    pub source: String,
    /// Target platforms; empty selects every platform the tier can access
    #[serde(default)]
    pub platforms: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobResponse {
    pub job: JobResponse,
    pub used: u64,
    /// `null` when unlimited
    pub remaining: Remaining,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: JobId,
    pub content_kind: Option<ContentKind>,
    pub source: String,
    pub platforms: Vec<Platform>,
    pub skipped_platforms: Vec<Platform>,
    pub status: Option<JobStatus>,
    pub created_at: DateTime<Utc>,
}

impl From<CreatedJob> for CreateJobResponse {
    fn from(created: CreatedJob) -> Self {
        Self {
            job: JobResponse::from(created.job),
            used: created.used,
            remaining: created.remaining,
        }
    }
}

impl From<JobRow> for JobResponse {
    fn from(row: JobRow) -> Self {
        Self {
            id: row.job_id(),
            content_kind: row.kind(),
            platforms: row.target_platforms(),
            skipped_platforms: row.skipped(),
            status: row.job_status(),
            created_at: row.created_at,
            source: row.source,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ListJobsResponse {
    pub jobs: Vec<JobResponse>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobStatusRequest {
    pub status: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/jobs
#[instrument(
    skip(state, auth, req),
    fields(user_id = %auth.user_id, content_kind = %req.content_kind)
)]
pub async fn create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateJobRequest>,
) -> ApiResult<(StatusCode, Json<CreateJobResponse>)> {
    let start = Instant::now();

    validate_source(req.content_kind, &req.source, state.config.max_content_chars)?;
    let platforms = parse_platforms(&req.platforms)?;

    state
        .guard
        .ensure_user(&auth.user_id, auth.email.as_deref())
        .await?;

    let submission = state
        .guard
        .submit_job(
            &state.repos.jobs,
            &auth.user_id,
            NewJob {
                content_kind: req.content_kind,
                source: req.source,
                platforms,
            },
            &BillingPeriod::current(),
        )
        .await?;

    let created = match accept_submission(submission) {
        Ok(created) => created,
        Err(e) => {
            record_op_duration("create_job", start, false);
            return Err(e);
        }
    };

    metrics::counter!("content_jobs_created_total", "tier" => created.tier.as_str()).increment(1);
    record_op_duration("create_job", start, true);

    Ok((StatusCode::CREATED, Json(CreateJobResponse::from(created))))
}

/// Turn a gate denial into its 403 response
fn accept_submission(submission: Submission) -> ApiResult<CreatedJob> {
    match submission {
        Submission::Created(created) => Ok(created),
        Submission::QuotaExceeded(check) => {
            record_rejection("quota");
            Err(ApiError::QuotaExceeded(check))
        }
        Submission::PlatformNotAvailable(denial) => {
            record_rejection("platform");
            Err(ApiError::PlatformNotAvailable(denial))
        }
    }
}

/// GET /api/v1/jobs
#[instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn list_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListJobsQuery>,
) -> ApiResult<Json<ListJobsResponse>> {
    let start = Instant::now();

    let rows = state
        .repos
        .jobs
        .find_by_user_id(auth.user_id.0, page_size(query.limit))
        .await?;

    record_op_duration("list_jobs", start, true);

    Ok(Json(ListJobsResponse {
        jobs: rows.into_iter().map(JobResponse::from).collect(),
    }))
}

/// GET /api/v1/jobs/{id}
#[instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn get_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<JobResponse>> {
    let row = state
        .repos
        .jobs
        .find_by_id(job_id)
        .await?
        .ok_or(ApiError::JobNotFound)?;

    // Other users' jobs are reported as missing
    if row.user_id != auth.user_id.0 && !auth.is_admin() {
        return Err(ApiError::JobNotFound);
    }

    Ok(Json(JobResponse::from(row)))
}

/// PATCH /api/v1/jobs/{id}/status (admin only, used by the generation worker)
#[instrument(skip(state, auth, req), fields(user_id = %auth.user_id))]
pub async fn update_job_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
    Json(req): Json<UpdateJobStatusRequest>,
) -> ApiResult<Json<JobResponse>> {
    if !auth.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let status: JobStatus = req
        .status
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid status: {}", req.status)))?;

    let row = advance_job(&state.repos.jobs, job_id, status).await?;

    Ok(Json(JobResponse::from(row)))
}
