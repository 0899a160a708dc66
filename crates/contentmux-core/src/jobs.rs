//! Gated job creation and status transitions

use contentmux_db::{CreateJob, JobRepository, JobRow, UsageRepository, UserRepository};
use contentmux_types::{
    ContentKind, JobId, JobStatus, Platform, PlatformDenial, Remaining, Tier, UsageCheck, UserId,
};
use uuid::Uuid;

use crate::guard::{UsageGuard, JOB_METRIC};
use crate::{BillingPeriod, CoreError};

/// A content job as requested by a user, already validated
#[derive(Debug, Clone)]
pub struct NewJob {
    pub content_kind: ContentKind,
    pub source: String,
    /// Requested targets; empty selects every platform the tier allows
    pub platforms: Vec<Platform>,
}

/// Outcome of [`UsageGuard::submit_job`]
#[derive(Debug)]
pub enum Submission {
    /// Job stored and counted
    Created(CreatedJob),
    /// No capacity left in the billing period
    QuotaExceeded(UsageCheck),
    /// None of the requested platforms is in the tier
    PlatformNotAvailable(PlatformDenial),
}

/// A stored job with the usage it left behind
#[derive(Debug)]
pub struct CreatedJob {
    pub job: JobRow,
    pub tier: Tier,
    /// Jobs used in the period, including this one
    pub used: u64,
    pub remaining: Remaining,
    pub skipped: Vec<Platform>,
}

impl<U: UserRepository, R: UsageRepository> UsageGuard<U, R> {
    /// Gate, filter platforms, then store the job and its usage together.
    ///
    /// Denials are returned as [`Submission`] variants; only storage
    /// failures are errors, and a failed write leaves neither a job nor a
    /// usage increment behind.
    pub async fn submit_job<J: JobRepository>(
        &self,
        jobs: &J,
        user_id: &UserId,
        job: NewJob,
        period: &BillingPeriod,
    ) -> Result<Submission, CoreError> {
        let check = self.check(user_id, period).await?;

        if !check.allowed {
            tracing::info!(
                user_id = %user_id,
                tier = %check.tier,
                used = check.used,
                "Job rejected: quota exhausted"
            );
            return Ok(Submission::QuotaExceeded(check));
        }

        let tier = check.tier;
        let selection = tier.record().partition_platforms(&job.platforms);

        if selection.accepted.is_empty() {
            tracing::info!(
                user_id = %user_id,
                tier = %tier,
                requested = selection.skipped.len(),
                "Job rejected: no platform available on tier"
            );
            return Ok(Submission::PlatformNotAvailable(PlatformDenial::new(
                tier,
                selection.skipped,
            )));
        }

        let (row, total) = jobs
            .create_counted(
                CreateJob {
                    id: JobId::new().0,
                    user_id: user_id.0,
                    content_kind: job.content_kind.to_string(),
                    source: job.source,
                    platforms: to_strings(&selection.accepted),
                    skipped_platforms: to_strings(&selection.skipped),
                },
                JOB_METRIC,
                &period.key(),
            )
            .await?;

        let used = u64::try_from(total).map_err(|_| CoreError::InvalidUsageCount(total))?;
        let remaining = tier.job_quota().remaining(used);

        tracing::info!(
            job_id = %row.id,
            user_id = %user_id,
            tier = %tier,
            used,
            remaining = %remaining,
            skipped = selection.skipped.len(),
            "Content job created"
        );

        Ok(Submission::Created(CreatedJob {
            job: row,
            tier,
            used,
            remaining,
            skipped: selection.skipped,
        }))
    }
}

/// Move a job to `status` unless it already finished.
///
/// The finished check happens in the same statement as the write, so two
/// concurrent reports cannot both overwrite a final status.
pub async fn advance_job<J: JobRepository>(
    jobs: &J,
    job_id: Uuid,
    status: JobStatus,
) -> Result<JobRow, CoreError> {
    if let Some(row) = jobs.update_status(job_id, status.as_str()).await? {
        tracing::info!(job_id = %job_id, status = %status, "Job status updated");
        return Ok(row);
    }

    match jobs.find_by_id(job_id).await? {
        Some(row) => Err(CoreError::JobFinished(row.status)),
        None => Err(CoreError::JobNotFound),
    }
}

fn to_strings(platforms: &[Platform]) -> Vec<String> {
    platforms.iter().map(|p| p.as_str().to_string()).collect()
}
