//! ContentMux Core - Usage accounting and tier gating
//!
//! Combines the static tier registry with per-user usage counts read from
//! storage to decide whether a user may create another content job.
//!
//! # Example
//!
//! ```rust,ignore
//! use contentmux_core::{BillingPeriod, Submission, UsageGuard};
//!
//! let guard = UsageGuard::new(Arc::new(repos.users), Arc::new(repos.usage));
//! let period = BillingPeriod::current();
//!
//! match guard.submit_job(&repos.jobs, &user_id, new_job, &period).await? {
//!     Submission::Created(created) => println!("{} jobs left", created.remaining),
//!     Submission::QuotaExceeded(check) => println!("upgrade to {:?}", check.suggested_tier),
//!     Submission::PlatformNotAvailable(denial) => println!("{:?}", denial.requested),
//! }
//! ```

pub mod error;
pub mod guard;
pub mod jobs;
pub mod period;

pub use error::CoreError;
pub use guard::{UsageGuard, JOB_METRIC};
pub use jobs::{advance_job, CreatedJob, NewJob, Submission};
pub use period::BillingPeriod;
