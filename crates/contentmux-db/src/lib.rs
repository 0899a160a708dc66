//! ContentMux DB - Database abstractions
//!
//! SQLx-based database layer for ContentMux services.
//!
//! # Example
//!
//! ```rust,ignore
//! use contentmux_db::{create_pool, Repositories, UsageRepository};
//!
//! let pool = create_pool("postgres://localhost/contentmux").await?;
//! let repos = Repositories::new(pool);
//!
//! let used = repos.usage.get_count(user_id, "content_jobs", "2026-10").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, run_migrations, DbPool};
pub use repo::*;
