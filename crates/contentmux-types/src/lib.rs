//! ContentMux Types - Shared domain types
//!
//! This crate contains domain types used across ContentMux services:
//! - Subscription tiers and the static tier registry
//! - Target platforms for repurposed content
//! - Job quotas and the usage gate
//! - User and content job identifiers

pub mod error;
pub mod job;
pub mod platform;
pub mod quota;
pub mod tier;
pub mod user;

pub use error::*;
pub use job::*;
pub use platform::*;
pub use quota::*;
pub use tier::*;
pub use user::*;
