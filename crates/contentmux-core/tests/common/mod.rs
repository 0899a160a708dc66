//! Common test utilities for contentmux-core integration tests

pub mod mock_repos;

#[allow(unused_imports)]
pub use mock_repos::{MockJobRepository, MockUsageRepository, MockUserRepository};
