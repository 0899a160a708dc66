//! REST API handlers

pub mod health;
pub mod jobs;
pub mod shared;
pub mod tiers;
pub mod usage;
pub mod users;

pub use health::*;
pub use jobs::*;
pub use tiers::*;
pub use usage::*;
pub use users::*;
