//! Shared handler utilities
//!
//! Common validation, metrics, and helper functions used across handlers.

use std::time::Instant;

use contentmux_types::{ContentKind, Platform};

use crate::error::ApiError;

// ============================================================================
// Input Validation
// ============================================================================

/// Maximum length for media URLs
const MAX_MEDIA_URL_LEN: usize = 2_048;

/// Maximum number of platform entries in one request
const MAX_PLATFORM_ENTRIES: usize = 16;

/// Default page size for job history
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page size for job history
pub const MAX_PAGE_SIZE: i64 = 100;

/// Validate submitted content against its kind.
///
/// Text is checked for emptiness and length in characters. Audio and video
/// must be an `http(s)` URL pointing at uploaded media.
pub fn validate_source(
    kind: ContentKind,
    source: &str,
    max_chars: usize,
) -> Result<(), ApiError> {
    if source.trim().is_empty() {
        return Err(ApiError::BadRequest("Content cannot be empty".into()));
    }

    if kind.is_media() {
        return validate_media_url(source);
    }

    if source.chars().count() > max_chars {
        return Err(ApiError::BadRequest(format!(
            "Content too long (max {max_chars} characters)"
        )));
    }

    Ok(())
}

fn validate_media_url(url: &str) -> Result<(), ApiError> {
    if url.len() > MAX_MEDIA_URL_LEN {
        return Err(ApiError::BadRequest(format!(
            "Media URL too long (max {MAX_MEDIA_URL_LEN} chars)"
        )));
    }

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| ApiError::BadRequest("Media source must be an http(s) URL".into()))?;

    if rest.is_empty() || rest.starts_with('/') {
        return Err(ApiError::BadRequest("Media URL has no host".into()));
    }

    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ApiError::BadRequest(
            "Media URL contains whitespace or control characters".into(),
        ));
    }

    Ok(())
}

/// Parse requested platform identifiers, rejecting unknown ones
pub fn parse_platforms(requested: &[String]) -> Result<Vec<Platform>, ApiError> {
    if requested.len() > MAX_PLATFORM_ENTRIES {
        return Err(ApiError::BadRequest(format!(
            "Too many platforms (max {MAX_PLATFORM_ENTRIES})"
        )));
    }

    requested
        .iter()
        .map(|p| {
            p.parse()
                .map_err(|e: contentmux_types::PlatformParseError| ApiError::BadRequest(e.to_string()))
        })
        .collect()
}

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`
pub fn page_size(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

// ============================================================================
// Metrics Helpers
// ============================================================================

/// Record HTTP operation duration with result label.
///
/// Labels: operation, result (ok/err)
#[inline]
pub fn record_op_duration(operation: &'static str, start: Instant, success: bool) {
    let result = if success { "ok" } else { "err" };
    metrics::histogram!(
        "content_operation_duration_seconds",
        "operation" => operation,
        "result" => result
    )
    .record(start.elapsed().as_secs_f64());
}

/// Count a job request turned away by the gate
#[inline]
pub fn record_rejection(reason: &'static str) {
    metrics::counter!("content_jobs_rejected_total", "reason" => reason).increment(1);
}

// ============================================================================
// Tests
// ============================================================================
