//! Error types for the Content API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use contentmux_core::CoreError;
use contentmux_types::{PlatformDenial, UsageCheck};

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Job not found")]
    JobNotFound,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Monthly job limit reached for the {} tier", .0.tier)]
    QuotaExceeded(UsageCheck),

    #[error("None of the requested platforms are available on the {} tier", .0.tier)]
    PlatformNotAvailable(PlatformDenial),

    #[error("Database error")]
    Database(#[from] contentmux_db::DbError),

    #[error("Usage error")]
    Core(#[from] CoreError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::JobNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden(_) | Self::QuotaExceeded(_) | Self::PlatformNotAvailable(_) => {
                StatusCode::FORBIDDEN
            }
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Core(CoreError::JobFinished(_)) => StatusCode::CONFLICT,
            Self::Database(contentmux_db::DbError::NotFound) => StatusCode::NOT_FOUND,
            Self::Core(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::JobNotFound => "JOB_NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::QuotaExceeded(_) => "QUOTA_EXCEEDED",
            Self::PlatformNotAvailable(_) => "PLATFORM_NOT_AVAILABLE",
            Self::Core(CoreError::JobFinished(_)) => "JOB_FINISHED",
            Self::Core(CoreError::JobNotFound) => "JOB_NOT_FOUND",
            Self::Core(CoreError::UserNotFound) => "USER_NOT_FOUND",
            Self::Database(contentmux_db::DbError::NotFound)
            | Self::Core(CoreError::Database(contentmux_db::DbError::NotFound)) => "NOT_FOUND",
            Self::Database(_) | Self::Core(_) => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message; storage failures stay opaque
    fn message(&self) -> String {
        match self {
            Self::Core(e) if !self.status_code().is_server_error() => e.to_string(),
            _ => self.to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::QuotaExceeded(check) => serde_json::to_value(check).ok(),
            Self::PlatformNotAvailable(denial) => serde_json::to_value(denial).ok(),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(error = ?self, "Internal API error");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.message(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use contentmux_types::{Platform, Tier};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_quota_exceeded_requires_upgrade() {
        let check = UsageCheck::evaluate(Tier::Basic, 20);
        let response = ApiError::QuotaExceeded(check).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "QUOTA_EXCEEDED");
        assert_eq!(json["error"]["details"]["requiresUpgrade"], true);
        assert_eq!(json["error"]["details"]["remaining"], 0);
        assert_eq!(json["error"]["details"]["suggestedTier"], "pro");
    }

    #[tokio::test]
    async fn test_platform_denial_details() {
        let denial = PlatformDenial::new(Tier::Trial, vec![Platform::TikTok]);
        let response = ApiError::PlatformNotAvailable(denial).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "PLATFORM_NOT_AVAILABLE");
        assert_eq!(json["error"]["details"]["requested"][0], "tiktok");
        assert_eq!(json["error"]["details"]["suggestedTier"], "business");
    }

    #[test]
    fn test_not_found_mapping() {
        let err = ApiError::from(CoreError::UserNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "USER_NOT_FOUND");

        let err = ApiError::from(contentmux_db::DbError::NotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ApiError::from(CoreError::JobNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "JOB_NOT_FOUND");

        let err = ApiError::from(CoreError::InvalidUsageCount(-1));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_finished_job_is_conflict() {
        let err = ApiError::from(CoreError::JobFinished("completed".into()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "JOB_FINISHED");
        assert_eq!(err.message(), "content job is already completed");

        let err = ApiError::from(CoreError::InvalidUsageCount(-1));
        assert_eq!(err.message(), "Usage error");
    }

    #[test]
    fn test_bad_request_has_no_details() {
        let err = ApiError::BadRequest("nope".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.details().is_none());
    }
}
