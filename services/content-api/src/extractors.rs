//! Axum extractors for authentication
//!
//! Credentials are verified by the identity gateway in front of this service.
//! The gateway forwards the authenticated identity in trusted headers, which
//! must be stripped from client traffic before it reaches us.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use contentmux_types::{Role, UserId};

/// Authenticated user id
pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");
/// Role granted by the gateway (`admin` or `user`)
pub const USER_ROLE_HEADER: HeaderName = HeaderName::from_static("x-user-role");
/// Verified email address, if known
pub const USER_EMAIL_HEADER: HeaderName = HeaderName::from_static("x-user-email");

/// Authenticated user extracted from request
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: Option<String>,
    pub role: Role,
}

impl AuthUser {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Error response for auth failures
#[derive(Debug, Serialize)]
struct AuthErrorResponse {
    error: AuthErrorDetail,
}

#[derive(Debug, Serialize)]
struct AuthErrorDetail {
    code: &'static str,
    message: &'static str,
}

/// Auth rejection type
#[derive(Debug)]
pub struct AuthRejection {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = AuthErrorResponse {
            error: AuthErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_str(parts, &USER_ID_HEADER)?.ok_or(AuthRejection {
            status: StatusCode::UNAUTHORIZED,
            code: "MISSING_IDENTITY",
            message: "No authenticated user on request",
        })?;

        let user_id = UserId::parse(user_id.trim()).map_err(|_| AuthRejection {
            status: StatusCode::BAD_REQUEST,
            code: "INVALID_IDENTITY",
            message: "Authenticated user id is not a UUID",
        })?;

        let role = header_str(parts, &USER_ROLE_HEADER)?
            .map(Role::from_header)
            .unwrap_or(Role::User);

        let email = header_str(parts, &USER_EMAIL_HEADER)?
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        Ok(Self {
            user_id,
            email,
            role,
        })
    }
}

/// Read a header as UTF-8, rejecting non-visible-ASCII values
fn header_str<'a>(parts: &'a Parts, name: &HeaderName) -> Result<Option<&'a str>, AuthRejection> {
    parts
        .headers
        .get(name)
        .map(|value| {
            value.to_str().map_err(|_| AuthRejection {
                status: StatusCode::BAD_REQUEST,
                code: "INVALID_HEADER",
                message: "Identity header has invalid encoding",
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<AuthUser, AuthRejection> {
        let (mut parts, _) = request.into_parts();
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_user_and_role() {
        let id = UserId::new();
        let request = Request::builder()
            .header("x-user-id", id.to_string())
            .header("x-user-role", "admin")
            .header("x-user-email", " a@example.com ")
            .body(())
            .unwrap();

        let user = extract(request).await.unwrap();
        assert_eq!(user.user_id, id);
        assert!(user.is_admin());
        assert_eq!(user.email.as_deref(), Some("a@example.com"));
    }

    #[tokio::test]
    async fn test_role_defaults_to_user() {
        let request = Request::builder()
            .header("x-user-id", UserId::new().to_string())
            .body(())
            .unwrap();

        let user = extract(request).await.unwrap();
        assert!(!user.is_admin());
        assert!(user.email.is_none());
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let request = Request::builder().body(()).unwrap();
        let rejection = extract(request).await.unwrap_err();
        assert_eq!(rejection.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_identity_is_bad_request() {
        let request = Request::builder()
            .header("x-user-id", "not-a-uuid")
            .body(())
            .unwrap();
        let rejection = extract(request).await.unwrap_err();
        assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
        assert_eq!(rejection.code, "INVALID_IDENTITY");
    }
}
