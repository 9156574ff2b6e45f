//! Authenticated-teacher extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use http::request::Parts;
use http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use uuid::Uuid;

use gradebook_domain::class::ClassNumber;

use crate::cookie::ACCESS_TOKEN_COOKIE;
use crate::token::{AuthError, validate_access_token};

/// HMAC secret used to verify access tokens. Exposed to the extractor via `FromRef`.
#[derive(Clone)]
pub struct JwtSecret(Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The calling teacher: `{teacher_id, assigned_class}` taken from a valid access token.
///
/// The token is read from `Authorization: Bearer <jwt>` first, then from the
/// access-token cookie. Missing or invalid tokens are rejected with 401.
#[derive(Debug, Clone)]
pub struct TeacherIdentity {
    pub teacher_id: Uuid,
    pub assigned_class: ClassNumber,
}

/// Why identity extraction failed. Always rendered as 401.
#[derive(Debug, thiserror::Error)]
pub enum IdentityRejection {
    #[error("missing access token")]
    MissingToken,
    #[error("invalid access token: {0}")]
    InvalidToken(#[from] AuthError),
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self, "rejected request identity");
        let body = serde_json::json!({
            "kind": "UNAUTHORIZED",
            "error": "unauthorized",
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|t| !t.is_empty())
}

impl<S> FromRequestParts<S> for TeacherIdentity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = IdentityRejection;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract values synchronously and return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let token = bearer_token(&parts.headers).or_else(|| cookie_token(&parts.headers));

        async move {
            let token = token.ok_or(IdentityRejection::MissingToken)?;
            let info = validate_access_token(&token, secret.as_str())?;
            Ok(Self {
                teacher_id: info.teacher_id,
                assigned_class: info.assigned_class,
            })
        }
    }
}
