use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use uuid::Uuid;

use crate::error::GradebookServiceError;

/// `axum::Json` whose rejections render as [`GradebookServiceError::InvalidBody`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(GradebookServiceError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for GradebookServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

/// Parse a `{id}` path segment. An id that is not a UUID names no record.
pub fn parse_path_id(
    raw: &str,
    not_found: GradebookServiceError,
) -> Result<Uuid, GradebookServiceError> {
    raw.trim().parse().map_err(|_| not_found)
}
