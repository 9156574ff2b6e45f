use axum::http::StatusCode;

/// Handler for `GET /healthz`: liveness only. Never touches the database.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
