use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

// ── GET /readyz ──────────────────────────────────────────────────────────────

/// Ready once the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
