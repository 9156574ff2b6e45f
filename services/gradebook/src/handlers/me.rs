use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;

use gradebook_auth_types::cookie::clear_access_token_cookie;
use gradebook_auth_types::identity::TeacherIdentity;

use crate::error::GradebookServiceError;
use crate::handlers::auth::TeacherResponse;
use crate::state::AppState;
use crate::usecase::account::{DeleteAccountUseCase, GetMeUseCase};

// ── GET /me ──────────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: TeacherIdentity,
    State(state): State<AppState>,
) -> Result<Json<TeacherResponse>, GradebookServiceError> {
    let usecase = GetMeUseCase {
        repo: state.teacher_repo(),
    };
    let teacher = usecase.execute(identity.teacher_id).await?;
    Ok(Json(teacher.into()))
}

// ── DELETE /me ───────────────────────────────────────────────────────────────

pub async fn delete_me(
    identity: TeacherIdentity,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, GradebookServiceError> {
    let usecase = DeleteAccountUseCase {
        repo: state.teacher_repo(),
    };
    usecase.execute(identity.teacher_id).await?;
    Ok((
        StatusCode::NO_CONTENT,
        clear_access_token_cookie(jar, state.cookie_secure),
    ))
}
