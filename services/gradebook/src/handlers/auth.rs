use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gradebook_auth_types::cookie::{clear_access_token_cookie, set_access_token_cookie};

use crate::domain::types::Teacher;
use crate::error::GradebookServiceError;
use crate::handlers::extract::AppJson;
use crate::state::AppState;
use crate::usecase::account::{
    LoginInput, LoginUseCase, RegisterTeacherInput, RegisterTeacherUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TeacherResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub assigned_class: u8,
    pub class_level: u8,
    #[serde(serialize_with = "gradebook_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Teacher> for TeacherResponse {
    fn from(t: Teacher) -> Self {
        Self {
            id: t.id,
            email: t.email,
            name: t.name,
            assigned_class: t.assigned_class.get(),
            class_level: t.assigned_class.level().as_u8(),
            created_at: t.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub access_token_exp: u64,
    pub teacher: TeacherResponse,
}

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub assigned_class: Option<i64>,
}

pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, GradebookServiceError> {
    let usecase = RegisterTeacherUseCase {
        repo: state.teacher_repo(),
        hasher: state.password_hasher(),
    };
    let teacher = usecase
        .execute(RegisterTeacherInput {
            email: body.email,
            password: body.password,
            name: body.name,
            assigned_class: body.assigned_class,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(TeacherResponse::from(teacher))))
}

// ── POST /auth/token ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn create_token(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, GradebookServiceError> {
    let usecase = LoginUseCase {
        repo: state.teacher_repo(),
        hasher: state.password_hasher(),
        jwt_secret: state.jwt_secret.as_str().to_owned(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_access_token_cookie(jar, out.access_token.clone(), state.cookie_secure);
    let body = TokenResponse {
        access_token: out.access_token,
        access_token_exp: out.access_token_exp,
        teacher: out.teacher.into(),
    };
    Ok((StatusCode::CREATED, jar, Json(body)))
}

// ── DELETE /auth/token ───────────────────────────────────────────────────────

pub async fn delete_token(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        clear_access_token_cookie(jar, state.cookie_secure),
    )
}
