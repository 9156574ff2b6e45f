use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gradebook_auth_types::identity::TeacherIdentity;

use crate::domain::types::Student;
use crate::error::GradebookServiceError;
use crate::handlers::extract::{AppJson, parse_path_id};
use crate::state::AppState;
use crate::usecase::student::{
    CreateStudentUseCase, DeleteStudentUseCase, ListStudentsUseCase, StudentInput,
    UpdateStudentUseCase,
};

#[derive(Serialize)]
pub struct StudentResponse {
    pub id: Uuid,
    pub name: String,
    pub nisn: Option<String>,
    pub class: u8,
    #[serde(serialize_with = "gradebook_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            name: s.name,
            nisn: s.nisn,
            class: s.class.get(),
            created_at: s.created_at,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct StudentRequest {
    pub name: Option<String>,
    pub nisn: Option<String>,
}

impl From<StudentRequest> for StudentInput {
    fn from(r: StudentRequest) -> Self {
        Self {
            name: r.name,
            nisn: r.nisn,
        }
    }
}

// ── GET /students ────────────────────────────────────────────────────────────

pub async fn get_students(
    identity: TeacherIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, GradebookServiceError> {
    let usecase = ListStudentsUseCase {
        repo: state.student_repo(),
    };
    let students = usecase
        .execute(identity.teacher_id, identity.assigned_class)
        .await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

// ── POST /students ───────────────────────────────────────────────────────────

pub async fn create_student(
    identity: TeacherIdentity,
    State(state): State<AppState>,
    AppJson(body): AppJson<StudentRequest>,
) -> Result<impl IntoResponse, GradebookServiceError> {
    let usecase = CreateStudentUseCase {
        repo: state.student_repo(),
    };
    let student = usecase
        .execute(identity.teacher_id, identity.assigned_class, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(StudentResponse::from(student))))
}

// ── PUT /students/{id} ───────────────────────────────────────────────────────

pub async fn update_student(
    identity: TeacherIdentity,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(body): AppJson<StudentRequest>,
) -> Result<Json<StudentResponse>, GradebookServiceError> {
    let student_id = parse_path_id(&raw_id, GradebookServiceError::StudentNotFound)?;
    let usecase = UpdateStudentUseCase {
        repo: state.student_repo(),
    };
    let student = usecase
        .execute(identity.teacher_id, student_id, body.into())
        .await?;
    Ok(Json(student.into()))
}

// ── DELETE /students/{id} ────────────────────────────────────────────────────

pub async fn delete_student(
    identity: TeacherIdentity,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, GradebookServiceError> {
    let student_id = parse_path_id(&raw_id, GradebookServiceError::StudentNotFound)?;
    let usecase = DeleteStudentUseCase {
        repo: state.student_repo(),
    };
    usecase.execute(identity.teacher_id, student_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
