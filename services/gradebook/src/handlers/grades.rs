use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gradebook_auth_types::identity::TeacherIdentity;
use gradebook_domain::score::{percentage, round_one_decimal};

use crate::domain::types::{BulkOutcome, Grade, GradeEntry, GradeFilter};
use crate::error::GradebookServiceError;
use crate::handlers::extract::{AppJson, parse_path_id};
use crate::state::AppState;
use crate::usecase::grade::{
    BulkCreateGradesInput, BulkCreateGradesUseCase, CreateGradeInput, CreateGradeUseCase,
    DeleteGradeUseCase, ListGradesUseCase, UpdateGradeInput, UpdateGradeUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct GradeResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub subject_id: String,
    pub task_name: String,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    #[serde(serialize_with = "gradebook_core::serde::to_rfc3339_ms")]
    pub date: DateTime<Utc>,
}

impl From<Grade> for GradeResponse {
    fn from(g: Grade) -> Self {
        Self {
            percentage: round_one_decimal(percentage(g.score, g.max_score)),
            id: g.id,
            student_id: g.student_id,
            subject_id: g.subject_id,
            task_name: g.task_name,
            score: g.score,
            max_score: g.max_score,
            date: g.date,
        }
    }
}

#[derive(Serialize)]
pub struct GradeEntryResponse {
    #[serde(flatten)]
    pub grade: GradeResponse,
    pub student_name: String,
    pub student_nisn: Option<String>,
    pub subject_name: String,
}

impl From<GradeEntry> for GradeEntryResponse {
    fn from(e: GradeEntry) -> Self {
        Self {
            grade: e.grade.into(),
            student_name: e.student_name,
            student_nisn: e.student_nisn,
            subject_name: e.subject_name,
        }
    }
}

#[derive(Serialize)]
pub struct BulkResponse {
    pub success_count: usize,
    pub error_count: usize,
}

impl From<BulkOutcome> for BulkResponse {
    fn from(o: BulkOutcome) -> Self {
        Self {
            success_count: o.success_count,
            error_count: o.error_count,
        }
    }
}

// ── GET /grades ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct GradeListQuery {
    pub student_id: Option<String>,
    pub subject_id: Option<String>,
}

pub async fn get_grades(
    identity: TeacherIdentity,
    State(state): State<AppState>,
    Query(query): Query<GradeListQuery>,
) -> Result<Json<Vec<GradeEntryResponse>>, GradebookServiceError> {
    let student_id = match query.student_id.as_deref().map(str::trim) {
        None | Some("") => None,
        // An id that cannot exist matches nothing.
        Some(raw) => match raw.parse::<Uuid>() {
            Ok(id) => Some(id),
            Err(_) => return Ok(Json(Vec::new())),
        },
    };
    let subject_id = query
        .subject_id
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty());

    let usecase = ListGradesUseCase {
        repo: state.grade_repo(),
    };
    let entries = usecase
        .execute(
            identity.teacher_id,
            GradeFilter {
                student_id,
                subject_id,
            },
        )
        .await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

// ── POST /grades ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreateGradeRequest {
    pub student_id: Option<Uuid>,
    pub subject_id: Option<String>,
    pub task_name: Option<String>,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
}

pub async fn create_grade(
    identity: TeacherIdentity,
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateGradeRequest>,
) -> Result<impl IntoResponse, GradebookServiceError> {
    let usecase = CreateGradeUseCase {
        students: state.student_repo(),
        subjects: state.subject_repo(),
        grades: state.grade_repo(),
    };
    let grade = usecase
        .execute(
            identity.teacher_id,
            CreateGradeInput {
                student_id: body.student_id,
                subject_id: body.subject_id,
                task_name: body.task_name,
                score: body.score,
                max_score: body.max_score,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(GradeResponse::from(grade))))
}

// ── POST /grades/bulk ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct BulkCreateGradesRequest {
    pub subject_id: Option<String>,
    pub task_name: Option<String>,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
}

pub async fn create_grades_bulk(
    identity: TeacherIdentity,
    State(state): State<AppState>,
    AppJson(body): AppJson<BulkCreateGradesRequest>,
) -> Result<Json<BulkResponse>, GradebookServiceError> {
    let usecase = BulkCreateGradesUseCase {
        create: CreateGradeUseCase {
            students: state.student_repo(),
            subjects: state.subject_repo(),
            grades: state.grade_repo(),
        },
    };
    let outcome = usecase
        .execute(
            identity.teacher_id,
            identity.assigned_class,
            BulkCreateGradesInput {
                subject_id: body.subject_id,
                task_name: body.task_name,
                score: body.score,
                max_score: body.max_score,
            },
        )
        .await?;
    Ok(Json(outcome.into()))
}

// ── PUT /grades/{id} ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateGradeRequest {
    pub task_name: Option<String>,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
}

pub async fn update_grade(
    identity: TeacherIdentity,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(body): AppJson<UpdateGradeRequest>,
) -> Result<Json<GradeResponse>, GradebookServiceError> {
    let grade_id = parse_path_id(&raw_id, GradebookServiceError::GradeNotFound)?;
    let usecase = UpdateGradeUseCase {
        repo: state.grade_repo(),
    };
    let grade = usecase
        .execute(
            identity.teacher_id,
            grade_id,
            UpdateGradeInput {
                task_name: body.task_name,
                score: body.score,
                max_score: body.max_score,
            },
        )
        .await?;
    Ok(Json(grade.into()))
}

// ── DELETE /grades/{id} ──────────────────────────────────────────────────────

pub async fn delete_grade(
    identity: TeacherIdentity,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, GradebookServiceError> {
    let grade_id = parse_path_id(&raw_id, GradebookServiceError::GradeNotFound)?;
    let usecase = DeleteGradeUseCase {
        repo: state.grade_repo(),
    };
    usecase.execute(identity.teacher_id, grade_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
