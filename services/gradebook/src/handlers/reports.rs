use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::IntoResponse,
};

use gradebook_auth_types::identity::TeacherIdentity;

use crate::domain::report::Report;
use crate::error::GradebookServiceError;
use crate::state::AppState;
use crate::usecase::report::{ExportReportUseCase, GetReportUseCase};

// ── GET /reports/summary ─────────────────────────────────────────────────────

pub async fn get_report_summary(
    identity: TeacherIdentity,
    State(state): State<AppState>,
) -> Result<Json<Report>, GradebookServiceError> {
    let usecase = GetReportUseCase {
        students: state.student_repo(),
        subjects: state.subject_repo(),
        grades: state.grade_repo(),
    };
    let report = usecase
        .execute(identity.teacher_id, identity.assigned_class)
        .await?;
    Ok(Json(report))
}

// ── GET /reports/export ──────────────────────────────────────────────────────

pub async fn export_report(
    identity: TeacherIdentity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GradebookServiceError> {
    let usecase = ExportReportUseCase {
        teachers: state.teacher_repo(),
        report: GetReportUseCase {
            students: state.student_repo(),
            subjects: state.subject_repo(),
            grades: state.grade_repo(),
        },
        exporter: state.exporter(),
    };
    let file = usecase
        .execute(identity.teacher_id, identity.assigned_class)
        .await?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        file.filename
    ))
    .map_err(|e| GradebookServiceError::Internal(e.into()))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(file.content_type),
    );
    headers.insert(header::CONTENT_DISPOSITION, disposition);

    tracing::info!(
        teacher_id = %identity.teacher_id,
        filename = %file.filename,
        bytes = file.bytes.len(),
        "report exported"
    );
    Ok((headers, file.bytes))
}
