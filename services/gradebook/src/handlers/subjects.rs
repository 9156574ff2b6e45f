use axum::{Json, extract::State};
use serde::Serialize;

use gradebook_auth_types::identity::TeacherIdentity;

use crate::domain::types::Subject;
use crate::error::GradebookServiceError;
use crate::state::AppState;
use crate::usecase::subject::ListSubjectsUseCase;

#[derive(Serialize)]
pub struct SubjectResponse {
    pub id: String,
    pub name: String,
    pub class_level: u8,
}

impl From<Subject> for SubjectResponse {
    fn from(s: Subject) -> Self {
        Self {
            id: s.id,
            name: s.name,
            class_level: s.class_level.as_u8(),
        }
    }
}

// ── GET /subjects ────────────────────────────────────────────────────────────

pub async fn get_subjects(
    identity: TeacherIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<SubjectResponse>>, GradebookServiceError> {
    let usecase = ListSubjectsUseCase {
        repo: state.subject_repo(),
    };
    let subjects = usecase.execute(identity.assigned_class).await?;
    Ok(Json(subjects.into_iter().map(Into::into).collect()))
}
