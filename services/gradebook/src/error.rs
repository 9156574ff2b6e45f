use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Gradebook service error variants.
#[derive(Debug, thiserror::Error)]
pub enum GradebookServiceError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("class must be between 1 and 6")]
    InvalidClass,
    #[error("score must be between 0 and {max_score}")]
    ScoreOutOfRange { max_score: f64 },
    #[error("subject does not match the student's class")]
    SubjectClassMismatch,
    #[error("nisn already used")]
    NisnAlreadyUsed,
    #[error("email already used")]
    EmailAlreadyUsed,
    #[error("class already assigned to another teacher")]
    ClassAlreadyAssigned,
    #[error("student not found")]
    StudentNotFound,
    #[error("grade not found")]
    GradeNotFound,
    #[error("teacher not found")]
    TeacherNotFound,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl GradebookServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::InvalidClass => "INVALID_CLASS",
            Self::ScoreOutOfRange { .. } => "SCORE_OUT_OF_RANGE",
            Self::SubjectClassMismatch => "SUBJECT_CLASS_MISMATCH",
            Self::NisnAlreadyUsed => "NISN_ALREADY_USED",
            Self::EmailAlreadyUsed => "EMAIL_ALREADY_USED",
            Self::ClassAlreadyAssigned => "CLASS_ALREADY_ASSIGNED",
            Self::StudentNotFound => "STUDENT_NOT_FOUND",
            Self::GradeNotFound => "GRADE_NOT_FOUND",
            Self::TeacherNotFound => "TEACHER_NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<gradebook_domain::score::ScoreError> for GradebookServiceError {
    fn from(err: gradebook_domain::score::ScoreError) -> Self {
        use gradebook_domain::score::ScoreError;
        match err {
            ScoreError::OutOfRange { max_score } => Self::ScoreOutOfRange { max_score },
            ScoreError::NotFinite => Self::MissingField("score"),
        }
    }
}

impl IntoResponse for GradebookServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingField(_)
            | Self::InvalidBody(_)
            | Self::InvalidClass
            | Self::ScoreOutOfRange { .. }
            | Self::SubjectClassMismatch => StatusCode::BAD_REQUEST,
            Self::NisnAlreadyUsed | Self::EmailAlreadyUsed | Self::ClassAlreadyAssigned => {
                StatusCode::CONFLICT
            }
            Self::StudentNotFound | Self::GradeNotFound | Self::TeacherNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "error": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
