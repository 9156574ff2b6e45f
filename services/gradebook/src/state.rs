use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use gradebook_auth_types::identity::JwtSecret;

use crate::infra::db::{
    DbGradeRepository, DbStudentRepository, DbSubjectRepository, DbTeacherRepository,
};
use crate::infra::password::Argon2PasswordHasher;
use crate::infra::xlsx::XlsxExporter;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub cookie_secure: bool,
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}

impl AppState {
    pub fn teacher_repo(&self) -> DbTeacherRepository {
        DbTeacherRepository {
            db: self.db.clone(),
        }
    }

    pub fn student_repo(&self) -> DbStudentRepository {
        DbStudentRepository {
            db: self.db.clone(),
        }
    }

    pub fn subject_repo(&self) -> DbSubjectRepository {
        DbSubjectRepository {
            db: self.db.clone(),
        }
    }

    pub fn grade_repo(&self) -> DbGradeRepository {
        DbGradeRepository {
            db: self.db.clone(),
        }
    }

    pub fn password_hasher(&self) -> Argon2PasswordHasher {
        Argon2PasswordHasher
    }

    pub fn exporter(&self) -> XlsxExporter {
        XlsxExporter
    }
}
