use chrono::Utc;
use uuid::Uuid;

use gradebook_auth_types::cookie::ACCESS_TOKEN_EXP;
use gradebook_auth_types::token::issue_access_token;
use gradebook_domain::class::ClassNumber;

use crate::domain::repository::{PasswordHasherPort, TeacherRepository};
use crate::domain::types::Teacher;
use crate::error::GradebookServiceError;

fn required(value: Option<String>, field: &'static str) -> Result<String, GradebookServiceError> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(GradebookServiceError::MissingField(field))
}

// ── RegisterTeacher ──────────────────────────────────────────────────────────

pub struct RegisterTeacherInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub assigned_class: Option<i64>,
}

pub struct RegisterTeacherUseCase<R: TeacherRepository, H: PasswordHasherPort> {
    pub repo: R,
    pub hasher: H,
}

impl<R: TeacherRepository, H: PasswordHasherPort> RegisterTeacherUseCase<R, H> {
    pub async fn execute(
        &self,
        input: RegisterTeacherInput,
    ) -> Result<Teacher, GradebookServiceError> {
        let email = required(input.email, "email")?;
        // Passwords are taken verbatim; only emptiness is checked.
        let password = input
            .password
            .filter(|p| !p.is_empty())
            .ok_or(GradebookServiceError::MissingField("password"))?;
        let name = required(input.name, "name")?;
        let assigned_class = input
            .assigned_class
            .ok_or(GradebookServiceError::MissingField("assigned_class"))?;
        let assigned_class =
            ClassNumber::try_from(assigned_class).map_err(|_| GradebookServiceError::InvalidClass)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(GradebookServiceError::EmailAlreadyUsed);
        }
        if self.repo.find_by_class(assigned_class).await?.is_some() {
            return Err(GradebookServiceError::ClassAlreadyAssigned);
        }

        let teacher = Teacher {
            id: Uuid::now_v7(),
            email,
            name,
            password_hash: self.hasher.hash(&password).await?,
            assigned_class,
            created_at: Utc::now(),
        };
        self.repo.create(&teacher).await?;

        tracing::info!(teacher_id = %teacher.id, class = %assigned_class, "teacher registered");
        Ok(teacher)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub teacher: Teacher,
    pub access_token: String,
    pub access_token_exp: u64,
}

pub struct LoginUseCase<R: TeacherRepository, H: PasswordHasherPort> {
    pub repo: R,
    pub hasher: H,
    pub jwt_secret: String,
}

impl<R: TeacherRepository, H: PasswordHasherPort> LoginUseCase<R, H> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, GradebookServiceError> {
        let email = required(input.email, "email")?;
        let password = input
            .password
            .filter(|p| !p.is_empty())
            .ok_or(GradebookServiceError::MissingField("password"))?;

        // Unknown emails still pay for one hash check.
        let Some(teacher) = self.repo.find_by_email(&email).await? else {
            self.hasher.verify_absent(&password).await?;
            return Err(GradebookServiceError::InvalidCredentials);
        };

        if !self.hasher.verify(&password, &teacher.password_hash).await? {
            return Err(GradebookServiceError::InvalidCredentials);
        }

        let (access_token, access_token_exp) = issue_access_token(
            teacher.id,
            teacher.assigned_class,
            &self.jwt_secret,
            ACCESS_TOKEN_EXP,
        )
        .map_err(|e| GradebookServiceError::Internal(e.into()))?;

        Ok(LoginOutput {
            teacher,
            access_token,
            access_token_exp,
        })
    }
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<R: TeacherRepository> {
    pub repo: R,
}

impl<R: TeacherRepository> GetMeUseCase<R> {
    pub async fn execute(&self, teacher_id: Uuid) -> Result<Teacher, GradebookServiceError> {
        self.repo
            .find_by_id(teacher_id)
            .await?
            .ok_or(GradebookServiceError::TeacherNotFound)
    }
}

// ── DeleteAccount ────────────────────────────────────────────────────────────

pub struct DeleteAccountUseCase<R: TeacherRepository> {
    pub repo: R,
}

impl<R: TeacherRepository> DeleteAccountUseCase<R> {
    pub async fn execute(&self, teacher_id: Uuid) -> Result<(), GradebookServiceError> {
        if !self.repo.delete_cascade(teacher_id).await? {
            return Err(GradebookServiceError::TeacherNotFound);
        }
        tracing::info!(%teacher_id, "teacher account deleted");
        Ok(())
    }
}
