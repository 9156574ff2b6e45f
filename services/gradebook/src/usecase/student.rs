use chrono::Utc;
use uuid::Uuid;

use gradebook_domain::class::ClassNumber;

use crate::domain::ownership::ensure_owned;
use crate::domain::repository::StudentRepository;
use crate::domain::types::{Student, normalize_nisn};
use crate::error::GradebookServiceError;

pub struct StudentInput {
    pub name: Option<String>,
    pub nisn: Option<String>,
}

impl StudentInput {
    /// Trimmed non-empty name plus normalized NISN.
    fn normalized(&self) -> Result<(String, Option<String>), GradebookServiceError> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(GradebookServiceError::MissingField("name"))?;
        Ok((name.to_owned(), normalize_nisn(self.nisn.as_deref())))
    }
}

// ── ListStudents ─────────────────────────────────────────────────────────────

pub struct ListStudentsUseCase<R: StudentRepository> {
    pub repo: R,
}

impl<R: StudentRepository> ListStudentsUseCase<R> {
    pub async fn execute(
        &self,
        teacher_id: Uuid,
        assigned_class: ClassNumber,
    ) -> Result<Vec<Student>, GradebookServiceError> {
        self.repo.list(teacher_id, assigned_class).await
    }
}

// ── CreateStudent ────────────────────────────────────────────────────────────

pub struct CreateStudentUseCase<R: StudentRepository> {
    pub repo: R,
}

impl<R: StudentRepository> CreateStudentUseCase<R> {
    pub async fn execute(
        &self,
        teacher_id: Uuid,
        assigned_class: ClassNumber,
        input: StudentInput,
    ) -> Result<Student, GradebookServiceError> {
        let (name, nisn) = input.normalized()?;

        if let Some(nisn) = nisn.as_deref() {
            if self.repo.find_by_nisn(nisn).await?.is_some() {
                return Err(GradebookServiceError::NisnAlreadyUsed);
            }
        }

        let student = Student {
            id: Uuid::now_v7(),
            name,
            nisn,
            class: assigned_class,
            teacher_id,
            created_at: Utc::now(),
        };
        self.repo.create(&student).await?;
        Ok(student)
    }
}

// ── UpdateStudent ────────────────────────────────────────────────────────────

pub struct UpdateStudentUseCase<R: StudentRepository> {
    pub repo: R,
}

impl<R: StudentRepository> UpdateStudentUseCase<R> {
    pub async fn execute(
        &self,
        teacher_id: Uuid,
        student_id: Uuid,
        input: StudentInput,
    ) -> Result<Student, GradebookServiceError> {
        let (name, nisn) = input.normalized()?;

        let found = self.repo.find_by_id(student_id).await?;
        ensure_owned(found, teacher_id, GradebookServiceError::StudentNotFound)?;

        if let Some(nisn) = nisn.as_deref() {
            if let Some(holder) = self.repo.find_by_nisn(nisn).await? {
                if holder.id != student_id {
                    return Err(GradebookServiceError::NisnAlreadyUsed);
                }
            }
        }

        self.repo.update(student_id, &name, nisn.as_deref()).await
    }
}

// ── DeleteStudent ────────────────────────────────────────────────────────────

pub struct DeleteStudentUseCase<R: StudentRepository> {
    pub repo: R,
}

impl<R: StudentRepository> DeleteStudentUseCase<R> {
    pub async fn execute(
        &self,
        teacher_id: Uuid,
        student_id: Uuid,
    ) -> Result<(), GradebookServiceError> {
        let found = self.repo.find_by_id(student_id).await?;
        ensure_owned(found, teacher_id, GradebookServiceError::StudentNotFound)?;
        self.repo.delete(student_id).await
    }
}
