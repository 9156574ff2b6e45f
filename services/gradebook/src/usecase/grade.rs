use chrono::Utc;
use uuid::Uuid;

use gradebook_domain::class::ClassNumber;
use gradebook_domain::score::{DEFAULT_MAX_SCORE, validate_score};

use crate::domain::ownership::ensure_owned;
use crate::domain::repository::{GradeRepository, StudentRepository, SubjectRepository};
use crate::domain::types::{BulkOutcome, Grade, GradeEntry, GradeFilter};
use crate::error::GradebookServiceError;

/// Presence checks first, then range. Returns `(task_name, score, max_score)`.
fn validate_grade_fields(
    task_name: Option<&str>,
    score: Option<f64>,
    max_score: Option<f64>,
) -> Result<(String, f64, f64), GradebookServiceError> {
    let task_name = task_name
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(GradebookServiceError::MissingField("task_name"))?;
    let score = score.ok_or(GradebookServiceError::MissingField("score"))?;
    let max_score = max_score.unwrap_or(DEFAULT_MAX_SCORE);
    validate_score(score, max_score)?;
    Ok((task_name.to_owned(), score, max_score))
}

fn required_subject_id(subject_id: Option<&str>) -> Result<&str, GradebookServiceError> {
    subject_id
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(GradebookServiceError::MissingField("subject_id"))
}

// ── CreateGrade ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct CreateGradeInput {
    pub student_id: Option<Uuid>,
    pub subject_id: Option<String>,
    pub task_name: Option<String>,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
}

pub struct CreateGradeUseCase<S, J, G>
where
    S: StudentRepository,
    J: SubjectRepository,
    G: GradeRepository,
{
    pub students: S,
    pub subjects: J,
    pub grades: G,
}

impl<S, J, G> CreateGradeUseCase<S, J, G>
where
    S: StudentRepository,
    J: SubjectRepository,
    G: GradeRepository,
{
    pub async fn execute(
        &self,
        teacher_id: Uuid,
        input: CreateGradeInput,
    ) -> Result<Grade, GradebookServiceError> {
        let student_id = input
            .student_id
            .ok_or(GradebookServiceError::MissingField("student_id"))?;
        let subject_id = required_subject_id(input.subject_id.as_deref())?;
        let (task_name, score, max_score) =
            validate_grade_fields(input.task_name.as_deref(), input.score, input.max_score)?;

        let student = ensure_owned(
            self.students.find_by_id(student_id).await?,
            teacher_id,
            GradebookServiceError::StudentNotFound,
        )?;

        // Unknown subjects fail the same way as subjects from the other band.
        let subject = self
            .subjects
            .find_by_id(subject_id)
            .await?
            .filter(|s| s.class_level == student.class.level())
            .ok_or(GradebookServiceError::SubjectClassMismatch)?;

        let grade = Grade {
            id: Uuid::now_v7(),
            student_id: student.id,
            subject_id: subject.id,
            teacher_id,
            task_name,
            score,
            max_score,
            date: Utc::now(),
        };
        self.grades.create(&grade).await?;
        Ok(grade)
    }
}

// ── BulkCreateGrades ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct BulkCreateGradesInput {
    pub subject_id: Option<String>,
    pub task_name: Option<String>,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
}

/// Applies one grade to every student on the roster. Not transactional:
/// each student is recorded independently and failures are only counted.
pub struct BulkCreateGradesUseCase<S, J, G>
where
    S: StudentRepository,
    J: SubjectRepository,
    G: GradeRepository,
{
    pub create: CreateGradeUseCase<S, J, G>,
}

impl<S, J, G> BulkCreateGradesUseCase<S, J, G>
where
    S: StudentRepository,
    J: SubjectRepository,
    G: GradeRepository,
{
    pub async fn execute(
        &self,
        teacher_id: Uuid,
        assigned_class: ClassNumber,
        input: BulkCreateGradesInput,
    ) -> Result<BulkOutcome, GradebookServiceError> {
        // Input errors would fail every student identically; report them once.
        required_subject_id(input.subject_id.as_deref())?;
        validate_grade_fields(input.task_name.as_deref(), input.score, input.max_score)?;

        let roster = self
            .create
            .students
            .list(teacher_id, assigned_class)
            .await?;

        let mut outcome = BulkOutcome::default();
        for student in roster {
            let result = self
                .create
                .execute(
                    teacher_id,
                    CreateGradeInput {
                        student_id: Some(student.id),
                        subject_id: input.subject_id.clone(),
                        task_name: input.task_name.clone(),
                        score: input.score,
                        max_score: input.max_score,
                    },
                )
                .await;
            match result {
                Ok(_) => outcome.success_count += 1,
                Err(e) => {
                    tracing::warn!(
                        student_id = %student.id,
                        kind = e.kind(),
                        error = %e,
                        "bulk grade skipped student"
                    );
                    outcome.error_count += 1;
                }
            }
        }

        tracing::info!(
            %teacher_id,
            success_count = outcome.success_count,
            error_count = outcome.error_count,
            "bulk grade assignment finished"
        );
        Ok(outcome)
    }
}

// ── UpdateGrade ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct UpdateGradeInput {
    pub task_name: Option<String>,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
}

pub struct UpdateGradeUseCase<G: GradeRepository> {
    pub repo: G,
}

impl<G: GradeRepository> UpdateGradeUseCase<G> {
    /// Student, subject and date are left untouched.
    pub async fn execute(
        &self,
        teacher_id: Uuid,
        grade_id: Uuid,
        input: UpdateGradeInput,
    ) -> Result<Grade, GradebookServiceError> {
        let (task_name, score, max_score) =
            validate_grade_fields(input.task_name.as_deref(), input.score, input.max_score)?;

        ensure_owned(
            self.repo.find_by_id(grade_id).await?,
            teacher_id,
            GradebookServiceError::GradeNotFound,
        )?;

        self.repo
            .update(grade_id, &task_name, score, max_score)
            .await
    }
}

// ── DeleteGrade ──────────────────────────────────────────────────────────────

pub struct DeleteGradeUseCase<G: GradeRepository> {
    pub repo: G,
}

impl<G: GradeRepository> DeleteGradeUseCase<G> {
    pub async fn execute(&self, teacher_id: Uuid, grade_id: Uuid) -> Result<(), GradebookServiceError> {
        ensure_owned(
            self.repo.find_by_id(grade_id).await?,
            teacher_id,
            GradebookServiceError::GradeNotFound,
        )?;
        self.repo.delete(grade_id).await
    }
}

// ── ListGrades ───────────────────────────────────────────────────────────────

pub struct ListGradesUseCase<G: GradeRepository> {
    pub repo: G,
}

impl<G: GradeRepository> ListGradesUseCase<G> {
    pub async fn execute(
        &self,
        teacher_id: Uuid,
        filter: GradeFilter,
    ) -> Result<Vec<GradeEntry>, GradebookServiceError> {
        self.repo.list(teacher_id, &filter).await
    }
}
