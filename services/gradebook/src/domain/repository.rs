#![allow(async_fn_in_trait)]

use uuid::Uuid;

use gradebook_domain::class::{ClassLevel, ClassNumber};

use crate::domain::tabular::TabularDocument;
use crate::domain::types::{Grade, GradeEntry, GradeFilter, Student, Subject, Teacher};
use crate::error::GradebookServiceError;

/// Repository for teacher accounts.
pub trait TeacherRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Teacher>, GradebookServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Teacher>, GradebookServiceError>;
    async fn find_by_class(
        &self,
        class: ClassNumber,
    ) -> Result<Option<Teacher>, GradebookServiceError>;

    /// Unique-key rejections surface as `EmailAlreadyUsed` / `ClassAlreadyAssigned`.
    async fn create(&self, teacher: &Teacher) -> Result<(), GradebookServiceError>;

    /// Delete the teacher's grades, students and account atomically.
    /// Returns `false` if no such teacher exists.
    async fn delete_cascade(&self, id: Uuid) -> Result<bool, GradebookServiceError>;
}

/// Repository for roster entries.
pub trait StudentRepository: Send + Sync {
    /// Students owned by `teacher_id` in `class`, name ascending.
    async fn list(
        &self,
        teacher_id: Uuid,
        class: ClassNumber,
    ) -> Result<Vec<Student>, GradebookServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, GradebookServiceError>;

    /// Global lookup across every teacher.
    async fn find_by_nisn(&self, nisn: &str) -> Result<Option<Student>, GradebookServiceError>;

    /// A unique-key rejection on `nisn` surfaces as `NisnAlreadyUsed`.
    async fn create(&self, student: &Student) -> Result<(), GradebookServiceError>;

    /// A unique-key rejection on `nisn` surfaces as `NisnAlreadyUsed`.
    async fn update(
        &self,
        id: Uuid,
        name: &str,
        nisn: Option<&str>,
    ) -> Result<Student, GradebookServiceError>;

    /// Delete the student and its grades atomically.
    async fn delete(&self, id: Uuid) -> Result<(), GradebookServiceError>;
}

/// Read-only access to the seeded subject catalog.
pub trait SubjectRepository: Send + Sync {
    /// Subjects of `level`, name ascending.
    async fn list(&self, level: ClassLevel) -> Result<Vec<Subject>, GradebookServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Subject>, GradebookServiceError>;
}

/// Repository for the grade ledger.
pub trait GradeRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Grade>, GradebookServiceError>;

    /// Grades entered by `teacher_id`, date descending then student name ascending.
    async fn list(
        &self,
        teacher_id: Uuid,
        filter: &GradeFilter,
    ) -> Result<Vec<GradeEntry>, GradebookServiceError>;

    async fn create(&self, grade: &Grade) -> Result<(), GradebookServiceError>;

    async fn update(
        &self,
        id: Uuid,
        task_name: &str,
        score: f64,
        max_score: f64,
    ) -> Result<Grade, GradebookServiceError>;

    async fn delete(&self, id: Uuid) -> Result<(), GradebookServiceError>;
}

/// One-way password hashing.
pub trait PasswordHasherPort: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, GradebookServiceError>;
    /// `Ok(false)` on mismatch; `Err` only when `hash` is unreadable.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, GradebookServiceError>;
    /// Costs the same as [`verify`](Self::verify) for an account that does not exist.
    /// Always `Ok(false)`.
    async fn verify_absent(&self, password: &str) -> Result<bool, GradebookServiceError>;
}

/// Serializes a [`TabularDocument`] into a downloadable file.
pub trait TabularExportPort: Send + Sync {
    fn content_type(&self) -> &'static str;
    fn file_extension(&self) -> &'static str;
    fn encode(&self, document: &TabularDocument) -> Result<Vec<u8>, GradebookServiceError>;
}
