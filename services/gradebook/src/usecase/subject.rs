use gradebook_domain::class::ClassNumber;

use crate::domain::repository::SubjectRepository;
use crate::domain::types::Subject;
use crate::error::GradebookServiceError;

// ── ListSubjects ─────────────────────────────────────────────────────────────

pub struct ListSubjectsUseCase<R: SubjectRepository> {
    pub repo: R,
}

impl<R: SubjectRepository> ListSubjectsUseCase<R> {
    /// Subjects of the band that `assigned_class` belongs to.
    pub async fn execute(
        &self,
        assigned_class: ClassNumber,
    ) -> Result<Vec<Subject>, GradebookServiceError> {
        self.repo.list(assigned_class.level()).await
    }
}
