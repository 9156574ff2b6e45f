use chrono::Utc;
use uuid::Uuid;

use gradebook_domain::class::ClassNumber;

use crate::domain::report::{Report, build_report};
use crate::domain::repository::{
    GradeRepository, StudentRepository, SubjectRepository, TabularExportPort, TeacherRepository,
};
use crate::domain::types::GradeFilter;
use crate::error::GradebookServiceError;

// ── GetReport ────────────────────────────────────────────────────────────────

pub struct GetReportUseCase<S, J, G>
where
    S: StudentRepository,
    J: SubjectRepository,
    G: GradeRepository,
{
    pub students: S,
    pub subjects: J,
    pub grades: G,
}

impl<S, J, G> GetReportUseCase<S, J, G>
where
    S: StudentRepository,
    J: SubjectRepository,
    G: GradeRepository,
{
    pub async fn execute(
        &self,
        teacher_id: Uuid,
        assigned_class: ClassNumber,
    ) -> Result<Report, GradebookServiceError> {
        let roster = self.students.list(teacher_id, assigned_class).await?;
        let subjects = self.subjects.list(assigned_class.level()).await?;
        let grades = self.grades.list(teacher_id, &GradeFilter::default()).await?;
        Ok(build_report(&subjects, &roster, &grades))
    }
}

// ── ExportReport ─────────────────────────────────────────────────────────────

/// An encoded report ready to download.
pub struct ExportedReport {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct ExportReportUseCase<T, S, J, G, X>
where
    T: TeacherRepository,
    S: StudentRepository,
    J: SubjectRepository,
    G: GradeRepository,
    X: TabularExportPort,
{
    pub teachers: T,
    pub report: GetReportUseCase<S, J, G>,
    pub exporter: X,
}

impl<T, S, J, G, X> ExportReportUseCase<T, S, J, G, X>
where
    T: TeacherRepository,
    S: StudentRepository,
    J: SubjectRepository,
    G: GradeRepository,
    X: TabularExportPort,
{
    pub async fn execute(
        &self,
        teacher_id: Uuid,
        assigned_class: ClassNumber,
    ) -> Result<ExportedReport, GradebookServiceError> {
        let teacher = self
            .teachers
            .find_by_id(teacher_id)
            .await?
            .ok_or(GradebookServiceError::TeacherNotFound)?;

        let report = self.report.execute(teacher_id, assigned_class).await?;
        let bytes = self.exporter.encode(&report.to_document(&teacher.name))?;

        Ok(ExportedReport {
            filename: report_filename(
                assigned_class,
                &Utc::now().format("%Y-%m-%d").to_string(),
                self.exporter.file_extension(),
            ),
            content_type: self.exporter.content_type(),
            bytes,
        })
    }
}

/// `grade_report_class_<class>_<YYYY-MM-DD>.<ext>`
pub fn report_filename(class: ClassNumber, date: &str, extension: &str) -> String {
    format!("grade_report_class_{class}_{date}.{extension}")
}
