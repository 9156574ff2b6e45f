use chrono::{DateTime, Utc};
use uuid::Uuid;

use gradebook_domain::class::{ClassLevel, ClassNumber};

/// Teacher account bound to exactly one class.
#[derive(Debug, Clone)]
pub struct Teacher {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub assigned_class: ClassNumber,
    pub created_at: DateTime<Utc>,
}

/// Roster entry. `class` is copied from the owner at creation time.
#[derive(Debug, Clone)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub nisn: Option<String>,
    pub class: ClassNumber,
    pub teacher_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Seeded, read-only subject.
#[derive(Debug, Clone)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub class_level: ClassLevel,
}

/// One recorded score for a (student, subject, task) triple.
#[derive(Debug, Clone)]
pub struct Grade {
    pub id: Uuid,
    pub student_id: Uuid,
    pub subject_id: String,
    pub teacher_id: Uuid,
    pub task_name: String,
    pub score: f64,
    pub max_score: f64,
    pub date: DateTime<Utc>,
}

/// A grade joined with the names it is displayed with.
#[derive(Debug, Clone)]
pub struct GradeEntry {
    pub grade: Grade,
    pub student_name: String,
    pub student_nisn: Option<String>,
    pub subject_name: String,
}

/// Optional narrowing for grade listings. Always combined with the teacher scope.
#[derive(Debug, Clone, Default)]
pub struct GradeFilter {
    pub student_id: Option<Uuid>,
    pub subject_id: Option<String>,
}

/// Result of applying one grade to a whole roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub success_count: usize,
    pub error_count: usize,
}

/// Trim a free-text NISN; blank input means "no NISN".
pub fn normalize_nisn(nisn: Option<&str>) -> Option<String> {
    nisn.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
}
