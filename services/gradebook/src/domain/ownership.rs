//! Single ownership guard shared by every teacher-scoped lookup.

use uuid::Uuid;

use crate::domain::types::{Grade, Student};
use crate::error::GradebookServiceError;

/// Records that belong to exactly one teacher.
pub trait OwnedByTeacher {
    fn owner_id(&self) -> Uuid;
}

impl OwnedByTeacher for Student {
    fn owner_id(&self) -> Uuid {
        self.teacher_id
    }
}

impl OwnedByTeacher for Grade {
    fn owner_id(&self) -> Uuid {
        self.teacher_id
    }
}

/// Missing and foreign records are indistinguishable to the caller.
pub fn ensure_owned<T: OwnedByTeacher>(
    record: Option<T>,
    teacher_id: Uuid,
    not_found: GradebookServiceError,
) -> Result<T, GradebookServiceError> {
    match record {
        Some(r) if r.owner_id() == teacher_id => Ok(r),
        _ => Err(not_found),
    }
}
