//! sea-orm entities for the gradebook database.

pub mod grades;
pub mod students;
pub mod subjects;
pub mod teachers;
