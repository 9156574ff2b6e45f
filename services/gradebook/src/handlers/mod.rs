pub mod auth;
pub mod extract;
pub mod grades;
pub mod health;
pub mod me;
pub mod reports;
pub mod students;
pub mod subjects;
