pub mod account;
pub mod grade;
pub mod report;
pub mod student;
pub mod subject;
