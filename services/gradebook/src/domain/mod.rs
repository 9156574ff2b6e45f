pub mod ownership;
pub mod report;
pub mod repository;
pub mod tabular;
pub mod types;
