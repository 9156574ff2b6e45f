use sea_orm_migration::prelude::*;

mod m20250105_000001_create_teachers;
mod m20250105_000002_create_subjects;
mod m20250105_000003_create_students;
mod m20250105_000004_create_grades;
mod m20250105_000005_seed_subjects;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250105_000001_create_teachers::Migration),
            Box::new(m20250105_000002_create_subjects::Migration),
            Box::new(m20250105_000003_create_students::Migration),
            Box::new(m20250105_000004_create_grades::Migration),
            Box::new(m20250105_000005_seed_subjects::Migration),
        ]
    }
}
