use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Grades::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Grades::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Grades::SubjectId).string().not_null())
                    .col(ColumnDef::new(Grades::TeacherId).uuid().not_null())
                    .col(ColumnDef::new(Grades::TaskName).string().not_null())
                    .col(ColumnDef::new(Grades::Score).double().not_null())
                    .col(
                        ColumnDef::new(Grades::MaxScore)
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .col(
                        ColumnDef::new(Grades::Date)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::SubjectId)
                            .to(Subjects::Table, Subjects::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Grades::Table)
                    .col(Grades::TeacherId)
                    .col((Grades::Date, IndexOrder::Desc))
                    .name("idx_grades_teacher_id_date")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .name("idx_grades_student_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Grades {
    Table,
    Id,
    StudentId,
    SubjectId,
    TeacherId,
    TaskName,
    Score,
    MaxScore,
    Date,
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
}

#[derive(Iden)]
enum Subjects {
    Table,
    Id,
}

#[derive(Iden)]
enum Teachers {
    Table,
    Id,
}
