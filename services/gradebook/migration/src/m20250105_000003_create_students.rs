use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(ColumnDef::new(Students::Nisn).string().null())
                    .col(ColumnDef::new(Students::Class).small_integer().not_null())
                    .col(ColumnDef::new(Students::TeacherId).uuid().not_null())
                    .col(
                        ColumnDef::new(Students::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // NULLs never collide, so students without a NISN are unconstrained.
        manager
            .create_index(
                Index::create()
                    .table(Students::Table)
                    .col(Students::Nisn)
                    .unique()
                    .name("idx_students_nisn")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Students::Table)
                    .col(Students::TeacherId)
                    .col(Students::Name)
                    .name("idx_students_teacher_id_name")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    Name,
    Nisn,
    Class,
    TeacherId,
    CreatedAt,
}

#[derive(Iden)]
enum Teachers {
    Table,
    Id,
}
