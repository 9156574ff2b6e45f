use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subjects::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(
                        ColumnDef::new(Subjects::ClassLevel)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(Subjects::ClassLevel).is_in([3, 6])),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Subjects::Table)
                    .col(Subjects::ClassLevel)
                    .col(Subjects::Name)
                    .name("idx_subjects_class_level_name")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Subjects {
    Table,
    Id,
    Name,
    ClassLevel,
}
