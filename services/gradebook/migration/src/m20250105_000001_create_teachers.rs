use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Teachers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Teachers::Email).string().not_null())
                    .col(ColumnDef::new(Teachers::Name).string().not_null())
                    .col(ColumnDef::new(Teachers::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Teachers::AssignedClass)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(Teachers::AssignedClass).between(1, 6)),
                    )
                    .col(
                        ColumnDef::new(Teachers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Teachers::Table)
                    .col(Teachers::Email)
                    .unique()
                    .name("idx_teachers_email")
                    .to_owned(),
            )
            .await?;

        // One teacher per class, system-wide.
        manager
            .create_index(
                Index::create()
                    .table(Teachers::Table)
                    .col(Teachers::AssignedClass)
                    .unique()
                    .name("idx_teachers_assigned_class")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Teachers {
    Table,
    Id,
    Email,
    Name,
    PasswordHash,
    AssignedClass,
    CreatedAt,
}
