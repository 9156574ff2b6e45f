use gradebook_domain::subject::seed_catalog;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Subjects::Table)
            .columns([Subjects::Id, Subjects::Name, Subjects::ClassLevel])
            .on_conflict(OnConflict::column(Subjects::Id).do_nothing().to_owned());
        for entry in seed_catalog() {
            insert.values_panic([
                entry.id.into(),
                entry.name.into(),
                entry.level.as_i16().into(),
            ]);
        }
        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let ids: Vec<String> = seed_catalog().into_iter().map(|e| e.id).collect();
        let delete = Query::delete()
            .from_table(Subjects::Table)
            .and_where(Expr::col(Subjects::Id).is_in(ids))
            .to_owned();
        manager.exec_stmt(delete).await
    }
}

#[derive(Iden)]
enum Subjects {
    Table,
    Id,
    Name,
    ClassLevel,
}
