use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Books::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Books::Title).string().not_null())
                    .col(ColumnDef::new(Books::Author).string().not_null())
                    .col(ColumnDef::new(Books::Genre).string().not_null())
                    .col(ColumnDef::new(Books::Description).text().not_null())
                    .col(ColumnDef::new(Books::PublicationYear).integer())
                    .col(ColumnDef::new(Books::CoverImageUrl).string().not_null())
                    .col(ColumnDef::new(Books::OwnerAdminId).uuid())
                    .col(
                        ColumnDef::new(Books::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Books::Table, Books::OwnerAdminId)
                            .to(Users::Table, Users::Id)
                            // Attribution only: books outlive their creator.
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Books::Table)
                    .col(Books::Genre)
                    .name("idx_books_genre")
                    .to_owned(),
            )
            .await?;

        // Listings sort newest-first.
        manager
            .create_index(
                Index::create()
                    .table(Books::Table)
                    .col(Books::CreatedAt)
                    .name("idx_books_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Books::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
    Title,
    Author,
    Genre,
    Description,
    PublicationYear,
    CoverImageUrl,
    OwnerAdminId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
