use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string_uniq(Movies::ImdbId))
                    .col(string(Movies::Title))
                    .col(integer(Movies::Year))
                    .col(double(Movies::Rating))
                    .col(boolean(Movies::IsSuperhero))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_year")
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(Movies::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    #[sea_orm(iden = "imdbID")]
    ImdbId,
    Title,
    Year,
    Rating,
    #[sea_orm(iden = "isSuperhero")]
    IsSuperhero,
}
