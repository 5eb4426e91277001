use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artist::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Artist::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Artist::Name).string().not_null())
                    .col(ColumnDef::new(Artist::PictureUrl).string().not_null().default(""))
                    .col(ColumnDef::new(Artist::FanCount).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Album::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Album::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Album::Title).string().not_null())
                    .col(ColumnDef::new(Album::CoverUrl).string().not_null().default(""))
                    .col(ColumnDef::new(Album::ArtistId).big_integer().not_null())
                    .col(ColumnDef::new(Album::TrackCount).integer().not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_album_artist_id")
                            .from(Album::Table, Album::ArtistId)
                            .to(Artist::Table, Artist::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Track::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Track::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Track::Title).string().not_null())
                    .col(ColumnDef::new(Track::DurationSecs).integer().not_null().default(0))
                    .col(ColumnDef::new(Track::Rank).integer().not_null().default(0))
                    .col(ColumnDef::new(Track::ArtistId).big_integer().not_null())
                    .col(ColumnDef::new(Track::AlbumId).big_integer().not_null())
                    .col(ColumnDef::new(Track::CoverUrl).string().not_null().default(""))
                    .col(ColumnDef::new(Track::FavoritedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_track_artist_id")
                            .from(Track::Table, Track::ArtistId)
                            .to(Artist::Table, Artist::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_track_album_id")
                            .from(Track::Table, Track::AlbumId)
                            .to(Album::Table, Album::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClassicalWork::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassicalWork::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassicalWork::Title).string().not_null())
                    .col(ColumnDef::new(ClassicalWork::ComposerName).string().not_null())
                    .col(ColumnDef::new(ClassicalWork::ComposerPicture).string().null())
                    .col(ColumnDef::new(ClassicalWork::Genre).string().not_null().default(""))
                    .col(ColumnDef::new(ClassicalWork::Rating).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        // sqlite only allows AUTOINCREMENT on an INTEGER primary key
        manager
            .create_table(
                Table::create()
                    .table(FavoriteManga::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FavoriteManga::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FavoriteManga::MalId).big_integer().not_null())
                    .col(ColumnDef::new(FavoriteManga::Title).string().not_null())
                    .col(ColumnDef::new(FavoriteManga::TitleEnglish).string().null())
                    .col(ColumnDef::new(FavoriteManga::ImageUrl).string().not_null().default(""))
                    .col(ColumnDef::new(FavoriteManga::Kind).string().null())
                    .col(ColumnDef::new(FavoriteManga::Status).string().null())
                    .col(ColumnDef::new(FavoriteManga::Chapters).integer().null())
                    .col(ColumnDef::new(FavoriteManga::Volumes).integer().null())
                    .col(ColumnDef::new(FavoriteManga::Score).double().null())
                    .col(ColumnDef::new(FavoriteManga::Synopsis).text().null())
                    .col(ColumnDef::new(FavoriteManga::PublishedFrom).string().null())
                    .col(ColumnDef::new(FavoriteManga::PublishedTo).string().null())
                    .col(ColumnDef::new(FavoriteManga::Authors).text().null())
                    .col(ColumnDef::new(FavoriteManga::Genres).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_manga_mal_id")
                    .table(FavoriteManga::Table)
                    .col(FavoriteManga::MalId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_album_artist_id")
                    .table(Album::Table)
                    .col(Album::ArtistId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_track_artist_id")
                    .table(Track::Table)
                    .col(Track::ArtistId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_track_album_id")
                    .table(Track::Table)
                    .col(Track::AlbumId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FavoriteManga::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassicalWork::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Track::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Album::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Artist::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Artist {
    Table,
    Id,
    Name,
    PictureUrl,
    FanCount,
}

#[derive(DeriveIden)]
enum Album {
    Table,
    Id,
    Title,
    CoverUrl,
    ArtistId,
    TrackCount,
}

#[derive(DeriveIden)]
enum Track {
    Table,
    Id,
    Title,
    DurationSecs,
    Rank,
    ArtistId,
    AlbumId,
    CoverUrl,
    FavoritedAt,
}

#[derive(DeriveIden)]
enum ClassicalWork {
    Table,
    Id,
    Title,
    ComposerName,
    ComposerPicture,
    Genre,
    Rating,
}

#[derive(DeriveIden)]
enum FavoriteManga {
    Table,
    Id,
    MalId,
    Title,
    TitleEnglish,
    ImageUrl,
    Kind,
    Status,
    Chapters,
    Volumes,
    Score,
    Synopsis,
    PublishedFrom,
    PublishedTo,
    Authors,
    Genres,
}
