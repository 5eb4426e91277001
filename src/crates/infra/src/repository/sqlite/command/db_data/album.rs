use domain::album::Album;
use domain::value::{AlbumId, ArtistId};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "album")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    pub title: String,
    pub cover_url: String,
    #[sea_orm(column_type = "BigInteger")]
    pub artist_id: i64,
    pub track_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Artist,
    Track,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Artist => Entity::belongs_to(super::artist::Entity)
                .from(Column::ArtistId)
                .to(super::artist::Column::Id)
                .into(),
            Self::Track => Entity::has_many(super::track::Entity)
                .from(Column::Id)
                .to(super::track::Column::AlbumId)
                .into(),
        }
    }
}

impl Related<super::artist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artist.def()
    }
}

impl Related<super::track::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Track.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Album> for ActiveModel {
    fn from(album: &Album) -> Self {
        Self {
            id: Set(album.id.as_i64()),
            title: Set(album.title.clone()),
            cover_url: Set(album.cover_url.clone()),
            artist_id: Set(album.artist_id.as_i64()),
            track_count: Set(album.track_count),
        }
    }
}

impl From<Model> for Album {
    fn from(model: Model) -> Self {
        Album::new(
            AlbumId::from(model.id),
            model.title,
            model.cover_url,
            ArtistId::from(model.artist_id),
            model.track_count,
        )
    }
}
