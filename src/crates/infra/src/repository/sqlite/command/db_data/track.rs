use domain::track::Track;
use domain::value::{AlbumId, ArtistId, TrackId};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "track")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    pub title: String,
    pub duration_secs: i32,
    pub rank: i32,
    #[sea_orm(column_type = "BigInteger")]
    pub artist_id: i64,
    #[sea_orm(column_type = "BigInteger")]
    pub album_id: i64,
    pub cover_url: String,
    pub favorited_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Artist,
    Album,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Artist => Entity::belongs_to(super::artist::Entity)
                .from(Column::ArtistId)
                .to(super::artist::Column::Id)
                .into(),
            Self::Album => Entity::belongs_to(super::album::Entity)
                .from(Column::AlbumId)
                .to(super::album::Column::Id)
                .into(),
        }
    }
}

impl Related<super::artist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artist.def()
    }
}

impl Related<super::album::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Album.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Track> for ActiveModel {
    fn from(track: &Track) -> Self {
        Self {
            id: Set(track.id.as_i64()),
            title: Set(track.title.clone()),
            duration_secs: Set(track.duration_secs),
            rank: Set(track.rank),
            artist_id: Set(track.artist_id.as_i64()),
            album_id: Set(track.album_id.as_i64()),
            cover_url: Set(track.cover_url.clone()),
            favorited_at: Set(track.favorited_at),
        }
    }
}

impl From<Model> for Track {
    fn from(model: Model) -> Self {
        Track {
            id: TrackId::from(model.id),
            title: model.title,
            duration_secs: model.duration_secs,
            rank: model.rank,
            artist_id: ArtistId::from(model.artist_id),
            album_id: AlbumId::from(model.album_id),
            cover_url: model.cover_url,
            favorited_at: model.favorited_at,
            pending_events: Vec::new(),
        }
    }
}
