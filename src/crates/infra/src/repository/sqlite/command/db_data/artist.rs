use domain::artist::Artist;
use domain::value::ArtistId;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "artist")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    pub name: String,
    pub picture_url: String,
    pub fan_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Album,
    Track,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Album => Entity::has_many(super::album::Entity)
                .from(Column::Id)
                .to(super::album::Column::ArtistId)
                .into(),
            Self::Track => Entity::has_many(super::track::Entity)
                .from(Column::Id)
                .to(super::track::Column::ArtistId)
                .into(),
        }
    }
}

impl Related<super::album::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Album.def()
    }
}

impl Related<super::track::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Track.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Artist> for ActiveModel {
    fn from(artist: &Artist) -> Self {
        Self {
            id: Set(artist.id.as_i64()),
            name: Set(artist.name.clone()),
            picture_url: Set(artist.picture_url.clone()),
            fan_count: Set(artist.fan_count),
        }
    }
}

impl From<Model> for Artist {
    fn from(model: Model) -> Self {
        Artist::new(
            ArtistId::from(model.id),
            model.name,
            model.picture_url,
            model.fan_count,
        )
    }
}
