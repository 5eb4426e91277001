use super::db_data::{album, album::ActiveModel, album::Entity, album::Model, artist, track};
use async_trait::async_trait;
use domain::album::{Album, AlbumError, AlbumRepository};
use domain::value::{AlbumId, TrackId};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::collections::HashSet;

#[derive(Clone)]
pub struct AlbumRepositoryImpl {
    db: DbConn,
}

impl AlbumRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AlbumRepository for AlbumRepositoryImpl {
    async fn find_by_id(&self, id: AlbumId) -> Result<Option<Album>, AlbumError> {
        let row: Option<Model> = Entity::find_by_id(id.as_i64())
            .one(&self.db)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;
        Ok(row.map(|m| m.into()))
    }

    async fn save(&self, album: Album) -> Result<Album, AlbumError> {
        let artist_exists = artist::Entity::find_by_id(album.artist_id.as_i64())
            .one(&self.db)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?
            .is_some();
        if !artist_exists {
            return Err(AlbumError::MissingArtist(album.artist_id));
        }

        Entity::insert(ActiveModel::from(&album))
            .on_conflict(
                OnConflict::column(album::Column::Id)
                    .update_columns([
                        album::Column::Title,
                        album::Column::CoverUrl,
                        album::Column::ArtistId,
                        album::Column::TrackCount,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;
        Ok(album)
    }

    async fn delete_cascade(&self, id: AlbumId) -> Result<Option<Vec<TrackId>>, AlbumError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;

        let track_ids: Vec<i64> = track::Entity::find()
            .select_only()
            .column(track::Column::Id)
            .filter(track::Column::AlbumId.eq(id.as_i64()))
            .order_by_asc(track::Column::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;
        track::Entity::delete_many()
            .filter(track::Column::AlbumId.eq(id.as_i64()))
            .exec(&txn)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;
        let result = Entity::delete_by_id(id.as_i64())
            .exec(&txn)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(track_ids.into_iter().map(TrackId::from).collect()))
    }

    async fn list_all(&self) -> Result<Vec<Album>, AlbumError> {
        let rows: Vec<Model> = Entity::find()
            .order_by_asc(album::Column::Title)
            .order_by_asc(album::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;
        Ok(rows.into_iter().map(|m| m.into()).collect())
    }

    async fn list_ids(&self) -> Result<HashSet<AlbumId>, AlbumError> {
        let ids: Vec<i64> = Entity::find()
            .select_only()
            .column(album::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;
        Ok(ids.into_iter().map(AlbumId::from).collect())
    }
}
