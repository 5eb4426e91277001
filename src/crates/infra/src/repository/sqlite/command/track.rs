use super::db_data::{album, artist, track, track::ActiveModel, track::Entity, track::Model};
use async_trait::async_trait;
use domain::track::{Track, TrackError, TrackRepository};
use domain::value::TrackId;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::collections::HashSet;

#[derive(Clone)]
pub struct TrackRepositoryImpl {
    db: DbConn,
}

impl TrackRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TrackRepository for TrackRepositoryImpl {
    async fn find_by_id(&self, id: TrackId) -> Result<Option<Track>, TrackError> {
        let row: Option<Model> = Entity::find_by_id(id.as_i64())
            .one(&self.db)
            .await
            .map_err(|e| TrackError::DbErr(e.to_string()))?;
        Ok(row.map(|m| m.into()))
    }

    async fn save(&self, track: Track) -> Result<Track, TrackError> {
        let artist_exists = artist::Entity::find_by_id(track.artist_id.as_i64())
            .one(&self.db)
            .await
            .map_err(|e| TrackError::DbErr(e.to_string()))?
            .is_some();
        if !artist_exists {
            return Err(TrackError::MissingArtist(track.id, track.artist_id));
        }
        let album_exists = album::Entity::find_by_id(track.album_id.as_i64())
            .one(&self.db)
            .await
            .map_err(|e| TrackError::DbErr(e.to_string()))?
            .is_some();
        if !album_exists {
            return Err(TrackError::MissingAlbum(track.id, track.album_id));
        }

        Entity::insert(ActiveModel::from(&track))
            .on_conflict(
                OnConflict::column(track::Column::Id)
                    .update_columns([
                        track::Column::Title,
                        track::Column::DurationSecs,
                        track::Column::Rank,
                        track::Column::ArtistId,
                        track::Column::AlbumId,
                        track::Column::CoverUrl,
                        track::Column::FavoritedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| TrackError::DbErr(e.to_string()))?;
        Ok(track)
    }

    async fn delete(&self, id: TrackId) -> Result<bool, TrackError> {
        let result = Entity::delete_by_id(id.as_i64())
            .exec(&self.db)
            .await
            .map_err(|e| TrackError::DbErr(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    async fn list_all(&self) -> Result<Vec<Track>, TrackError> {
        let rows: Vec<Model> = Entity::find()
            .order_by_asc(track::Column::FavoritedAt)
            .order_by_asc(track::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::DbErr(e.to_string()))?;
        Ok(rows.into_iter().map(|m| m.into()).collect())
    }

    async fn list_ids(&self) -> Result<HashSet<TrackId>, TrackError> {
        let ids: Vec<i64> = Entity::find()
            .select_only()
            .column(track::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| TrackError::DbErr(e.to_string()))?;
        Ok(ids.into_iter().map(TrackId::from).collect())
    }
}
