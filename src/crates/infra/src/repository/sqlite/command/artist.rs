use super::db_data::{album, artist, artist::ActiveModel, artist::Entity, artist::Model, track};
use async_trait::async_trait;
use domain::artist::{Artist, ArtistError, ArtistRepository};
use domain::value::{ArtistId, TrackId};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::collections::HashSet;

#[derive(Clone)]
pub struct ArtistRepositoryImpl {
    db: DbConn,
}

impl ArtistRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ArtistRepository for ArtistRepositoryImpl {
    async fn find_by_id(&self, id: ArtistId) -> Result<Option<Artist>, ArtistError> {
        let row: Option<Model> = Entity::find_by_id(id.as_i64())
            .one(&self.db)
            .await
            .map_err(|e| ArtistError::DbErr(e.to_string()))?;
        Ok(row.map(|m| m.into()))
    }

    async fn save(&self, artist: Artist) -> Result<Artist, ArtistError> {
        // DO UPDATE keeps the row, so the cascade on albums and tracks never fires
        Entity::insert(ActiveModel::from(&artist))
            .on_conflict(
                OnConflict::column(artist::Column::Id)
                    .update_columns([
                        artist::Column::Name,
                        artist::Column::PictureUrl,
                        artist::Column::FanCount,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ArtistError::DbErr(e.to_string()))?;
        Ok(artist)
    }

    async fn delete_cascade(&self, id: ArtistId) -> Result<Option<Vec<TrackId>>, ArtistError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ArtistError::DbErr(e.to_string()))?;

        let track_ids: Vec<i64> = track::Entity::find()
            .select_only()
            .column(track::Column::Id)
            .filter(track::Column::ArtistId.eq(id.as_i64()))
            .order_by_asc(track::Column::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| ArtistError::DbErr(e.to_string()))?;
        track::Entity::delete_many()
            .filter(track::Column::ArtistId.eq(id.as_i64()))
            .exec(&txn)
            .await
            .map_err(|e| ArtistError::DbErr(e.to_string()))?;
        album::Entity::delete_many()
            .filter(album::Column::ArtistId.eq(id.as_i64()))
            .exec(&txn)
            .await
            .map_err(|e| ArtistError::DbErr(e.to_string()))?;
        let result = Entity::delete_by_id(id.as_i64())
            .exec(&txn)
            .await
            .map_err(|e| ArtistError::DbErr(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| ArtistError::DbErr(e.to_string()))?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(track_ids.into_iter().map(TrackId::from).collect()))
    }

    async fn list_all(&self) -> Result<Vec<Artist>, ArtistError> {
        let rows: Vec<Model> = Entity::find()
            .order_by_asc(artist::Column::Name)
            .order_by_asc(artist::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ArtistError::DbErr(e.to_string()))?;
        Ok(rows.into_iter().map(|m| m.into()).collect())
    }

    async fn list_ids(&self) -> Result<HashSet<ArtistId>, ArtistError> {
        let ids: Vec<i64> = Entity::find()
            .select_only()
            .column(artist::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ArtistError::DbErr(e.to_string()))?;
        Ok(ids.into_iter().map(ArtistId::from).collect())
    }
}
