use super::db_data::{
    favorite_manga, favorite_manga::ActiveModel, favorite_manga::Entity, favorite_manga::Model,
};
use async_trait::async_trait;
use domain::manga::{FavoriteManga, MangaError, MangaRepository};
use domain::value::MalId;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::collections::HashSet;

#[derive(Clone)]
pub struct MangaRepositoryImpl {
    db: DbConn,
}

impl MangaRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MangaRepository for MangaRepositoryImpl {
    async fn find_by_mal_id(&self, mal_id: MalId) -> Result<Option<FavoriteManga>, MangaError> {
        let row: Option<Model> = Entity::find()
            .filter(favorite_manga::Column::MalId.eq(mal_id.as_i64()))
            .one(&self.db)
            .await
            .map_err(|e| MangaError::DbErr(e.to_string()))?;
        Ok(row.map(|m| m.into()))
    }

    async fn save(&self, manga: FavoriteManga) -> Result<FavoriteManga, MangaError> {
        Entity::insert(ActiveModel::from(&manga))
            .on_conflict(
                OnConflict::column(favorite_manga::Column::MalId)
                    .update_columns([
                        favorite_manga::Column::Title,
                        favorite_manga::Column::TitleEnglish,
                        favorite_manga::Column::ImageUrl,
                        favorite_manga::Column::Kind,
                        favorite_manga::Column::Status,
                        favorite_manga::Column::Chapters,
                        favorite_manga::Column::Volumes,
                        favorite_manga::Column::Score,
                        favorite_manga::Column::Synopsis,
                        favorite_manga::Column::PublishedFrom,
                        favorite_manga::Column::PublishedTo,
                        favorite_manga::Column::Authors,
                        favorite_manga::Column::Genres,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| MangaError::DbErr(e.to_string()))?;

        // read back for the surrogate id
        self.find_by_mal_id(manga.mal_id)
            .await?
            .ok_or_else(|| MangaError::DbErr(format!("manga {} vanished after save", manga.mal_id)))
    }

    async fn delete_by_mal_id(&self, mal_id: MalId) -> Result<bool, MangaError> {
        let result = Entity::delete_many()
            .filter(favorite_manga::Column::MalId.eq(mal_id.as_i64()))
            .exec(&self.db)
            .await
            .map_err(|e| MangaError::DbErr(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    async fn list_all(&self) -> Result<Vec<FavoriteManga>, MangaError> {
        let rows: Vec<Model> = Entity::find()
            .order_by_asc(favorite_manga::Column::Title)
            .order_by_asc(favorite_manga::Column::MalId)
            .all(&self.db)
            .await
            .map_err(|e| MangaError::DbErr(e.to_string()))?;
        Ok(rows.into_iter().map(|m| m.into()).collect())
    }

    async fn list_ids(&self) -> Result<HashSet<MalId>, MangaError> {
        let ids: Vec<i64> = Entity::find()
            .select_only()
            .column(favorite_manga::Column::MalId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| MangaError::DbErr(e.to_string()))?;
        Ok(ids.into_iter().map(MalId::from).collect())
    }
}
