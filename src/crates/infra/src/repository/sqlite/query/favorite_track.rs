use application::query::dao::FavoriteTrackDao;
use application::query::QueryError;
use async_trait::async_trait;
use model::favorite_track::FavoriteTrack;
use sea_orm::*;

#[derive(Debug, Clone, FromQueryResult)]
struct FavoriteTrackRow {
    pub track_id: i64,
    pub title: String,
    pub cover_url: String,
    pub artist_name: String,
    pub album_title: String,
}

impl From<FavoriteTrackRow> for FavoriteTrack {
    fn from(row: FavoriteTrackRow) -> Self {
        FavoriteTrack {
            track_id: row.track_id,
            title: row.title,
            artist_name: row.artist_name,
            album_title: row.album_title,
            cover_url: row.cover_url,
        }
    }
}

#[derive(Clone)]
pub struct FavoriteTrackDaoImpl {
    db: DbConn,
}

impl FavoriteTrackDaoImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FavoriteTrackDao for FavoriteTrackDaoImpl {
    async fn list_favorite_tracks(&self) -> Result<Vec<FavoriteTrack>, QueryError> {
        let sql = r#"
            SELECT t.id AS track_id, t.title, t.cover_url,
                   ar.name AS artist_name, al.title AS album_title
            FROM track t
            JOIN artist ar ON ar.id = t.artist_id
            JOIN album al ON al.id = t.album_id
            ORDER BY t.favorited_at ASC, t.id ASC
        "#;
        let rows = FavoriteTrackRow::find_by_statement(Statement::from_string(
            DbBackend::Sqlite,
            sql.to_owned(),
        ))
        .all(&self.db)
        .await
        .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(rows.into_iter().map(FavoriteTrack::from).collect())
    }
}
