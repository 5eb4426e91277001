use domain::manga::FavoriteManga;
use domain::value::MalId;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "favorite_manga")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "BigInteger", unique)]
    pub mal_id: i64,
    pub title: String,
    pub title_english: Option<String>,
    pub image_url: String,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub chapters: Option<i32>,
    pub volumes: Option<i32>,
    pub score: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub synopsis: Option<String>,
    pub published_from: Option<String>,
    pub published_to: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub authors: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub genres: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// The surrogate id is left to the database.
impl From<&FavoriteManga> for ActiveModel {
    fn from(manga: &FavoriteManga) -> Self {
        Self {
            id: NotSet,
            mal_id: Set(manga.mal_id.as_i64()),
            title: Set(manga.title.clone()),
            title_english: Set(manga.title_english.clone()),
            image_url: Set(manga.image_url.clone()),
            kind: Set(manga.kind.clone()),
            status: Set(manga.status.clone()),
            chapters: Set(manga.chapters),
            volumes: Set(manga.volumes),
            score: Set(manga.score),
            synopsis: Set(manga.synopsis.clone()),
            published_from: Set(manga.published_from.clone()),
            published_to: Set(manga.published_to.clone()),
            authors: Set(manga.authors.clone()),
            genres: Set(manga.genres.clone()),
        }
    }
}

impl From<Model> for FavoriteManga {
    fn from(model: Model) -> Self {
        let mut manga = FavoriteManga::new(MalId::from(model.mal_id), model.title, model.image_url);
        manga.local_id = model.id;
        manga.title_english = model.title_english;
        manga.kind = model.kind;
        manga.status = model.status;
        manga.chapters = model.chapters;
        manga.volumes = model.volumes;
        manga.score = model.score;
        manga.synopsis = model.synopsis;
        manga.published_from = model.published_from;
        manga.published_to = model.published_to;
        manga.authors = model.authors;
        manga.genres = model.genres;
        manga
    }
}
