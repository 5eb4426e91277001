use domain::classical_work::ClassicalWork;
use domain::value::WorkId;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classical_work")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    pub title: String,
    pub composer_name: String,
    pub composer_picture: Option<String>,
    pub genre: String,
    pub rating: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&ClassicalWork> for ActiveModel {
    fn from(work: &ClassicalWork) -> Self {
        Self {
            id: Set(work.id.as_i64()),
            title: Set(work.title.clone()),
            composer_name: Set(work.composer_name.clone()),
            composer_picture: Set(work.composer_picture.clone()),
            genre: Set(work.genre.clone()),
            rating: Set(work.rating),
        }
    }
}

impl From<Model> for ClassicalWork {
    fn from(model: Model) -> Self {
        let mut work = ClassicalWork::new(
            WorkId::from(model.id),
            model.title,
            model.composer_name,
            model.composer_picture,
            model.genre,
        );
        work.rating = model.rating;
        work
    }
}
