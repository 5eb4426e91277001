use super::db_data::{
    classical_work, classical_work::ActiveModel, classical_work::Entity, classical_work::Model,
};
use async_trait::async_trait;
use domain::classical_work::{ClassicalWork, ClassicalWorkError, ClassicalWorkRepository};
use domain::value::WorkId;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::collections::HashSet;

#[derive(Clone)]
pub struct ClassicalWorkRepositoryImpl {
    db: DbConn,
}

impl ClassicalWorkRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClassicalWorkRepository for ClassicalWorkRepositoryImpl {
    async fn find_by_id(&self, id: WorkId) -> Result<Option<ClassicalWork>, ClassicalWorkError> {
        let row: Option<Model> = Entity::find_by_id(id.as_i64())
            .one(&self.db)
            .await
            .map_err(|e| ClassicalWorkError::DbErr(e.to_string()))?;
        Ok(row.map(|m| m.into()))
    }

    async fn save(&self, work: ClassicalWork) -> Result<ClassicalWork, ClassicalWorkError> {
        Entity::insert(ActiveModel::from(&work))
            .on_conflict(
                OnConflict::column(classical_work::Column::Id)
                    .update_columns([
                        classical_work::Column::Title,
                        classical_work::Column::ComposerName,
                        classical_work::Column::ComposerPicture,
                        classical_work::Column::Genre,
                        classical_work::Column::Rating,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ClassicalWorkError::DbErr(e.to_string()))?;
        Ok(work)
    }

    async fn delete(&self, id: WorkId) -> Result<bool, ClassicalWorkError> {
        let result = Entity::delete_by_id(id.as_i64())
            .exec(&self.db)
            .await
            .map_err(|e| ClassicalWorkError::DbErr(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    async fn list_all(&self) -> Result<Vec<ClassicalWork>, ClassicalWorkError> {
        let rows: Vec<Model> = Entity::find()
            .order_by_desc(classical_work::Column::Rating)
            .order_by_asc(classical_work::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassicalWorkError::DbErr(e.to_string()))?;
        Ok(rows.into_iter().map(|m| m.into()).collect())
    }

    async fn list_ids(&self) -> Result<HashSet<WorkId>, ClassicalWorkError> {
        let ids: Vec<i64> = Entity::find()
            .select_only()
            .column(classical_work::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ClassicalWorkError::DbErr(e.to_string()))?;
        Ok(ids.into_iter().map(WorkId::from).collect())
    }
}
