use crate::entities::lesson_progress;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

pub struct ProgressRepository;

impl ProgressRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Marks a lesson complete for a user. One row per (user, lesson) is
    /// enforced by a unique index, so this is an atomic upsert rather than a
    /// read-then-write pair.
    pub async fn mark_completed(&self, user_id: Uuid, lesson_id: Uuid) -> Result<()> {
        let db = self.get_connection();
        let now = chrono::Utc::now().naive_utc();
        let model = lesson_progress::ActiveModel {
            lesson_progress_id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            lesson_id: Set(lesson_id),
            completed: Set(true),
            completed_at: Set(Some(now)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        lesson_progress::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    lesson_progress::Column::UserId,
                    lesson_progress::Column::LessonId,
                ])
                .update_columns([
                    lesson_progress::Column::Completed,
                    lesson_progress::Column::CompletedAt,
                    lesson_progress::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Ok(())
    }

    pub async fn find_completed_for_lessons(
        &self,
        user_id: Uuid,
        lesson_ids: Vec<Uuid>,
    ) -> Result<Vec<lesson_progress::Model>> {
        if lesson_ids.is_empty() {
            return Ok(Vec::new());
        }

        let db = self.get_connection();
        let rows = lesson_progress::Entity::find()
            .filter(lesson_progress::Column::UserId.eq(user_id))
            .filter(lesson_progress::Column::LessonId.is_in(lesson_ids))
            .filter(lesson_progress::Column::Completed.eq(true))
            .all(db)
            .await?;
        Ok(rows)
    }

    pub async fn find_for_lessons(
        &self,
        user_id: Uuid,
        lesson_ids: Vec<Uuid>,
    ) -> Result<Vec<lesson_progress::Model>> {
        if lesson_ids.is_empty() {
            return Ok(Vec::new());
        }

        let db = self.get_connection();
        let rows = lesson_progress::Entity::find()
            .filter(lesson_progress::Column::UserId.eq(user_id))
            .filter(lesson_progress::Column::LessonId.is_in(lesson_ids))
            .all(db)
            .await?;
        Ok(rows)
    }

    pub async fn find_recent_for_user(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<lesson_progress::Model>> {
        let db = self.get_connection();
        let rows = lesson_progress::Entity::find()
            .filter(lesson_progress::Column::UserId.eq(user_id))
            .filter(lesson_progress::Column::Completed.eq(true))
            .order_by_desc(lesson_progress::Column::CompletedAt)
            .limit(limit)
            .all(db)
            .await?;
        Ok(rows)
    }
}
