use crate::entities::lesson;
use crate::entities::sea_orm_active_enums::LessonType;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DeleteResult, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

pub struct LessonRepository;

impl LessonRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, lesson_id: Uuid) -> Result<Option<lesson::Model>> {
        let db = self.get_connection();
        let lesson = lesson::Entity::find_by_id(lesson_id).one(db).await?;
        Ok(lesson)
    }

    pub async fn find_by_module(&self, module_id: Uuid) -> Result<Vec<lesson::Model>> {
        let db = self.get_connection();
        let lessons = lesson::Entity::find()
            .filter(lesson::Column::ModuleId.eq(module_id))
            .order_by_asc(lesson::Column::SortOrder)
            .all(db)
            .await?;
        Ok(lessons)
    }

    pub async fn find_by_modules(&self, module_ids: Vec<Uuid>) -> Result<Vec<lesson::Model>> {
        if module_ids.is_empty() {
            return Ok(Vec::new());
        }

        let db = self.get_connection();
        let lessons = lesson::Entity::find()
            .filter(lesson::Column::ModuleId.is_in(module_ids))
            .order_by_asc(lesson::Column::SortOrder)
            .all(db)
            .await?;
        Ok(lessons)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        module_id: Uuid,
        title: String,
        lesson_type: LessonType,
        content: Option<String>,
        video_url: Option<String>,
        duration_minutes: i32,
        sort_order: i32,
    ) -> Result<lesson::Model> {
        let db = self.get_connection();
        let now = chrono::Utc::now().naive_utc();
        let model = lesson::ActiveModel {
            lesson_id: Set(Uuid::new_v4()),
            module_id: Set(module_id),
            title: Set(title),
            lesson_type: Set(lesson_type),
            content: Set(content),
            video_url: Set(video_url),
            duration_minutes: Set(duration_minutes),
            sort_order: Set(sort_order),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    pub async fn update(&self, lesson_id: Uuid, updates: LessonUpdate) -> Result<lesson::Model> {
        let lesson = self
            .find_by_id(lesson_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Lesson not found"))?;
        let db = self.get_connection();

        let mut active: lesson::ActiveModel = lesson.into();

        if let Some(title) = updates.title {
            active.title = Set(title);
        }
        if let Some(lesson_type) = updates.lesson_type {
            active.lesson_type = Set(lesson_type);
        }
        if let Some(content) = updates.content {
            active.content = Set(Some(content));
        }
        if let Some(video_url) = updates.video_url {
            active.video_url = Set(Some(video_url));
        }
        if let Some(duration_minutes) = updates.duration_minutes {
            active.duration_minutes = Set(duration_minutes);
        }
        if let Some(sort_order) = updates.sort_order {
            active.sort_order = Set(sort_order);
        }

        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let result = active.update(db).await?;
        Ok(result)
    }

    pub async fn delete(&self, lesson_id: Uuid) -> Result<DeleteResult> {
        let db = self.get_connection();
        let result = lesson::Entity::delete_by_id(lesson_id).exec(db).await?;
        Ok(result)
    }
}

#[derive(Default)]
pub struct LessonUpdate {
    pub title: Option<String>,
    pub lesson_type: Option<LessonType>,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub sort_order: Option<i32>,
}
