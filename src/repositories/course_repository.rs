use crate::entities::{course, course_module};
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DeleteResult, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

pub struct CourseRepository;

impl CourseRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, course_id: Uuid) -> Result<Option<course::Model>> {
        let db = self.get_connection();
        let course = course::Entity::find_by_id(course_id).one(db).await?;
        Ok(course)
    }

    pub async fn find_by_internship(&self, internship_id: Uuid) -> Result<Vec<course::Model>> {
        let db = self.get_connection();
        let courses = course::Entity::find()
            .filter(course::Column::InternshipId.eq(internship_id))
            .order_by_asc(course::Column::SortOrder)
            .all(db)
            .await?;
        Ok(courses)
    }

    pub async fn create(
        &self,
        internship_id: Uuid,
        title: String,
        sort_order: i32,
    ) -> Result<course::Model> {
        let db = self.get_connection();
        let now = chrono::Utc::now().naive_utc();
        let model = course::ActiveModel {
            course_id: Set(Uuid::new_v4()),
            internship_id: Set(internship_id),
            title: Set(title),
            sort_order: Set(sort_order),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    pub async fn update(
        &self,
        course_id: Uuid,
        title: Option<String>,
        sort_order: Option<i32>,
    ) -> Result<course::Model> {
        let course = self
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Course not found"))?;
        let db = self.get_connection();

        let mut active: course::ActiveModel = course.into();
        if let Some(title) = title {
            active.title = Set(title);
        }
        if let Some(sort_order) = sort_order {
            active.sort_order = Set(sort_order);
        }
        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let result = active.update(db).await?;
        Ok(result)
    }

    pub async fn delete(&self, course_id: Uuid) -> Result<DeleteResult> {
        let db = self.get_connection();
        let result = course::Entity::delete_by_id(course_id).exec(db).await?;
        Ok(result)
    }

    pub async fn find_module_by_id(&self, module_id: Uuid) -> Result<Option<course_module::Model>> {
        let db = self.get_connection();
        let module = course_module::Entity::find_by_id(module_id).one(db).await?;
        Ok(module)
    }

    pub async fn find_modules_by_course(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<course_module::Model>> {
        let db = self.get_connection();
        let modules = course_module::Entity::find()
            .filter(course_module::Column::CourseId.eq(course_id))
            .order_by_asc(course_module::Column::SortOrder)
            .all(db)
            .await?;
        Ok(modules)
    }

    pub async fn create_module(
        &self,
        course_id: Uuid,
        title: String,
        sort_order: i32,
    ) -> Result<course_module::Model> {
        let db = self.get_connection();
        let now = chrono::Utc::now().naive_utc();
        let model = course_module::ActiveModel {
            module_id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            title: Set(title),
            sort_order: Set(sort_order),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    pub async fn delete_module(&self, module_id: Uuid) -> Result<DeleteResult> {
        let db = self.get_connection();
        let result = course_module::Entity::delete_by_id(module_id)
            .exec(db)
            .await?;
        Ok(result)
    }
}
