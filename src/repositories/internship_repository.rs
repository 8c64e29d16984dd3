use crate::entities::internship;
use crate::entities::sea_orm_active_enums::TrackEnum;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DeleteResult, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct InternshipRepository;

impl InternshipRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, internship_id: Uuid) -> Result<Option<internship::Model>> {
        let db = self.get_connection();
        let internship = internship::Entity::find_by_id(internship_id).one(db).await?;
        Ok(internship)
    }

    pub async fn find_all(&self, active_only: bool) -> Result<Vec<internship::Model>> {
        let db = self.get_connection();
        let mut query = internship::Entity::find();

        if active_only {
            query = query.filter(internship::Column::IsActive.eq(true));
        }

        let internships = query
            .order_by_asc(internship::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(internships)
    }

    pub async fn create(
        &self,
        title: String,
        track: TrackEnum,
        price: i64,
        duration_weeks: i32,
        description: String,
    ) -> Result<internship::Model> {
        let db = self.get_connection();
        let now = chrono::Utc::now().naive_utc();
        let model = internship::ActiveModel {
            internship_id: Set(Uuid::new_v4()),
            title: Set(title),
            track: Set(track),
            price: Set(price),
            duration_weeks: Set(duration_weeks),
            description: Set(description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    pub async fn update(
        &self,
        internship_id: Uuid,
        updates: InternshipUpdate,
    ) -> Result<internship::Model> {
        let internship = self
            .find_by_id(internship_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Internship not found"))?;
        let db = self.get_connection();

        let mut active: internship::ActiveModel = internship.into();

        if let Some(title) = updates.title {
            active.title = Set(title);
        }
        if let Some(track) = updates.track {
            active.track = Set(track);
        }
        if let Some(price) = updates.price {
            active.price = Set(price);
        }
        if let Some(duration_weeks) = updates.duration_weeks {
            active.duration_weeks = Set(duration_weeks);
        }
        if let Some(description) = updates.description {
            active.description = Set(description);
        }
        if let Some(is_active) = updates.is_active {
            active.is_active = Set(is_active);
        }

        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let result = active.update(db).await?;
        Ok(result)
    }

    pub async fn delete(&self, internship_id: Uuid) -> Result<DeleteResult> {
        let db = self.get_connection();
        let result = internship::Entity::delete_by_id(internship_id)
            .exec(db)
            .await?;
        Ok(result)
    }

    pub async fn count_active(&self) -> Result<u64> {
        let db = self.get_connection();
        let count = internship::Entity::find()
            .filter(internship::Column::IsActive.eq(true))
            .count(db)
            .await?;
        Ok(count)
    }
}

#[derive(Default)]
pub struct InternshipUpdate {
    pub title: Option<String>,
    pub track: Option<TrackEnum>,
    pub price: Option<i64>,
    pub duration_weeks: Option<i32>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
