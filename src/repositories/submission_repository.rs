use crate::entities::sea_orm_active_enums::SubmissionStatus;
use crate::entities::submission;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

pub struct SubmissionRepository;

impl SubmissionRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, submission_id: Uuid) -> Result<Option<submission::Model>> {
        let db = self.get_connection();
        let submission = submission::Entity::find_by_id(submission_id).one(db).await?;
        Ok(submission)
    }

    pub async fn find_by_user_and_lesson(
        &self,
        user_id: Uuid,
        lesson_id: Uuid,
    ) -> Result<Option<submission::Model>> {
        let db = self.get_connection();
        let submission = submission::Entity::find()
            .filter(submission::Column::UserId.eq(user_id))
            .filter(submission::Column::LessonId.eq(lesson_id))
            .one(db)
            .await?;
        Ok(submission)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<submission::Model>> {
        let db = self.get_connection();
        let submissions = submission::Entity::find()
            .filter(submission::Column::UserId.eq(user_id))
            .order_by_desc(submission::Column::SubmittedAt)
            .all(db)
            .await?;
        Ok(submissions)
    }

    pub async fn find_all_with_pagination(
        &self,
        page: u32,
        page_size: u32,
        status_filter: Option<SubmissionStatus>,
    ) -> Result<(Vec<submission::Model>, u64)> {
        let db = self.get_connection();
        let mut query = submission::Entity::find();

        if let Some(status) = status_filter {
            query = query.filter(submission::Column::Status.eq(status));
        }

        let total = query.clone().count(db).await?;

        let offset = (page - 1) * page_size;
        let submissions = query
            .order_by_asc(submission::Column::SubmittedAt)
            .limit(page_size as u64)
            .offset(offset as u64)
            .all(db)
            .await?;

        Ok((submissions, total))
    }

    /// Creates the submission, or overwrites content on resubmission after
    /// Rejected/Resubmit and loops the status back to Pending.
    pub async fn submit(
        &self,
        user_id: Uuid,
        lesson_id: Uuid,
        content: String,
        file_url: Option<String>,
    ) -> Result<submission::Model> {
        let db = self.get_connection();
        let now = chrono::Utc::now().naive_utc();

        if let Some(existing) = self.find_by_user_and_lesson(user_id, lesson_id).await? {
            let mut active: submission::ActiveModel = existing.into();
            active.content = Set(content);
            active.file_url = Set(file_url);
            active.status = Set(SubmissionStatus::Pending);
            active.mentor_feedback = Set(None);
            active.grade = Set(None);
            active.submitted_at = Set(now);
            active.reviewed_at = Set(None);

            let result = active.update(db).await?;
            return Ok(result);
        }

        let model = submission::ActiveModel {
            submission_id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            lesson_id: Set(lesson_id),
            content: Set(content),
            file_url: Set(file_url),
            status: Set(SubmissionStatus::Pending),
            mentor_feedback: Set(None),
            grade: Set(None),
            submitted_at: Set(now),
            reviewed_at: Set(None),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    pub async fn update_review(
        &self,
        submission_id: Uuid,
        status: SubmissionStatus,
        mentor_feedback: Option<String>,
        grade: Option<String>,
    ) -> Result<submission::Model> {
        let submission = self
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Submission not found"))?;
        let db = self.get_connection();

        let mut active: submission::ActiveModel = submission.into();
        active.status = Set(status);
        if let Some(feedback) = mentor_feedback {
            active.mentor_feedback = Set(Some(feedback));
        }
        if let Some(grade) = grade {
            active.grade = Set(Some(grade));
        }
        active.reviewed_at = Set(Some(chrono::Utc::now().naive_utc()));

        let result = active.update(db).await?;
        Ok(result)
    }
}
