use crate::entities::application;
use crate::entities::sea_orm_active_enums::{ApplicationStatus, PaymentStatus};
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

pub struct ApplicationRepository;

impl ApplicationRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, application_id: Uuid) -> Result<Option<application::Model>> {
        let db = self.get_connection();
        let application = application::Entity::find_by_id(application_id)
            .one(db)
            .await?;
        Ok(application)
    }

    pub async fn find_by_user_and_internship(
        &self,
        user_id: Uuid,
        internship_id: Uuid,
    ) -> Result<Option<application::Model>> {
        let db = self.get_connection();
        let application = application::Entity::find()
            .filter(application::Column::UserId.eq(user_id))
            .filter(application::Column::InternshipId.eq(internship_id))
            .one(db)
            .await?;
        Ok(application)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<application::Model>> {
        let db = self.get_connection();
        let applications = application::Entity::find()
            .filter(application::Column::UserId.eq(user_id))
            .order_by_desc(application::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(applications)
    }

    pub async fn find_all_with_pagination(
        &self,
        page: u32,
        page_size: u32,
        status_filter: Option<ApplicationStatus>,
    ) -> Result<(Vec<application::Model>, u64)> {
        let db = self.get_connection();
        let mut query = application::Entity::find();

        if let Some(status) = status_filter {
            query = query.filter(application::Column::Status.eq(status));
        }

        let total = query.clone().count(db).await?;

        let offset = (page - 1) * page_size;
        let applications = query
            .order_by_desc(application::Column::CreatedAt)
            .limit(page_size as u64)
            .offset(offset as u64)
            .all(db)
            .await?;

        Ok((applications, total))
    }

    pub async fn create(&self, user_id: Uuid, internship_id: Uuid) -> Result<application::Model> {
        let db = self.get_connection();
        let now = chrono::Utc::now().naive_utc();
        let model = application::ActiveModel {
            application_id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            internship_id: Set(internship_id),
            status: Set(ApplicationStatus::Pending),
            eligibility_score: Set(None),
            interview_score: Set(None),
            mentor_id: Set(None),
            payment_status: Set(PaymentStatus::Pending),
            payment_order_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    /// Create directly in Enrolled state (bulk CSV enrollment path)
    pub async fn create_enrolled(
        &self,
        user_id: Uuid,
        internship_id: Uuid,
    ) -> Result<application::Model> {
        let db = self.get_connection();
        let now = chrono::Utc::now().naive_utc();
        let model = application::ActiveModel {
            application_id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            internship_id: Set(internship_id),
            status: Set(ApplicationStatus::Enrolled),
            eligibility_score: Set(None),
            interview_score: Set(None),
            mentor_id: Set(None),
            payment_status: Set(PaymentStatus::Paid),
            payment_order_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    pub async fn set_eligibility_result(
        &self,
        application_id: Uuid,
        score: i32,
        passed: bool,
    ) -> Result<application::Model> {
        let application = self
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Application not found"))?;
        let db = self.get_connection();

        let was_pending = application.status == ApplicationStatus::Pending;
        let mut active: application::ActiveModel = application.into();
        active.eligibility_score = Set(Some(score));
        if passed && was_pending {
            active.status = Set(ApplicationStatus::EligibilityPassed);
        }
        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let result = active.update(db).await?;
        Ok(result)
    }

    pub async fn set_interview_result(
        &self,
        application_id: Uuid,
        score: i32,
        passed: bool,
    ) -> Result<application::Model> {
        let application = self
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Application not found"))?;
        let db = self.get_connection();

        let was_eligible = application.status == ApplicationStatus::EligibilityPassed;
        let mut active: application::ActiveModel = application.into();
        active.interview_score = Set(Some(score));
        if passed && was_eligible {
            active.status = Set(ApplicationStatus::InterviewPassed);
        }
        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let result = active.update(db).await?;
        Ok(result)
    }

    pub async fn set_payment_order(
        &self,
        application_id: Uuid,
        order_id: String,
    ) -> Result<application::Model> {
        let application = self
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Application not found"))?;
        let db = self.get_connection();

        let mut active: application::ActiveModel = application.into();
        active.payment_order_id = Set(Some(order_id));
        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let result = active.update(db).await?;
        Ok(result)
    }

    pub async fn mark_paid_and_enrolled(
        &self,
        application_id: Uuid,
    ) -> Result<application::Model> {
        let application = self
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Application not found"))?;
        let db = self.get_connection();

        let mut active: application::ActiveModel = application.into();
        active.payment_status = Set(PaymentStatus::Paid);
        active.status = Set(ApplicationStatus::Enrolled);
        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let result = active.update(db).await?;
        Ok(result)
    }

    pub async fn mark_payment_failed(&self, application_id: Uuid) -> Result<application::Model> {
        let application = self
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Application not found"))?;
        let db = self.get_connection();

        let mut active: application::ActiveModel = application.into();
        active.payment_status = Set(PaymentStatus::Failed);
        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let result = active.update(db).await?;
        Ok(result)
    }

    pub async fn assign_mentor(
        &self,
        application_id: Uuid,
        mentor_id: Uuid,
    ) -> Result<application::Model> {
        let application = self
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Application not found"))?;
        let db = self.get_connection();

        let mut active: application::ActiveModel = application.into();
        active.mentor_id = Set(Some(mentor_id));
        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let result = active.update(db).await?;
        Ok(result)
    }

    /// Flips Enrolled to InProgress on first lesson activity. Conditional on
    /// the current status, so repeated calls and concurrent completions are
    /// harmless no-ops.
    pub async fn mark_in_progress_if_enrolled(
        &self,
        user_id: Uuid,
        internship_id: Uuid,
    ) -> Result<()> {
        let db = self.get_connection();
        let now = chrono::Utc::now().naive_utc();
        application::Entity::update_many()
            .col_expr(
                application::Column::Status,
                Expr::value(ApplicationStatus::InProgress),
            )
            .col_expr(application::Column::UpdatedAt, Expr::value(now))
            .filter(application::Column::UserId.eq(user_id))
            .filter(application::Column::InternshipId.eq(internship_id))
            .filter(application::Column::Status.eq(ApplicationStatus::Enrolled))
            .exec(db)
            .await?;
        Ok(())
    }

    pub async fn count_by_status(&self, status: ApplicationStatus) -> Result<u64> {
        let db = self.get_connection();
        let count = application::Entity::find()
            .filter(application::Column::Status.eq(status))
            .count(db)
            .await?;
        Ok(count)
    }

    pub async fn find_paid(&self) -> Result<Vec<application::Model>> {
        let db = self.get_connection();
        let applications = application::Entity::find()
            .filter(application::Column::PaymentStatus.eq(PaymentStatus::Paid))
            .all(db)
            .await?;
        Ok(applications)
    }
}
