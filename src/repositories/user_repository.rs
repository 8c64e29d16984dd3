use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::user;
use crate::static_service::DATABASE_CONNECTION;
use crate::utils::streak::next_streak;
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<user::Model>> {
        let db = self.get_connection();
        let user = user::Entity::find_by_id(user_id)
            .filter(user::Column::DeletedAt.is_null())
            .one(db)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        let db = self.get_connection();
        let user = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .one(db)
            .await?;
        Ok(user)
    }

    pub async fn find_all_with_pagination(
        &self,
        page: u32,
        page_size: u32,
        role_filter: Option<RoleEnum>,
        search: Option<String>,
    ) -> Result<(Vec<user::Model>, u64)> {
        let db = self.get_connection();
        let mut query = user::Entity::find().filter(user::Column::DeletedAt.is_null());

        if let Some(role) = role_filter {
            query = query.filter(user::Column::Role.eq(role));
        }

        // Search by name or email
        if let Some(search_term) = search {
            let search_pattern = format!("%{}%", search_term);
            query = query.filter(
                user::Column::FirstName
                    .contains(&search_pattern)
                    .or(user::Column::LastName.contains(&search_pattern))
                    .or(user::Column::Email.contains(&search_pattern)),
            );
        }

        let total = query.clone().count(db).await?;

        let offset = (page - 1) * page_size;
        let users = query
            .order_by_desc(user::Column::CreateAt)
            .limit(page_size as u64)
            .offset(offset as u64)
            .all(db)
            .await?;

        Ok((users, total))
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        first_name: String,
        last_name: String,
        email: String,
        password: String,
        role: RoleEnum,
        referral_code: String,
    ) -> Result<user::Model> {
        let db = self.get_connection();
        let now = chrono::Utc::now().naive_utc();
        let user_model = user::ActiveModel {
            user_id: Set(user_id),
            first_name: Set(first_name),
            last_name: Set(last_name),
            email: Set(email),
            password: Set(password),
            role: Set(role),
            learning_streak: Set(0),
            last_active_at: Set(None),
            total_time_spent_minutes: Set(0),
            referral_code: Set(referral_code),
            deleted_at: Set(None),
            create_at: Set(now),
            update_at: Set(now),
        };

        let result = user_model.insert(db).await?;
        Ok(result)
    }

    pub async fn update(&self, user_id: Uuid, updates: UserUpdate) -> Result<user::Model> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found"))?;
        let db = self.get_connection();

        let mut active_user: user::ActiveModel = user.into();
        let now = chrono::Utc::now().naive_utc();

        if let Some(first_name) = updates.first_name {
            active_user.first_name = Set(first_name);
        }
        if let Some(last_name) = updates.last_name {
            active_user.last_name = Set(last_name);
        }
        if let Some(email) = updates.email {
            active_user.email = Set(email);
        }
        if let Some(password) = updates.password {
            active_user.password = Set(password);
        }
        if let Some(role) = updates.role {
            active_user.role = Set(role);
        }

        active_user.update_at = Set(now);

        let result = active_user.update(db).await?;
        Ok(result)
    }

    /// Soft delete user by setting deleted_at timestamp
    pub async fn soft_delete(&self, user_id: Uuid) -> Result<user::Model> {
        let db = self.get_connection();
        let user = user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found"))?;

        let mut active_user: user::ActiveModel = user.into();
        let now = chrono::Utc::now().naive_utc();

        active_user.deleted_at = Set(Some(now));
        active_user.update_at = Set(now);

        let result = active_user.update(db).await?;
        Ok(result)
    }

    /// Updates the learning streak for a dashboard visit.
    ///
    /// The write is conditional on the previously observed `last_active_at`
    /// so concurrent visits cannot clobber each other; exactly one wins and
    /// the loser skips the update.
    pub async fn touch_streak(&self, user_id: Uuid) -> Result<user::Model> {
        let db = self.get_connection();
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found"))?;

        let now = chrono::Utc::now().naive_utc();
        let Some(next) = next_streak(user.last_active_at, now, user.learning_streak) else {
            return Ok(user);
        };

        let mut update = user::Entity::update_many()
            .col_expr(user::Column::LearningStreak, Expr::value(next))
            .col_expr(user::Column::LastActiveAt, Expr::value(now))
            .col_expr(user::Column::UpdateAt, Expr::value(now))
            .filter(user::Column::UserId.eq(user_id));

        update = match user.last_active_at {
            Some(prev) => update.filter(user::Column::LastActiveAt.eq(prev)),
            None => update.filter(user::Column::LastActiveAt.is_null()),
        };

        let result = update.exec(db).await?;
        if result.rows_affected == 0 {
            tracing::debug!(
                "Streak update for user {} lost the race to a concurrent visit, skipping",
                user_id
            );
            let refreshed = self.find_by_id(user_id).await?;
            return Ok(refreshed.unwrap_or(user));
        }

        Ok(user::Model {
            learning_streak: next,
            last_active_at: Some(now),
            update_at: now,
            ..user
        })
    }

    /// Atomic increment, no read-modify-write
    pub async fn add_time_spent(&self, user_id: Uuid, minutes: i64) -> Result<()> {
        let db = self.get_connection();
        user::Entity::update_many()
            .col_expr(
                user::Column::TotalTimeSpentMinutes,
                Expr::col(user::Column::TotalTimeSpentMinutes).add(minutes),
            )
            .filter(user::Column::UserId.eq(user_id))
            .exec(db)
            .await?;
        Ok(())
    }

    pub async fn update_password(&self, user_id: Uuid, hashed_password: String) -> Result<()> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found"))?;
        let db = self.get_connection();

        let mut active_user: user::ActiveModel = user.into();
        active_user.password = Set(hashed_password);
        active_user.update_at = Set(chrono::Utc::now().naive_utc());
        active_user.update(db).await?;

        Ok(())
    }

    pub async fn count_by_role(&self, role: RoleEnum) -> Result<u64> {
        let db = self.get_connection();
        let count = user::Entity::find()
            .filter(user::Column::DeletedAt.is_null())
            .filter(user::Column::Role.eq(role))
            .count(db)
            .await?;
        Ok(count)
    }
}

#[derive(Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<RoleEnum>,
}
