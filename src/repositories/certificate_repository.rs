use crate::entities::certificate;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DeleteResult, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

pub struct CertificateRepository;

impl CertificateRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, certificate_id: Uuid) -> Result<Option<certificate::Model>> {
        let db = self.get_connection();
        let certificate = certificate::Entity::find_by_id(certificate_id)
            .one(db)
            .await?;
        Ok(certificate)
    }

    /// Lookup by verification code. Codes are stored uppercase and the
    /// public route accepts any casing.
    pub async fn find_by_code(&self, unique_code: &str) -> Result<Option<certificate::Model>> {
        let db = self.get_connection();
        let certificate = certificate::Entity::find()
            .filter(certificate::Column::UniqueCode.eq(unique_code.to_ascii_uppercase()))
            .one(db)
            .await?;
        Ok(certificate)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<certificate::Model>> {
        let db = self.get_connection();
        let certificates = certificate::Entity::find()
            .filter(certificate::Column::UserId.eq(user_id))
            .order_by_desc(certificate::Column::IssuedAt)
            .all(db)
            .await?;
        Ok(certificates)
    }

    pub async fn find_by_application(
        &self,
        application_id: Uuid,
    ) -> Result<Option<certificate::Model>> {
        let db = self.get_connection();
        let certificate = certificate::Entity::find()
            .filter(certificate::Column::ApplicationId.eq(application_id))
            .one(db)
            .await?;
        Ok(certificate)
    }

    /// Admin revocation is a hard delete, not a status flag
    pub async fn delete(&self, certificate_id: Uuid) -> Result<DeleteResult> {
        let db = self.get_connection();
        let result = certificate::Entity::delete_by_id(certificate_id)
            .exec(db)
            .await?;
        Ok(result)
    }

    pub async fn count(&self) -> Result<u64> {
        let db = self.get_connection();
        let count = certificate::Entity::find().count(db).await?;
        Ok(count)
    }
}
