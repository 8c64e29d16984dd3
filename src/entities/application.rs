//! `SeaORM` Entity for application table

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ApplicationStatus, PaymentStatus};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "application"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub application_id: Uuid,
    pub user_id: Uuid,
    pub internship_id: Uuid,
    pub status: ApplicationStatus,
    pub eligibility_score: Option<i32>,
    pub interview_score: Option<i32>,
    pub mentor_id: Option<Uuid>,
    pub payment_status: PaymentStatus,
    pub payment_order_id: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    ApplicationId,
    UserId,
    InternshipId,
    Status,
    EligibilityScore,
    InterviewScore,
    MentorId,
    PaymentStatus,
    PaymentOrderId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    ApplicationId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Internship,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::ApplicationId => ColumnType::Uuid.def(),
            Self::UserId => ColumnType::Uuid.def(),
            Self::InternshipId => ColumnType::Uuid.def(),
            Self::Status => ApplicationStatus::db_type(),
            Self::EligibilityScore => ColumnType::Integer.def().null(),
            Self::InterviewScore => ColumnType::Integer.def().null(),
            Self::MentorId => ColumnType::Uuid.def().null(),
            Self::PaymentStatus => PaymentStatus::db_type(),
            Self::PaymentOrderId => ColumnType::String(StringLen::None).def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::User => Entity::belongs_to(super::user::Entity)
                .from(Column::UserId)
                .to(super::user::Column::UserId)
                .into(),
            Self::Internship => Entity::belongs_to(super::internship::Entity)
                .from(Column::InternshipId)
                .to(super::internship::Column::InternshipId)
                .into(),
        }
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::internship::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Internship.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
