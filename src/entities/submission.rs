//! `SeaORM` Entity for submission table

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::SubmissionStatus;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "submission"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub submission_id: Uuid,
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub content: String,
    pub file_url: Option<String>,
    pub status: SubmissionStatus,
    pub mentor_feedback: Option<String>,
    pub grade: Option<String>,
    pub submitted_at: DateTime,
    pub reviewed_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    SubmissionId,
    UserId,
    LessonId,
    Content,
    FileUrl,
    Status,
    MentorFeedback,
    Grade,
    SubmittedAt,
    ReviewedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    SubmissionId,
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
    Lesson,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::SubmissionId => ColumnType::Uuid.def(),
            Self::UserId => ColumnType::Uuid.def(),
            Self::LessonId => ColumnType::Uuid.def(),
            Self::Content => ColumnType::Text.def(),
            Self::FileUrl => ColumnType::String(StringLen::None).def().null(),
            Self::Status => SubmissionStatus::db_type(),
            Self::MentorFeedback => ColumnType::Text.def().null(),
            Self::Grade => ColumnType::String(StringLen::None).def().null(),
            Self::SubmittedAt => ColumnType::DateTime.def(),
            Self::ReviewedAt => ColumnType::DateTime.def().null(),
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
            Self::Lesson => Entity::belongs_to(super::lesson::Entity)
                .from(Column::LessonId)
                .to(super::lesson::Column::LessonId)
                .into(),
        }
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::lesson::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lesson.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
