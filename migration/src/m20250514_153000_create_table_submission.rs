use sea_orm_migration::prelude::{extension::postgres::Type, *};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("submission_status"))
                    .values([
                        Alias::new("Pending"),
                        Alias::new("UnderReview"),
                        Alias::new("Approved"),
                        Alias::new("Rejected"),
                        Alias::new("Resubmit"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Submission::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submission::SubmissionId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Submission::UserId).uuid().not_null())
                    .col(ColumnDef::new(Submission::LessonId).uuid().not_null())
                    .col(ColumnDef::new(Submission::Content).text().not_null())
                    .col(ColumnDef::new(Submission::FileUrl).string().null())
                    .col(
                        ColumnDef::new(Submission::Status)
                            .enumeration(
                                Alias::new("submission_status"),
                                [
                                    Alias::new("Pending"),
                                    Alias::new("UnderReview"),
                                    Alias::new("Approved"),
                                    Alias::new("Rejected"),
                                    Alias::new("Resubmit"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submission::MentorFeedback).text().null())
                    .col(ColumnDef::new(Submission::Grade).string().null())
                    .col(
                        ColumnDef::new(Submission::SubmittedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(ColumnDef::new(Submission::ReviewedAt).timestamp().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submission_user")
                            .from_tbl(Submission::Table)
                            .from_col(Submission::UserId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submission_lesson")
                            .from_tbl(Submission::Table)
                            .from_col(Submission::LessonId)
                            .to_tbl(Lesson::Table)
                            .to_col(Lesson::LessonId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submission_user_lesson")
                    .table(Submission::Table)
                    .col(Submission::UserId)
                    .col(Submission::LessonId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submission_status")
                    .table(Submission::Table)
                    .col(Submission::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_submission_status")
                    .table(Submission::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_submission_user_lesson")
                    .table(Submission::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Submission::Table).to_owned())
            .await?;

        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("submission_status"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Submission {
    Table,
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

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum Lesson {
    Table,
    LessonId,
}
