use sea_orm_migration::prelude::{extension::postgres::Type, *};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("application_status"))
                    .values([
                        Alias::new("Pending"),
                        Alias::new("EligibilityPassed"),
                        Alias::new("InterviewPassed"),
                        Alias::new("Enrolled"),
                        Alias::new("InProgress"),
                        Alias::new("Completed"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("payment_status"))
                    .values([
                        Alias::new("Pending"),
                        Alias::new("Paid"),
                        Alias::new("Failed"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Application::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Application::ApplicationId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Application::UserId).uuid().not_null())
                    .col(ColumnDef::new(Application::InternshipId).uuid().not_null())
                    .col(
                        ColumnDef::new(Application::Status)
                            .enumeration(
                                Alias::new("application_status"),
                                [
                                    Alias::new("Pending"),
                                    Alias::new("EligibilityPassed"),
                                    Alias::new("InterviewPassed"),
                                    Alias::new("Enrolled"),
                                    Alias::new("InProgress"),
                                    Alias::new("Completed"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Application::EligibilityScore)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Application::InterviewScore).integer().null())
                    .col(ColumnDef::new(Application::MentorId).uuid().null())
                    .col(
                        ColumnDef::new(Application::PaymentStatus)
                            .enumeration(
                                Alias::new("payment_status"),
                                [
                                    Alias::new("Pending"),
                                    Alias::new("Paid"),
                                    Alias::new("Failed"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Application::PaymentOrderId).string().null())
                    .col(
                        ColumnDef::new(Application::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Application::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_user")
                            .from_tbl(Application::Table)
                            .from_col(Application::UserId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_internship")
                            .from_tbl(Application::Table)
                            .from_col(Application::InternshipId)
                            .to_tbl(Internship::Table)
                            .to_col(Internship::InternshipId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_mentor")
                            .from_tbl(Application::Table)
                            .from_col(Application::MentorId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One application per user per internship
        manager
            .create_index(
                Index::create()
                    .name("idx_application_user_internship")
                    .table(Application::Table)
                    .col(Application::UserId)
                    .col(Application::InternshipId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_application_status")
                    .table(Application::Table)
                    .col(Application::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_application_status")
                    .table(Application::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_application_user_internship")
                    .table(Application::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Application::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(Alias::new("payment_status")).to_owned())
            .await?;

        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("application_status"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Application {
    Table,
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

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum Internship {
    Table,
    InternshipId,
}
