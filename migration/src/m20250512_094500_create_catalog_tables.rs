use sea_orm_migration::prelude::{extension::postgres::Type, *};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("track_enum"))
                    .values([
                        Alias::new("FullStack"),
                        Alias::new("AiMl"),
                        Alias::new("Web3"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("lesson_type"))
                    .values([
                        Alias::new("Video"),
                        Alias::new("Reading"),
                        Alias::new("Quiz"),
                        Alias::new("Task"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Internship::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Internship::InternshipId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Internship::Title).string().not_null())
                    .col(
                        ColumnDef::new(Internship::Track)
                            .enumeration(
                                Alias::new("track_enum"),
                                [
                                    Alias::new("FullStack"),
                                    Alias::new("AiMl"),
                                    Alias::new("Web3"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Internship::Price).big_integer().not_null())
                    .col(
                        ColumnDef::new(Internship::DurationWeeks)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Internship::Description).text().not_null())
                    .col(
                        ColumnDef::new(Internship::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Internship::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Internship::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Course::CourseId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Course::InternshipId).uuid().not_null())
                    .col(ColumnDef::new(Course::Title).string().not_null())
                    .col(
                        ColumnDef::new(Course::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Course::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Course::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_internship")
                            .from_tbl(Course::Table)
                            .from_col(Course::InternshipId)
                            .to_tbl(Internship::Table)
                            .to_col(Internship::InternshipId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseModule::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseModule::ModuleId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(CourseModule::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseModule::Title).string().not_null())
                    .col(
                        ColumnDef::new(CourseModule::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseModule::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(CourseModule::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_module_course")
                            .from_tbl(CourseModule::Table)
                            .from_col(CourseModule::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Lesson::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lesson::LessonId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Lesson::ModuleId).uuid().not_null())
                    .col(ColumnDef::new(Lesson::Title).string().not_null())
                    .col(
                        ColumnDef::new(Lesson::LessonType)
                            .enumeration(
                                Alias::new("lesson_type"),
                                [
                                    Alias::new("Video"),
                                    Alias::new("Reading"),
                                    Alias::new("Quiz"),
                                    Alias::new("Task"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Lesson::Content).text().null())
                    .col(ColumnDef::new(Lesson::VideoUrl).string().null())
                    .col(
                        ColumnDef::new(Lesson::DurationMinutes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Lesson::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Lesson::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Lesson::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_course_module")
                            .from_tbl(Lesson::Table)
                            .from_col(Lesson::ModuleId)
                            .to_tbl(CourseModule::Table)
                            .to_col(CourseModule::ModuleId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_internship_id")
                    .table(Course::Table)
                    .col(Course::InternshipId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_module_course_id")
                    .table(CourseModule::Table)
                    .col(CourseModule::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_module_id")
                    .table(Lesson::Table)
                    .col(Lesson::ModuleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lesson::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseModule::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Internship::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(Alias::new("lesson_type")).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(Alias::new("track_enum")).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Internship {
    Table,
    InternshipId,
    Title,
    Track,
    Price,
    DurationWeeks,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Course {
    Table,
    CourseId,
    InternshipId,
    Title,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CourseModule {
    Table,
    ModuleId,
    CourseId,
    Title,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Lesson {
    Table,
    LessonId,
    ModuleId,
    Title,
    LessonType,
    Content,
    VideoUrl,
    DurationMinutes,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}
