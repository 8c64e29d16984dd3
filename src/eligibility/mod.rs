//! Course-completion eligibility evaluation and certificate issuance.
//!
//! Runs after a task submission is approved or a lesson is marked complete.
//! Callers treat it as best-effort: failures are logged and never surfaced
//! to the client, but every no-op branch reports a distinct outcome so the
//! logs can tell "not finished yet" apart from "application state drifted".

pub mod issuer;
pub mod trigger;

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::collections::HashSet;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{ApplicationStatus, LessonType};
use crate::entities::{application, certificate, course, course_module, lesson, lesson_progress};

pub use issuer::{IssueResult, issue_certificate};

#[derive(Debug)]
pub enum EligibilityOutcome {
    CourseNotFound,
    /// No task lessons under the course; nothing can gate completion and
    /// this path never issues.
    NoGatingLessons,
    Incomplete {
        completed: usize,
        required: usize,
    },
    /// Gating lessons are all complete but no Enrolled/InProgress
    /// application exists (already Completed, or progress and application
    /// state drifted apart).
    NoActiveApplication,
    AlreadyIssued,
    Issued(certificate::Model),
}

/// Decides whether all task lessons of the course are complete for the user
/// and, if so, issues a certificate and completes the owning application.
pub async fn evaluate_course_completion(
    db: &DatabaseConnection,
    user_id: Uuid,
    course_id: Uuid,
) -> Result<EligibilityOutcome> {
    let Some(course) = course::Entity::find_by_id(course_id).one(db).await? else {
        tracing::warn!("Eligibility check requested for unknown course {}", course_id);
        return Ok(EligibilityOutcome::CourseNotFound);
    };

    let module_ids: Vec<Uuid> = course_module::Entity::find()
        .filter(course_module::Column::CourseId.eq(course_id))
        .all(db)
        .await?
        .into_iter()
        .map(|m| m.module_id)
        .collect();

    if module_ids.is_empty() {
        tracing::info!("Course {} has no modules, nothing gates completion", course_id);
        return Ok(EligibilityOutcome::NoGatingLessons);
    }

    let gating_lesson_ids: Vec<Uuid> = lesson::Entity::find()
        .filter(lesson::Column::ModuleId.is_in(module_ids))
        .filter(lesson::Column::LessonType.eq(LessonType::Task))
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.lesson_id)
        .collect();

    if gating_lesson_ids.is_empty() {
        tracing::info!(
            "Course {} has no task lessons, nothing gates completion",
            course_id
        );
        return Ok(EligibilityOutcome::NoGatingLessons);
    }

    let completed: HashSet<Uuid> = lesson_progress::Entity::find()
        .filter(lesson_progress::Column::UserId.eq(user_id))
        .filter(lesson_progress::Column::LessonId.is_in(gating_lesson_ids.clone()))
        .filter(lesson_progress::Column::Completed.eq(true))
        .all(db)
        .await?
        .into_iter()
        .map(|p| p.lesson_id)
        .collect();

    let required = gating_lesson_ids.len();
    if completed.len() < required {
        return Ok(EligibilityOutcome::Incomplete {
            completed: completed.len(),
            required,
        });
    }

    let Some(app) = application::Entity::find()
        .filter(application::Column::UserId.eq(user_id))
        .filter(application::Column::InternshipId.eq(course.internship_id))
        .filter(application::Column::Status.is_in([
            ApplicationStatus::Enrolled,
            ApplicationStatus::InProgress,
        ]))
        .one(db)
        .await?
    else {
        tracing::warn!(
            "All {} gating lessons complete for user {} in course {} but no enrolled application exists",
            required,
            user_id,
            course_id
        );
        return Ok(EligibilityOutcome::NoActiveApplication);
    };

    match issuer::issue_certificate(db, app.application_id, user_id).await? {
        IssueResult::AlreadyIssued => Ok(EligibilityOutcome::AlreadyIssued),
        IssueResult::Issued(issued) => {
            let mut active: application::ActiveModel = app.into();
            active.status = Set(ApplicationStatus::Completed);
            active.updated_at = Set(chrono::Utc::now().naive_utc());
            active.update(db).await?;

            tracing::info!(
                "Issued certificate {} for user {} in course {}",
                issued.unique_code,
                user_id,
                course_id
            );
            Ok(EligibilityOutcome::Issued(issued))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::PaymentStatus;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn ts() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn course_model(course_id: Uuid, internship_id: Uuid) -> course::Model {
        course::Model {
            course_id,
            internship_id,
            title: "Backend Fundamentals".to_string(),
            sort_order: 1,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn module_model(module_id: Uuid, course_id: Uuid) -> course_module::Model {
        course_module::Model {
            module_id,
            course_id,
            title: "HTTP Basics".to_string(),
            sort_order: 1,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn task_lesson(lesson_id: Uuid, module_id: Uuid) -> lesson::Model {
        lesson::Model {
            lesson_id,
            module_id,
            title: "Build a REST endpoint".to_string(),
            lesson_type: LessonType::Task,
            content: None,
            video_url: None,
            duration_minutes: 60,
            sort_order: 1,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn completed_progress(user_id: Uuid, lesson_id: Uuid) -> lesson_progress::Model {
        lesson_progress::Model {
            lesson_progress_id: Uuid::new_v4(),
            user_id,
            lesson_id,
            completed: true,
            completed_at: Some(ts()),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn application_model(
        application_id: Uuid,
        user_id: Uuid,
        internship_id: Uuid,
        status: ApplicationStatus,
    ) -> application::Model {
        application::Model {
            application_id,
            user_id,
            internship_id,
            status,
            eligibility_score: Some(80),
            interview_score: Some(75),
            mentor_id: None,
            payment_status: PaymentStatus::Paid,
            payment_order_id: Some("order_123".to_string()),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn certificate_model(application_id: Uuid, user_id: Uuid) -> certificate::Model {
        certificate::Model {
            certificate_id: Uuid::new_v4(),
            application_id,
            user_id,
            unique_code: "CERT-A1B2C3D4".to_string(),
            grade: "Pass".to_string(),
            issued_at: ts(),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    #[tokio::test]
    async fn all_gating_lessons_complete_issues_certificate_and_completes_application() {
        let user_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let internship_id = Uuid::new_v4();
        let module_id = Uuid::new_v4();
        let l1 = Uuid::new_v4();
        let l2 = Uuid::new_v4();
        let application_id = Uuid::new_v4();

        let app = application_model(application_id, user_id, internship_id, ApplicationStatus::Enrolled);
        let completed_app =
            application_model(application_id, user_id, internship_id, ApplicationStatus::Completed);
        let cert = certificate_model(application_id, user_id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course_model(course_id, internship_id)]])
            .append_query_results([vec![module_model(module_id, course_id)]])
            .append_query_results([vec![task_lesson(l1, module_id), task_lesson(l2, module_id)]])
            .append_query_results([vec![
                completed_progress(user_id, l1),
                completed_progress(user_id, l2),
            ]])
            .append_query_results([vec![app]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![cert.clone()]])
            .append_query_results([vec![completed_app]])
            .into_connection();

        let outcome = evaluate_course_completion(&db, user_id, course_id)
            .await
            .unwrap();

        match outcome {
            EligibilityOutcome::Issued(issued) => {
                assert_eq!(issued.application_id, application_id);
                assert_eq!(issued.unique_code, cert.unique_code);
            }
            other => panic!("Expected Issued, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn incomplete_gating_lessons_do_not_issue() {
        let user_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let internship_id = Uuid::new_v4();
        let module_id = Uuid::new_v4();
        let l1 = Uuid::new_v4();
        let l2 = Uuid::new_v4();

        // 1 of 2 task lessons complete - no certificate, no writes
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course_model(course_id, internship_id)]])
            .append_query_results([vec![module_model(module_id, course_id)]])
            .append_query_results([vec![task_lesson(l1, module_id), task_lesson(l2, module_id)]])
            .append_query_results([vec![completed_progress(user_id, l1)]])
            .into_connection();

        let outcome = evaluate_course_completion(&db, user_id, course_id)
            .await
            .unwrap();

        match outcome {
            EligibilityOutcome::Incomplete {
                completed,
                required,
            } => {
                assert_eq!(completed, 1);
                assert_eq!(required, 2);
            }
            other => panic!("Expected Incomplete, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn course_with_no_task_lessons_never_issues() {
        let user_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let internship_id = Uuid::new_v4();
        let module_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course_model(course_id, internship_id)]])
            .append_query_results([vec![module_model(module_id, course_id)]])
            .append_query_results([Vec::<lesson::Model>::new()])
            .into_connection();

        let outcome = evaluate_course_completion(&db, user_id, course_id)
            .await
            .unwrap();

        assert!(matches!(outcome, EligibilityOutcome::NoGatingLessons));
    }

    #[tokio::test]
    async fn course_with_no_modules_never_issues() {
        let user_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let internship_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course_model(course_id, internship_id)]])
            .append_query_results([Vec::<course_module::Model>::new()])
            .into_connection();

        let outcome = evaluate_course_completion(&db, user_id, course_id)
            .await
            .unwrap();

        assert!(matches!(outcome, EligibilityOutcome::NoGatingLessons));
    }

    #[tokio::test]
    async fn missing_enrolled_application_is_a_distinct_no_op() {
        let user_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let internship_id = Uuid::new_v4();
        let module_id = Uuid::new_v4();
        let l1 = Uuid::new_v4();

        // All gating lessons complete, but the application was deleted or is
        // already Completed - evaluator stops without error or insert
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course_model(course_id, internship_id)]])
            .append_query_results([vec![module_model(module_id, course_id)]])
            .append_query_results([vec![task_lesson(l1, module_id)]])
            .append_query_results([vec![completed_progress(user_id, l1)]])
            .append_query_results([Vec::<application::Model>::new()])
            .into_connection();

        let outcome = evaluate_course_completion(&db, user_id, course_id)
            .await
            .unwrap();

        assert!(matches!(outcome, EligibilityOutcome::NoActiveApplication));
    }

    #[tokio::test]
    async fn concurrent_issuance_loser_reports_already_issued() {
        let user_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let internship_id = Uuid::new_v4();
        let module_id = Uuid::new_v4();
        let l1 = Uuid::new_v4();
        let application_id = Uuid::new_v4();

        let app = application_model(application_id, user_id, internship_id, ApplicationStatus::InProgress);

        // ON CONFLICT (application_id) DO NOTHING swallowed the insert:
        // another issuance already landed
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course_model(course_id, internship_id)]])
            .append_query_results([vec![module_model(module_id, course_id)]])
            .append_query_results([vec![task_lesson(l1, module_id)]])
            .append_query_results([vec![completed_progress(user_id, l1)]])
            .append_query_results([vec![app]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let outcome = evaluate_course_completion(&db, user_id, course_id)
            .await
            .unwrap();

        assert!(matches!(outcome, EligibilityOutcome::AlreadyIssued));
    }

    #[tokio::test]
    async fn unknown_course_is_reported_without_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<course::Model>::new()])
            .into_connection();

        let outcome = evaluate_course_completion(&db, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();

        assert!(matches!(outcome, EligibilityOutcome::CourseNotFound));
    }
}
