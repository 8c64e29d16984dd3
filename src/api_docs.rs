use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::entities::sea_orm_active_enums::{
    ApplicationStatus, LessonType, PaymentStatus, RoleEnum, SubmissionStatus, TrackEnum,
};
use crate::interview_service::ChatMessage;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::route::health_check,
        routes::auth::route::login,
        routes::auth::route::logout,
        routes::auth::route::change_password,
        routes::users::route::create_user,
        routes::users::route::get_users,
        routes::users::route::get_user,
        routes::users::route::update_user,
        routes::users::route::delete_user,
        routes::internships::route::get_internships,
        routes::internships::route::get_internship,
        routes::internships::route::create_internship,
        routes::internships::route::update_internship,
        routes::internships::route::delete_internship,
        routes::courses::route::create_course,
        routes::courses::route::get_course,
        routes::courses::route::get_internship_courses,
        routes::courses::route::update_course,
        routes::courses::route::delete_course,
        routes::courses::route::create_module,
        routes::courses::route::delete_module,
        routes::courses::route::create_lesson,
        routes::courses::route::update_lesson,
        routes::courses::route::delete_lesson,
        routes::applications::route::create_application,
        routes::applications::route::get_my_applications,
        routes::applications::route::get_all_applications,
        routes::applications::route::assign_mentor,
        routes::applications::route::submit_eligibility_test,
        routes::interview::route::interview_turn,
        routes::payments::route::create_order,
        routes::payments::route::verify_payment,
        routes::progress::route::complete_lesson,
        routes::progress::route::get_course_progress,
        routes::submissions::route::create_submission,
        routes::submissions::route::get_my_submissions,
        routes::submissions::route::get_all_submissions,
        routes::submissions::route::review_submission,
        routes::certificates::route::verify_certificate,
        routes::certificates::route::get_my_certificates,
        routes::certificates::route::download_certificate,
        routes::certificates::route::delete_certificate,
        routes::students::route::bulk_enroll,
        routes::students::route::get_bulk_progress,
        routes::dashboard::route::get_dashboard,
        routes::stats::route::get_overview_stats,
    ),
    components(schemas(
        RoleEnum,
        TrackEnum,
        ApplicationStatus,
        PaymentStatus,
        LessonType,
        SubmissionStatus,
        ChatMessage,
        routes::auth::dto::LoginRequest,
        routes::auth::dto::LoginResponse,
        routes::auth::dto::LogoutResponse,
        routes::auth::dto::ChangePasswordRequest,
        routes::auth::dto::ChangePasswordResponse,
        routes::users::dto::CreateUserRequest,
        routes::users::dto::UpdateUserRequest,
        routes::users::dto::UserDetailResponse,
        routes::users::dto::UserListResponse,
        routes::users::dto::DeleteUserResponse,
        routes::internships::dto::CreateInternshipRequest,
        routes::internships::dto::UpdateInternshipRequest,
        routes::internships::dto::InternshipResponse,
        routes::internships::dto::InternshipListResponse,
        routes::internships::dto::DeleteInternshipResponse,
        routes::courses::dto::CreateCourseRequest,
        routes::courses::dto::UpdateCourseRequest,
        routes::courses::dto::CreateModuleRequest,
        routes::courses::dto::CreateLessonRequest,
        routes::courses::dto::UpdateLessonRequest,
        routes::courses::dto::CourseResponse,
        routes::courses::dto::ModuleResponse,
        routes::courses::dto::LessonResponse,
        routes::courses::dto::CourseTreeResponse,
        routes::courses::dto::ModuleTreeResponse,
        routes::courses::dto::CourseListResponse,
        routes::courses::dto::DeleteResponse,
        routes::applications::dto::CreateApplicationRequest,
        routes::applications::dto::ApplicationResponse,
        routes::applications::dto::ApplicationListResponse,
        routes::applications::dto::AssignMentorRequest,
        routes::applications::dto::EligibilityAnswer,
        routes::applications::dto::EligibilityTestRequest,
        routes::applications::dto::EligibilityTestResponse,
        routes::interview::dto::InterviewTurnRequest,
        routes::interview::dto::InterviewTurnResponse,
        routes::payments::dto::CreateOrderRequest,
        routes::payments::dto::CreateOrderResponse,
        routes::payments::dto::VerifyPaymentRequest,
        routes::payments::dto::VerifyPaymentResponse,
        routes::progress::dto::CompleteLessonResponse,
        routes::progress::dto::LessonProgressItem,
        routes::progress::dto::CourseProgressResponse,
        routes::submissions::dto::CreateSubmissionRequest,
        routes::submissions::dto::ReviewSubmissionRequest,
        routes::submissions::dto::SubmissionResponse,
        routes::submissions::dto::ReviewSubmissionResponse,
        routes::submissions::dto::SubmissionListResponse,
        routes::certificates::dto::CertificateResponse,
        routes::certificates::dto::CertificateListResponse,
        routes::certificates::dto::VerifyCertificateResponse,
        routes::certificates::dto::DeleteCertificateResponse,
        routes::students::dto::BulkEnrollResponse,
        routes::students::dto::BulkEnrollError,
        routes::students::dto::EnrollmentProgressResponse,
        routes::dashboard::dto::DashboardResponse,
        routes::dashboard::dto::DashboardApplication,
        routes::dashboard::dto::RecentCompletion,
        routes::stats::dto::ApplicationsByStatus,
        routes::stats::dto::OverviewStatsResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Login and session management"),
        (name = "Users", description = "User administration"),
        (name = "Internships", description = "Internship program catalog"),
        (name = "Courses", description = "Course, module and lesson content"),
        (name = "Applications", description = "Application funnel"),
        (name = "Interview", description = "AI interview"),
        (name = "Payments", description = "Payment gateway integration"),
        (name = "Progress", description = "Lesson progress tracking"),
        (name = "Submissions", description = "Task submissions and review"),
        (name = "Certificates", description = "Certificate issuance and verification"),
        (name = "Students", description = "Student administration"),
        (name = "Dashboard", description = "Student dashboard"),
        (name = "Statistics", description = "Admin statistics"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
