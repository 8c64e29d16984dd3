pub mod application_repository;
pub mod certificate_repository;
pub mod course_repository;
pub mod internship_repository;
pub mod lesson_repository;
pub mod progress_repository;
pub mod submission_repository;
pub mod user_repository;

pub use application_repository::ApplicationRepository;
pub use certificate_repository::CertificateRepository;
pub use course_repository::CourseRepository;
pub use internship_repository::{InternshipRepository, InternshipUpdate};
pub use lesson_repository::{LessonRepository, LessonUpdate};
pub use progress_repository::ProgressRepository;
pub use submission_repository::SubmissionRepository;
pub use user_repository::{UserRepository, UserUpdate};
