pub mod sea_orm_active_enums;

pub mod application;
pub mod certificate;
pub mod course;
pub mod course_module;
pub mod internship;
pub mod lesson;
pub mod lesson_progress;
pub mod submission;
pub mod user;
