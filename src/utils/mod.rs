pub mod jwt;
pub mod mailer;
pub mod random;
pub mod streak;
pub mod tracing;
