use clap::Parser;
use once_cell::sync::Lazy;

pub const CERTIFICATE_CODE_PREFIX: &str = "CERT";
pub const CERTIFICATE_CODE_LENGTH: usize = 8;
pub const CERTIFICATE_CODE_MAX_ATTEMPTS: u32 = 5;

pub const JWT_EXPRIED_TIME: i64 = 86400i64;

pub const CSV_TRACKER_EXPRIED_TIME: i64 = 86400i64;

// Streak configuration
pub const STREAK_WINDOW_HOURS: i64 = 48;

pub const ELIGIBILITY_PASS_SCORE: i32 = 60;

pub const TEMP_PASSWORD_LENGTH: usize = 12;
pub const REFERRAL_CODE_LENGTH: usize = 8;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env)]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env)]
    pub rabbitmq_uri: String,

    #[clap(long, env, default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    #[clap(long, env)]
    pub admin_email: String,

    #[clap(long, env)]
    pub admin_password: String,

    // payment gateway
    #[clap(long, env)]
    pub payment_api_base: String,

    #[clap(long, env)]
    pub payment_key_id: String,

    #[clap(long, env)]
    pub payment_key_secret: String,

    #[clap(long, env, default_value = "INR")]
    pub payment_currency: String,

    // chat completion API (eligibility test + interview)
    #[clap(long, env)]
    pub ai_api_base: String,

    #[clap(long, env)]
    pub ai_api_key: String,

    #[clap(long, env, default_value = "gpt-4o-mini")]
    pub ai_model: String,

    // SMTP (mail worker)
    #[clap(long, env)]
    pub smtp_host: String,

    #[clap(long, env, default_value_t = 587)]
    pub smtp_port: u16,

    #[clap(long, env, default_value = "")]
    pub smtp_username: String,

    #[clap(long, env, default_value = "")]
    pub smtp_password: String,

    #[clap(long, env)]
    pub mail_from: String,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}
