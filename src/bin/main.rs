use std::net::SocketAddr;

use internship_service::bootstrap::initialize_admin_user;
use internship_service::rabbitmq_service::consumers::get_rabbitmq_connection;
use internship_service::rabbitmq_service::rabbitmq_service::RabbitMQService;
use internship_service::redis_service::init_redis_connection;
use internship_service::static_service::get_database_connection;
use internship_service::{app, config::APP_CONFIG, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    tracing::info!("Starting application...");

    // Initialize database connection
    let db_connection = get_database_connection().await;

    let rabbitmq_connection = get_rabbitmq_connection().await;
    if let Ok(()) = RabbitMQService::create_mail_queue(rabbitmq_connection).await {
        tracing::info!("Created RabbitMQ mail queue successfully");
    }

    // Initialize Redis connection
    tracing::info!("Initializing Redis connection...");
    if let Err(e) = init_redis_connection().await {
        tracing::error!("Failed to initialize Redis connection: {}", e);
        tracing::warn!("Continuing without Redis (logout and bulk-enrollment progress may not work properly)...");
    } else {
        tracing::info!("Redis connection initialized successfully");
    }

    // Initialize default admin user
    tracing::info!("Checking admin user...");
    if let Err(e) = initialize_admin_user(db_connection).await {
        tracing::error!("Failed to initialize admin user: {}", e);
        tracing::warn!("Continuing without admin user initialization...");
    }

    let app = app::create_app().await?;

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(http_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
