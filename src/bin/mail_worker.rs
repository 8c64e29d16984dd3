use internship_service::rabbitmq_service::consumers::{
    RABBITMQ_CONNECTION, RabbitMqConsumer, get_rabbitmq_connection,
};
use internship_service::rabbitmq_service::rabbitmq_service::RabbitMQService;
use internship_service::utils::tracing::init_standard_tracing;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"));
    tracing::info!("Initializing RabbitMQ connection...");

    get_rabbitmq_connection().await;
    tracing::info!("RabbitMQ connection established");

    let rabbitmq_connection = RABBITMQ_CONNECTION
        .get()
        .expect("Failed to get rabbitmq connection");

    tracing::info!("Creating mail queue...");
    RabbitMQService::create_mail_queue(rabbitmq_connection)
        .await
        .ok();

    tracing::info!("Starting mail consumer...");

    let mail_consumer = tokio::spawn(async {
        if let Err(e) = RabbitMqConsumer::consume_mail_queue().await {
            tracing::error!("Mail consumer error: {:?}", e);
        }
    });

    tracing::info!("Mail consumer started, waiting for messages...");

    // Runs indefinitely; returning means the consumer stopped
    if let Err(e) = mail_consumer.await {
        tracing::warn!("Mail consumer stopped: {:?}", e);
    }

    Ok(())
}
