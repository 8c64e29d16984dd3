use crate::config::APP_CONFIG;
use crate::rabbitmq_service::structs::MailQueueMessage;
use lapin::{BasicProperties, Connection, ConnectionProperties, options::*};

pub const MAIL_QUEUE: &str = "mail_service";

pub struct RabbitMQService;

impl RabbitMQService {
    pub async fn new() -> Connection {
        let connection =
            Connection::connect(&APP_CONFIG.rabbitmq_uri, ConnectionProperties::default())
                .await
                .expect("Failed to connect to RabbitMQ");
        connection
    }

    pub async fn create_mail_queue(connection: &Connection) -> Result<(), anyhow::Error> {
        let channel = connection
            .create_channel()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create RabbitMQ channel: {}", e))?;

        channel
            .queue_declare(
                MAIL_QUEUE,
                QueueDeclareOptions::default(),
                Default::default(),
            )
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create RabbitMQ queue: {}", e))?;

        Ok(())
    }

    pub async fn publish_to_mail_queue(
        connection: &Connection,
        to: &str,
        subject: &str,
        email_data: &str,
    ) -> Result<(), anyhow::Error> {
        let standard_msg = MailQueueMessage::send_email(to, subject, email_data);
        let serialized_msg = serde_json::to_string(&standard_msg)?;

        let channel = connection.create_channel().await?;

        channel
            .basic_publish(
                "",
                MAIL_QUEUE,
                BasicPublishOptions::default(),
                serialized_msg.as_bytes(),
                BasicProperties::default(),
            )
            .await?;

        Ok(())
    }
}
