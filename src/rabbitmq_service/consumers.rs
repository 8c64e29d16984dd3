use crate::config::APP_CONFIG;
use crate::rabbitmq_service::rabbitmq_service::MAIL_QUEUE;
use crate::rabbitmq_service::structs::MailQueueMessage;
use crate::utils::mailer::SmtpMailer;
use futures::StreamExt;
use lapin::options::{BasicAckOptions, BasicConsumeOptions};
use lapin::types::FieldTable;
use lapin::{Connection, ConnectionProperties};
use tokio::sync::OnceCell;

pub static RABBITMQ_CONNECTION: OnceCell<Connection> = OnceCell::const_new();

pub async fn get_rabbitmq_connection() -> &'static Connection {
    RABBITMQ_CONNECTION
        .get_or_init(|| async {
            Connection::connect(&APP_CONFIG.rabbitmq_uri, ConnectionProperties::default())
                .await
                .expect("Failed to connect to RabbitMQ")
        })
        .await
}

pub struct RabbitMqConsumer;

impl RabbitMqConsumer {
    /// Drains the mail queue and delivers over SMTP. Delivery failures are
    /// logged and the message is acknowledged anyway; the producing request
    /// already reported success and there is no retry policy.
    pub async fn consume_mail_queue() -> Result<(), anyhow::Error> {
        tracing::info!("Starting consumer for mail queue: {}", MAIL_QUEUE);

        let rabbit_conn = RABBITMQ_CONNECTION
            .get()
            .ok_or_else(|| anyhow::anyhow!("RabbitMQ connection not initialized"))?;
        let channel = rabbit_conn.create_channel().await?;

        let mailer = SmtpMailer::from_config()?;

        let mut consumer = channel
            .basic_consume(
                MAIL_QUEUE,
                "mail_worker",
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await?;

        tracing::info!("Consumer started successfully, waiting for messages...");

        while let Some(delivery) = consumer.next().await {
            let delivery = match delivery {
                Ok(d) => d,
                Err(e) => {
                    tracing::error!("Failed to receive message rabbitMQ: {:?}", e);
                    continue;
                }
            };

            match serde_json::from_slice::<MailQueueMessage>(&delivery.data) {
                Ok(payload) => {
                    tracing::info!(
                        "Processing mail message for {}: {}",
                        payload.data.to,
                        payload.data.subject
                    );

                    if let Err(e) = delivery.ack(BasicAckOptions::default()).await {
                        tracing::error!("Failed to acknowledge mail message: {}", e);
                        continue;
                    }

                    if let Err(e) = mailer
                        .send_text(&payload.data.to, &payload.data.subject, &payload.data.text)
                        .await
                    {
                        tracing::error!("Failed to send email to {}: {}", payload.data.to, e);
                    } else {
                        tracing::info!("Email sent to {}", payload.data.to);
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to deserialize mail message: {}", e);
                    delivery.ack(BasicAckOptions::default()).await?;
                }
            }
        }

        Ok(())
    }
}
