use serde::{Deserialize, Serialize};

/// Wire shape of a mail-queue message:
/// `{"pattern": "send-email", "data": {"to", "subject", "text"}}`
#[derive(Debug, Deserialize, Serialize)]
pub struct MailQueueMessage {
    pub pattern: String,
    pub data: MailData,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MailData {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl MailQueueMessage {
    pub fn send_email(to: &str, subject: &str, text: &str) -> Self {
        Self {
            pattern: "send-email".to_string(),
            data: MailData {
                to: to.to_string(),
                subject: subject.to_string(),
                text: text.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mail_message_round_trips_through_json() {
        let message = MailQueueMessage::send_email(
            "student@example.com",
            "Certificate issued",
            "Congratulations!",
        );

        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"pattern\":\"send-email\""));

        let parsed: MailQueueMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.data.to, "student@example.com");
        assert_eq!(parsed.data.subject, "Certificate issued");
    }
}
