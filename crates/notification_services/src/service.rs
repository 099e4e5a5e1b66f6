use sqlx::PgPool;
use uuid::Uuid;

use crate::types::{CampaignEvent, Channel, NotificationError};

/// Notification service for campaign events.
///
/// Telegram delivery is attempted when `TELEGRAM_BOT_TOKEN` and
/// `TELEGRAM_CHAT_ID` are configured; email messages are recorded as
/// QUEUED for an external sender. Each attempt is logged to the
/// `notification_log` table with its outcome.
#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
    client: reqwest::Client,
    telegram_token: Option<String>,
    telegram_chat_id: Option<String>,
    admin_email: String,
}

impl NotificationService {
    /// Creates a service from environment configuration.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            client: reqwest::Client::new(),
            telegram_token: std::env::var("TELEGRAM_BOT_TOKEN").ok(),
            telegram_chat_id: std::env::var("TELEGRAM_CHAT_ID").ok(),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@smartcast.local".to_string()),
        }
    }

    /// Notifies the admin about a campaign event on both channels.
    ///
    /// Best-effort: delivery failures are recorded and logged, never
    /// surfaced to the calling request.
    pub async fn notify_campaign_event(&self, event: &CampaignEvent) {
        let message = event.message();
        let admin_email = self.admin_email.clone();

        if let Err(e) = self
            .send_email(Some(event.campaign_id), &admin_email, &message)
            .await
        {
            log::warn!("Failed to record email notification: {}", e);
        }

        let telegram_recipient = self
            .telegram_chat_id
            .clone()
            .unwrap_or_else(|| "telegram-admin".to_string());
        if let Err(e) = self
            .send_telegram(Some(event.campaign_id), &telegram_recipient, &message)
            .await
        {
            log::warn!("Failed to send Telegram notification: {}", e);
        }
    }

    /// Records an email notification as QUEUED for the external sender.
    pub async fn send_email(
        &self,
        campaign_id: Option<Uuid>,
        recipient: &str,
        message: &str,
    ) -> Result<(), NotificationError> {
        self.log_notification(campaign_id, Channel::Email, recipient, message, "QUEUED")
            .await
    }

    /// Sends a Telegram message and logs the attempt with its outcome.
    pub async fn send_telegram(
        &self,
        campaign_id: Option<Uuid>,
        recipient: &str,
        message: &str,
    ) -> Result<(), NotificationError> {
        let status = match self.deliver_telegram(message).await {
            Ok(()) => "SENT".to_string(),
            Err(reason) => format!("FAILED:{}", reason),
        };

        self.log_notification(campaign_id, Channel::Telegram, recipient, message, &status)
            .await
    }

    async fn deliver_telegram(&self, message: &str) -> Result<(), String> {
        let (token, chat_id) = match (&self.telegram_token, &self.telegram_chat_id) {
            (Some(token), Some(chat_id)) => (token, chat_id),
            _ => return Err("telegram-not-configured".to_string()),
        };

        let url = format!("https://api.telegram.org/bot{}/sendMessage", token);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": chat_id,
                "text": message,
            }))
            .send()
            .await
            .map_err(|_| "telegram-request-failed".to_string())?;

        if !response.status().is_success() {
            return Err(format!("telegram-http-{}", response.status().as_u16()));
        }

        Ok(())
    }

    async fn log_notification(
        &self,
        campaign_id: Option<Uuid>,
        channel: Channel,
        recipient: &str,
        message: &str,
        status: &str,
    ) -> Result<(), NotificationError> {
        sqlx::query(
            r#"
            INSERT INTO notification_log (campaign_id, channel, recipient, message, status)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(campaign_id)
        .bind(channel.as_str())
        .bind(recipient)
        .bind(message)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_message_includes_campaign_details() {
        let event = CampaignEvent {
            campaign_id: Uuid::nil(),
            title: "Morning Offer".to_string(),
            business_name: "Coffee Lab".to_string(),
            phone: "+998900000001".to_string(),
            text: "New campaign submitted.".to_string(),
        };

        let message = event.message();
        assert!(message.starts_with("New campaign submitted."));
        assert!(message.contains("Campaign: Morning Offer"));
        assert!(message.contains("Business: Coffee Lab"));
        assert!(message.contains("Contact: +998900000001"));
    }
}
