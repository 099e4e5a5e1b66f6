use uuid::Uuid;

/// Delivery channel for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Logged for an external email sender.
    Email,
    /// Sent through the Telegram bot API.
    Telegram,
}

impl Channel {
    /// Database form of the channel.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "EMAIL",
            Channel::Telegram => "TELEGRAM",
        }
    }
}

/// A campaign event the admin should hear about.
#[derive(Debug, Clone)]
pub struct CampaignEvent {
    /// Campaign the event concerns.
    pub campaign_id: Uuid,
    /// Campaign title.
    pub title: String,
    /// Advertiser's business name.
    pub business_name: String,
    /// Advertiser's contact phone.
    pub phone: String,
    /// One-line description of what happened.
    pub text: String,
}

impl CampaignEvent {
    /// Message body sent to both channels.
    pub fn message(&self) -> String {
        format!(
            "{}\nCampaign: {}\nBusiness: {}\nContact: {}\nID: {}",
            self.text, self.title, self.business_name, self.phone, self.campaign_id
        )
    }
}

/// Custom error type for notification operations
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// A database error occurred while logging the notification
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The Telegram request could not be delivered
    #[error("Telegram error: {0}")]
    Telegram(String),
}
