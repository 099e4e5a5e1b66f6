//! # Notification Services
//!
//! Best-effort campaign event notifications for the ad-slot marketplace.
//! Telegram messages go out through the bot API when configured; email is
//! recorded for an external sender. Every attempt lands in the
//! `notification_log` table.

/// Notification delivery and logging.
pub mod service;
/// Types and structures used by the notification service.
pub mod types;

pub use service::NotificationService;
pub use types::{CampaignEvent, Channel, NotificationError};
