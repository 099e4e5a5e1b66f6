//! # Web Handlers for the Ad-Slot Marketplace
//!
//! This crate provides the HTTP handlers and services for the
//! marketplace API: availability checks, campaign booking and
//! moderation, location/screen administration, checkout and the
//! reconciliation trigger.

/// Request/response types and the shared error type
mod types;
pub use types::*;

/// Authentication handlers (register, login)
mod auth_handlers;
pub use auth_handlers::*;

/// Slot availability handlers
mod availability_handlers;
pub use availability_handlers::*;

/// Location listing and administration
mod location_service;
pub use location_service::*;
mod location_handlers;
pub use location_handlers::*;

/// Campaign booking and moderation
mod campaign_service;
pub use campaign_service::*;
mod campaign_handlers;
pub use campaign_handlers::*;

/// Checkout and invoices
mod payment_service;
pub use payment_service::*;
mod payment_handlers;
pub use payment_handlers::*;

/// Campaign status reconciliation trigger
mod sync_handlers;
pub use sync_handlers::*;
