//! # Booking Core
//!
//! This crate provides the slot-availability and campaign lifecycle logic
//! for the ad-slot marketplace. It computes how many of a screen's fixed
//! slots are free for a date range and derives campaign statuses from the
//! wall clock. Persistence is abstracted behind the [`CampaignStore`] trait
//! so the web layer can inject a Postgres-backed store and tests can use
//! the in-memory one.

/// Calendar-date parsing and inclusive interval arithmetic.
pub mod dates;
pub use dates::{DateRange, add_days, parse_date_only};

/// Campaign status enum and the date-driven transition function.
pub mod status;
pub use status::{CampaignStatus, next_status};

/// Persistence contract required by the core services.
pub mod store;
pub use store::{CampaignSchedule, CampaignStore};

/// Slot availability computation for a location and date range.
pub mod availability;
pub use availability::{Availability, AvailabilityService};

/// Date-driven campaign status reconciliation.
pub mod reconcile;
pub use reconcile::{StatusReconciler, SyncReport};

/// Campaign price calculation from a location's 30-day rate.
pub mod pricing;
pub use pricing::campaign_price_usd;

/// In-memory store used as a test double.
pub mod memory;
pub use memory::MemoryStore;

/// Error types shared by the core services.
pub mod error;
pub use error::BookingError;
