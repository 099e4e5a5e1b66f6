//! # Campaign Sync
//!
//! Background reconciliation of campaign statuses. Runs the booking
//! core's status reconciler on a fixed interval so campaigns move
//! through APPROVED, LIVE and ENDED without waiting for a page load.

/// The periodic reconciliation loop.
mod executor;
pub use executor::{SyncExecutor, SyncExecutorConfig};
