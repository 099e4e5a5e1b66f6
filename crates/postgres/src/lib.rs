//! # Postgres
//!
//! This crate provides the PostgreSQL client for the ad-slot marketplace:
//! pool construction plus the database-backed implementation of the
//! booking core's `CampaignStore` contract.

/// Connection pool construction and health checks.
pub mod database;

/// `CampaignStore` implementation over a `PgPool`.
pub mod store;
pub use store::PgCampaignStore;
