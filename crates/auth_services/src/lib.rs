//! # Auth Services
//!
//! This crate provides authentication for the ad-slot marketplace:
//! advertiser accounts with bcrypt-hashed passwords, JWT issuance and
//! verification, and actix middleware/extractors for protected routes.

/// JWT token handling.
pub mod jwt;
/// Middleware and extractors for request authentication.
pub mod middleware;
/// Service for advertiser account operations.
pub mod service;
/// Types and structures used in authentication.
pub mod types;
