//! Authenticated HTTP client layer for the OpenDock REST API.

pub mod auth;
pub mod client;

pub use auth::AuthManager;
pub use client::{ApiClient, ApiRequest, QueryValue};
