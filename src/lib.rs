//! opendock-mcp: MCP server exposing the OpenDock dock-scheduling REST API as
//! typed tools over stdio.
//!
//! The interesting machinery is the authenticated client layer: [`AuthManager`]
//! keeps a bearer token valid (cached token, decode-only expiry inspection,
//! refresh-then-login fallback) and [`ApiClient`] wraps every call in a
//! single-shot recovery policy for stale auth (401), rate limiting (429) and
//! upstream unavailability (502/503/504). The tool modules are thin mappings
//! from MCP input schemas to API paths.
//!
//! Quick start:
//! ```no_run
//! use std::sync::Arc;
//! use opendock_mcp::{ApiClient, AuthManager, Config, OpendockServer};
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let auth = AuthManager::new(&config)?;
//! let api = ApiClient::new(&config.api_url, auth)?;
//! let server = OpendockServer::new(Arc::new(api));
//! # let _ = server; Ok(()) }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod tools;

pub use api::{ApiClient, ApiRequest, AuthManager, QueryValue};
pub use config::Config;
pub use error::ApiError;
pub use server::OpendockServer;
