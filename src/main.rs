use std::sync::Arc;

use anyhow::Result;
use opendock_mcp::{ApiClient, AuthManager, Config, OpendockServer};
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP transport; all diagnostics go to stderr.
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let auth = AuthManager::new(&config)?;
    let api = ApiClient::new(&config.api_url, auth)?;

    let service = OpendockServer::new(Arc::new(api)).serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
