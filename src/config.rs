use crate::error::ApiError;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "https://neutron.opendock.com";

/// Credential configuration, immutable for the process lifetime.
///
/// At least one of `token` or the full `username`+`password` pair must be
/// present; `from_env` enforces this before anything touches the network.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
}

impl Config {
    /// Load configuration from `OPENDOCK_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_vars(
            std::env::var("OPENDOCK_API_URL").ok(),
            std::env::var("OPENDOCK_USERNAME").ok(),
            std::env::var("OPENDOCK_PASSWORD").ok(),
            std::env::var("OPENDOCK_TOKEN").ok(),
        )
    }

    fn from_vars(
        api_url: Option<String>,
        username: Option<String>,
        password: Option<String>,
        token: Option<String>,
    ) -> Result<Self, ApiError> {
        let api_url = api_url
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if token.is_none() && (username.is_none() || password.is_none()) {
            return Err(ApiError::Config(
                "Either OPENDOCK_TOKEN or both OPENDOCK_USERNAME and OPENDOCK_PASSWORD must be set"
                    .into(),
            ));
        }

        if token.is_some() && username.is_some() {
            warn!("Both OPENDOCK_TOKEN and OPENDOCK_USERNAME are set. Using OPENDOCK_TOKEN.");
        }

        Ok(Config {
            api_url,
            username,
            password,
            token,
        })
    }
}
