use std::sync::Mutex;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ApiError;

const AUTH_TIMEOUT: Duration = Duration::from_secs(30);

/// How close to `exp` a token may get before we renew it.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Owns the current bearer token and keeps it valid with the minimum
/// necessary network traffic.
///
/// `get_token` returns the cached token unchanged while its `exp` claim is
/// comfortably in the future, refreshes it when it is about to lapse, and
/// falls back to a full credential login when refresh fails or nothing is
/// cached. The token is decode-only: its signature is never verified here,
/// the server stays the authority on validity.
pub struct AuthManager {
    http: reqwest::Client,
    api_url: String,
    username: Option<String>,
    password: Option<String>,
    token: Mutex<Option<String>>,
}

impl AuthManager {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(AUTH_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            token: Mutex::new(config.token.clone()),
        })
    }

    /// Return a currently-valid bearer token, renewing it if needed.
    ///
    /// Refresh failures are logged and never fatal by themselves; the only
    /// fatal outcomes are a failed login or missing credentials.
    pub async fn get_token(&self) -> Result<String, ApiError> {
        let cached = self.token.lock().expect("token lock poisoned").clone();

        if let Some(current) = cached {
            if !is_expiring_soon(&current) {
                return Ok(current);
            }
            match self.refresh(&current).await {
                Ok(fresh) => {
                    self.store(&fresh);
                    return Ok(fresh);
                }
                Err(err) => {
                    warn!("Token refresh failed, falling back to login: {err}");
                }
            }
        }

        let fresh = self.login().await?;
        self.store(&fresh);
        Ok(fresh)
    }

    /// Drop the cached token. The next `get_token` call performs a full
    /// login, since there is nothing left to refresh.
    pub fn clear_token(&self) {
        *self.token.lock().expect("token lock poisoned") = None;
    }

    fn store(&self, token: &str) {
        *self.token.lock().expect("token lock poisoned") = Some(token.to_string());
    }

    async fn refresh(&self, current: &str) -> Result<String, ApiError> {
        let res = self
            .http
            .get(format!("{}/auth/refresh", self.api_url))
            .bearer_auth(current)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(ApiError::Refresh {
                status: res.status().as_u16(),
            });
        }

        let data: TokenResponse = res.json().await?;
        Ok(data.access_token)
    }

    async fn login(&self) -> Result<String, ApiError> {
        let (Some(username), Some(password)) = (&self.username, &self.password) else {
            return Err(ApiError::MissingCredentials);
        };

        let res = self
            .http
            .post(format!("{}/auth/login", self.api_url))
            .json(&serde_json::json!({
                "email": username,
                "password": password,
            }))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Login { status, body });
        }

        info!("Login successful");
        let data: TokenResponse = res.json().await?;
        Ok(data.access_token)
    }
}

/// True when the token carries a numeric `exp` claim within
/// [`EXPIRY_MARGIN_SECS`] of now (or already past).
///
/// Tokens without a readable claim structure are treated as non-expiring.
/// That fail-open choice is deliberate: opaque or malformed tokens are passed
/// through untouched and the 401 path in the request pipeline corrects us if
/// the server disagrees.
fn is_expiring_soon(token: &str) -> bool {
    match claims_exp(token) {
        Some(exp) => exp - chrono::Utc::now().timestamp() < EXPIRY_MARGIN_SECS,
        None => false,
    }
}

/// Decode the `exp` claim (epoch seconds) from the payload segment of a
/// three-part JWT. No signature verification, ever. Returns `None` for
/// anything that does not decode cleanly.
fn claims_exp(token: &str) -> Option<i64> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return None,
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_i64()
}
