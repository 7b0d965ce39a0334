use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderValue, RETRY_AFTER};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tokio::time::sleep;
use tracing::warn;
use url::Url;

use crate::api::auth::AuthManager;
use crate::error::ApiError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RETRY_DELAY: Duration = Duration::from_millis(1_000);
const MAX_RETRY_DELAY: Duration = Duration::from_millis(60_000);

/// A query-string value: rendered once per key, or as repeated keys in
/// sequence order.
#[derive(Debug, Clone)]
pub enum QueryValue {
    Scalar(String),
    Many(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Scalar(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(value: Vec<String>) -> Self {
        QueryValue::Many(value)
    }
}

/// One logical API call: method, path, query pairs, optional JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, QueryValue)>,
    body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a query parameter. Scalars overwrite an earlier scalar under the
    /// same key; sequences always append.
    pub fn query(mut self, key: &str, value: impl Into<QueryValue>) -> Self {
        let value = value.into();
        if let QueryValue::Scalar(_) = value {
            if let Some(existing) = self
                .query
                .iter_mut()
                .find(|(k, v)| k == key && matches!(v, QueryValue::Scalar(_)))
            {
                existing.1 = value;
                return self;
            }
        }
        self.query.push((key.to_string(), value));
        self
    }

    /// Add a query parameter only when a value is present; `None` leaves the
    /// key out of the query string entirely.
    pub fn query_opt(self, key: &str, value: Option<impl Into<QueryValue>>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Authenticated request pipeline with single-shot recovery for stale auth
/// (401), rate limiting (429) and upstream unavailability (502/503/504).
///
/// Each logical call goes on the wire at most twice; the recovery branches
/// never compose and the retry's outcome is final. Transport errors are not
/// retried at all — only HTTP-status conditions are.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthManager,
}

impl ApiClient {
    pub fn new(base_url: &str, auth: AuthManager) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    /// Perform one logical API call. Returns `None` for 204 responses,
    /// otherwise the parsed JSON body.
    pub async fn request(&self, req: ApiRequest) -> Result<Option<Value>, ApiError> {
        let first = self.send(&req).await?;
        let status = first.status();

        let resp = if status == StatusCode::UNAUTHORIZED {
            warn!(
                "Got 401 on {} {}, retrying with fresh token",
                req.method, req.path
            );
            self.auth.clear_token();
            self.send(&req).await?
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            let delay = retry_after_delay(first.headers().get(RETRY_AFTER));
            warn!(
                "Got 429 on {} {}, retrying in {}ms",
                req.method,
                req.path,
                delay.as_millis()
            );
            sleep(delay).await;
            self.send(&req).await?
        } else if matches!(status.as_u16(), 502 | 503 | 504) {
            warn!(
                "Got {} on {} {}, retrying in {}ms",
                status.as_u16(),
                req.method,
                req.path,
                RETRY_DELAY.as_millis()
            );
            sleep(RETRY_DELAY).await;
            self.send(&req).await?
        } else {
            first
        };

        decode(resp).await
    }

    async fn send(&self, req: &ApiRequest) -> Result<reqwest::Response, ApiError> {
        let token = self.auth.get_token().await?;
        let url = self.build_url(req)?;

        let mut builder = self
            .http
            .request(req.method.clone(), url)
            .bearer_auth(&token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }

        Ok(builder.send().await?)
    }

    fn build_url(&self, req: &ApiRequest) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, req.path))
            .map_err(|e| ApiError::Config(format!("invalid request URL: {e}")))?;
        if !req.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &req.query {
                match value {
                    QueryValue::Scalar(v) => {
                        pairs.append_pair(key, v);
                    }
                    QueryValue::Many(items) => {
                        for item in items {
                            pairs.append_pair(key, item);
                        }
                    }
                }
            }
        }
        Ok(url)
    }
}

async fn decode(res: reqwest::Response) -> Result<Option<Value>, ApiError> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await?;
        return Err(ApiError::Api {
            status: status.as_u16(),
            body,
        });
    }
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    Ok(Some(res.json().await?))
}

/// Delay before reissuing a rate-limited request.
///
/// Integer-seconds and HTTP-date forms of `Retry-After` are honored, capped
/// at [`MAX_RETRY_DELAY`]; a missing or unparseable header falls back to
/// [`RETRY_DELAY`].
fn retry_after_delay(header: Option<&HeaderValue>) -> Duration {
    let Some(raw) = header.and_then(|v| v.to_str().ok()) else {
        return RETRY_DELAY;
    };
    let raw = raw.trim();
    if let Ok(secs) = raw.parse::<u64>() {
        return Duration::from_secs(secs).min(MAX_RETRY_DELAY);
    }
    if let Ok(date) = chrono::DateTime::parse_from_rfc2822(raw) {
        let until_ms = (date.timestamp_millis() - chrono::Utc::now().timestamp_millis()).max(0);
        return Duration::from_millis(until_ms as u64).min(MAX_RETRY_DELAY);
    }
    RETRY_DELAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn client(base_url: &str) -> ApiClient {
        let cfg = Config {
            api_url: base_url.to_string(),
            username: None,
            password: None,
            token: Some("test-token".into()),
        };
        let auth = AuthManager::new(&cfg).expect("auth init");
        ApiClient::new(base_url, auth).expect("client init")
    }

    #[test]
    fn trailing_slashes_are_stripped_from_base_url() {
        let client = client("https://api.test///");
        let url = client.build_url(&ApiRequest::get("/items")).unwrap();
        assert_eq!(url.as_str(), "https://api.test/items");
    }

    #[test]
    fn scalar_params_serialize_once_per_key() {
        let client = client("https://api.test");
        let req = ApiRequest::get("/items")
            .query("page", 1u32)
            .query("search", "foo")
            .query("page", 2u32);
        let url = client.build_url(&req).unwrap();
        assert_eq!(url.query(), Some("page=2&search=foo"));
    }

    #[test]
    fn sequence_params_serialize_as_repeated_keys_in_order() {
        let client = client("https://api.test");
        let req = ApiRequest::get("/items").query(
            "join",
            vec!["user||email".to_string(), "user.company||name".to_string()],
        );
        let url = client.build_url(&req).unwrap();
        let query = url.query().unwrap();
        assert_eq!(query, "join=user%7C%7Cemail&join=user.company%7C%7Cname");
    }

    #[test]
    fn absent_optional_params_are_omitted() {
        let client = client("https://api.test");
        let req = ApiRequest::get("/items")
            .query_opt("page", Some(1u32))
            .query_opt("empty", None::<String>);
        let url = client.build_url(&req).unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("page=1"));
        assert!(!query.contains("empty"));
    }

    #[test]
    fn no_query_means_no_question_mark() {
        let client = client("https://api.test");
        let url = client.build_url(&ApiRequest::get("/items")).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn retry_after_defaults_to_one_second() {
        assert_eq!(retry_after_delay(None), Duration::from_millis(1_000));
        let garbage = HeaderValue::from_static("soon");
        assert_eq!(
            retry_after_delay(Some(&garbage)),
            Duration::from_millis(1_000)
        );
    }

    #[test]
    fn retry_after_seconds_are_honored() {
        let five = HeaderValue::from_static("5");
        assert_eq!(retry_after_delay(Some(&five)), Duration::from_secs(5));
    }

    #[test]
    fn retry_after_seconds_are_capped_at_sixty() {
        let huge = HeaderValue::from_static("120");
        assert_eq!(retry_after_delay(Some(&huge)), Duration::from_secs(60));
    }

    #[test]
    fn retry_after_http_date_is_bounded() {
        let future = chrono::Utc::now() + chrono::TimeDelta::seconds(10);
        let value = HeaderValue::from_str(&future.to_rfc2822()).unwrap();
        let delay = retry_after_delay(Some(&value));
        assert!(delay <= Duration::from_secs(10));
        assert!(delay >= Duration::from_secs(8));
    }

    #[test]
    fn retry_after_past_http_date_clamps_to_zero() {
        let past = chrono::Utc::now() - chrono::TimeDelta::seconds(30);
        let value = HeaderValue::from_str(&past.to_rfc2822()).unwrap();
        assert_eq!(retry_after_delay(Some(&value)), Duration::ZERO);
    }

    #[test]
    fn retry_after_far_http_date_is_capped() {
        let far = chrono::Utc::now() + chrono::TimeDelta::seconds(600);
        let value = HeaderValue::from_str(&far.to_rfc2822()).unwrap();
        assert_eq!(retry_after_delay(Some(&value)), Duration::from_secs(60));
    }
}
