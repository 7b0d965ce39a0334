use thiserror::Error;

/// Unified error type for the OpenDock client layer.
///
/// `Api`, `Login` and `Refresh` carry the upstream HTTP status; `Transport`
/// wraps connection errors and timeouts, which are never retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Terminal non-2xx response from a domain endpoint, body text verbatim.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Non-2xx from `POST /auth/login`. Fatal to the caller.
    #[error("Login failed ({status}): {body}")]
    Login { status: u16, body: String },

    /// Non-2xx from `GET /auth/refresh`. Recovered internally by falling
    /// back to a full login; never surfaces on its own.
    #[error("Token refresh failed ({status})")]
    Refresh { status: u16 },

    /// A login was required but no username/password pair is configured.
    #[error("No credentials available for login")]
    MissingCredentials,

    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Status code of the upstream response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. }
            | ApiError::Login { status, .. }
            | ApiError::Refresh { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<ApiError> for rmcp::ErrorData {
    fn from(err: ApiError) -> Self {
        rmcp::ErrorData::internal_error(err.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_messages() {
        let api = ApiError::Api {
            status: 404,
            body: "not found".into(),
        };
        assert_eq!(api.to_string(), "API error 404: not found");

        let login = ApiError::Login {
            status: 403,
            body: "bad credentials".into(),
        };
        assert_eq!(login.to_string(), "Login failed (403): bad credentials");

        let refresh = ApiError::Refresh { status: 401 };
        assert_eq!(refresh.to_string(), "Token refresh failed (401)");

        assert_eq!(
            ApiError::MissingCredentials.to_string(),
            "No credentials available for login"
        );
    }

    #[test]
    fn status_is_exposed_for_http_variants() {
        assert_eq!(
            ApiError::Api {
                status: 500,
                body: String::new()
            }
            .status(),
            Some(500)
        );
        assert_eq!(ApiError::MissingCredentials.status(), None);
    }
}
