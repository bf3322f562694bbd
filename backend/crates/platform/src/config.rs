//! Client Configuration

use std::time::Duration;

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Header carrying the anti-forgery token on mutating requests
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Machine-readable code the backend attaches to CSRF rejections
pub const CSRF_INVALID_CODE: &str = "CSRF_INVALID";

/// Message the legacy backend middleware sends with CSRF rejections
pub const CSRF_INVALID_MESSAGE: &str = "Invalid or missing CSRF token";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://localhost:3001`
    pub base_url: Url,
    /// Header name for the CSRF token
    pub csrf_header: String,
    /// Path of the token refresh endpoint
    pub csrf_refresh_path: String,
    /// Location the navigator is sent to on 401
    pub login_location: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:3001").expect("static URL is valid"),
            csrf_header: CSRF_HEADER.to_string(),
            csrf_refresh_path: "/auth/csrf-token".to_string(),
            login_location: "/login".to_string(),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("sideline/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create config pointing at the given backend origin
    pub fn with_base_url(base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    /// Local backend with a short timeout
    pub fn development() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            ..Self::default()
        }
    }

    /// Resolve an API path against the base URL
    ///
    /// Paths are appended to the base URL's own path, so a base of
    /// `https://host/backend` and a path of `/auth/me` yields
    /// `https://host/backend/auth/me`.
    pub fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let joined = format!("{}/{}", base, path);
        Url::parse(&joined).map_err(|e| ClientError::InvalidUrl {
            url: joined,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_paths() {
        let config = ClientConfig::with_base_url("http://localhost:3001/").unwrap();
        assert_eq!(
            config.endpoint("/auth/me").unwrap().as_str(),
            "http://localhost:3001/auth/me"
        );

        let config = ClientConfig::with_base_url("https://club.example/backend").unwrap();
        assert_eq!(
            config.endpoint("api/players").unwrap().as_str(),
            "https://club.example/backend/api/players"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ClientConfig::with_base_url("not a url");
        assert!(matches!(result, Err(ClientError::InvalidUrl { .. })));
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.csrf_header, "X-CSRF-Token");
        assert_eq!(config.csrf_refresh_path, "/auth/csrf-token");
        assert_eq!(config.login_location, "/login");
    }
}
