//! Client configuration

/// Default server address
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Client configuration for connecting to the bakery server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// JWT token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
        }
    }

    /// Read `BAKERY_SERVER_URL`, falling back to [`DEFAULT_BASE_URL`]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BAKERY_SERVER_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let config = ClientConfig::new("http://pos.local:3000")
            .with_token("abc")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://pos.local:3000");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, 5);
    }

    #[test]
    fn default_points_at_local_server() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.token.is_none());
    }
}
