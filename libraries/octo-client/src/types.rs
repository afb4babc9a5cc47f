//! Types for the GitHub users API.

use crate::redaction;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Public GitHub REST API
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Media type GitHub recommends for REST calls
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Configuration for the GitHub client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "https://api.github.com")
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Personal access token, sent as a bearer token when set
    pub token: Option<String>,
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config for `base_url` with default timeouts and no token.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            token: None,
            user_agent: format!("Octolist/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("token", &self.token.as_deref().map(redaction::mask_value))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

// =============================================================================
// Error Envelope
// =============================================================================

/// Error body returned with non-success statuses.
///
/// Every field is optional; GitHub itself usually only sends `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerErrorEnvelope {
    #[serde(default)]
    pub error: Option<Vec<String>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default, rename = "statusCode")]
    pub status_code: Option<i64>,
}

impl ServerErrorEnvelope {
    /// Parse an error body, `None` if it is not an envelope
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Error entries joined by newlines, or the plain message.
    ///
    /// `None` when neither carries any text.
    pub fn formatted_message(&self) -> Option<String> {
        match self.error.as_deref() {
            Some(entries) if !entries.is_empty() => Some(entries.join("\n")),
            _ => self.message.clone().filter(|m| !m.is_empty()),
        }
    }
}
