//! GitHub users listing client.

use crate::error::{ClientError, Result};
use crate::redaction;
use crate::types::{ClientConfig, ServerErrorEnvelope, GITHUB_ACCEPT};
use async_trait::async_trait;
use octo_core::{
    ConnectivityObserver, GitHubUser, RemoteDataSource, RemoteError, RemoteResult, UserId,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// How much of an error body goes into the logs
const LOGGED_BODY_LIMIT: usize = 1024;

/// Client for the paged `/users` listing.
///
/// # Example
///
/// ```ignore
/// use octo_client::{ClientConfig, GitHubClient};
/// use octo_core::RemoteDataSource;
///
/// let client = GitHubClient::new(ClientConfig::default())?;
/// let first_page = client.get_github_users(0).await?;
/// ```
pub struct GitHubClient {
    http: Client,
    users_url: Url,
    token: Option<String>,
    connectivity: Option<Arc<dyn ConnectivityObserver>>,
}

impl GitHubClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let trimmed = config.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url =
            Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(format!("{trimmed}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let mut users_url = base_url;
        users_url
            .path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(format!("{trimmed} cannot be a base URL")))?
            .pop_if_empty()
            .push("users");

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            users_url,
            token: config.token.filter(|t| !t.trim().is_empty()),
            connectivity: None,
        })
    }

    /// Fail fast with `NoInternet` whenever `observer` reports no network.
    #[must_use]
    pub fn with_connectivity(mut self, observer: Arc<dyn ConnectivityObserver>) -> Self {
        self.connectivity = Some(observer);
        self
    }

    /// Endpoint the listing is fetched from
    pub fn users_url(&self) -> &Url {
        &self.users_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn is_offline(&self) -> bool {
        self.connectivity
            .as_ref()
            .is_some_and(|observer| !observer.current_status().is_connected())
    }
}

#[async_trait]
impl RemoteDataSource for GitHubClient {
    async fn get_github_users(&self, since: UserId) -> RemoteResult<Vec<GitHubUser>> {
        if self.is_offline() {
            debug!(since, "Skipping users request while offline");
            return Err(RemoteError::NoInternet);
        }

        let mut builder = self
            .http
            .get(self.users_url.clone())
            .query(&[("since", since)]);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        let request = builder.build().map_err(map_transport_error)?;

        debug!(
            url = %request.url(),
            headers = ?redaction::redact_headers(request.headers()),
            "Fetching users"
        );

        let response = self
            .http
            .execute(request)
            .await
            .map_err(map_transport_error)?;

        let status = response.status();

        if status.is_success() {
            let users: Vec<GitHubUser> = response.json().await.map_err(|e| {
                if e.is_decode() {
                    RemoteError::Serialization {
                        detail: Some(e.to_string()),
                    }
                } else {
                    map_transport_error(e)
                }
            })?;

            debug!(since, count = users.len(), "Fetched users");
            Ok(users)
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                body = %redaction::redact_body(&body, LOGGED_BODY_LIMIT),
                "Users request failed"
            );
            Err(error_for_status(status, &body))
        }
    }
}

/// Classify a failure that happened before a status was available
fn map_transport_error(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        RemoteError::RequestTimeout
    } else if err.is_connect() {
        RemoteError::UnknownHost
    } else if err.is_decode() {
        RemoteError::Serialization {
            detail: Some(err.to_string()),
        }
    } else {
        RemoteError::Unknown {
            detail: Some(err.to_string()),
        }
    }
}

/// Classify a non-success response from its status and error envelope
pub(crate) fn error_for_status(status: StatusCode, body: &str) -> RemoteError {
    let detail = ServerErrorEnvelope::parse(body).and_then(|e| e.formatted_message());

    match status.as_u16() {
        401 => RemoteError::Unauthorized(detail),
        429 => RemoteError::TooManyRequests { detail },
        500..=599 => RemoteError::Server { detail },
        code => match detail {
            Some(message) => RemoteError::Status {
                status: code,
                message,
            },
            None => RemoteError::Unknown {
                detail: Some(format!("HTTP {code}")),
            },
        },
    }
}
