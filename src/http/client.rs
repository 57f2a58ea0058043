use std::time::Instant;

use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::config::{Config, ConfigError};

use super::request::Endpoint;
use super::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {url} (status {status}) is not a JSON array of objects: {source}")]
    Decode {
        url: Url,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

/// Client for the three read endpoints of the service under test.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from `base.url` and the optional `http.timeout.ms`.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let base_url = config.base_url()?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout()? {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Build)?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get_users_by_username(&self, username: &str) -> Result<ApiResponse, ClientError> {
        self.get(Endpoint::UsersByUsername(username)).await
    }

    pub async fn get_posts_by_user_id(&self, user_id: i64) -> Result<ApiResponse, ClientError> {
        self.get(Endpoint::PostsByUserId(user_id)).await
    }

    pub async fn get_comments_by_post_id(&self, post_id: i64) -> Result<ApiResponse, ClientError> {
        self.get(Endpoint::CommentsByPostId(post_id)).await
    }

    async fn get(&self, endpoint: Endpoint<'_>) -> Result<ApiResponse, ClientError> {
        let url = endpoint.url(&self.base_url);

        let started = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;
        let elapsed = started.elapsed().as_millis();
        let body = String::from_utf8_lossy(&bytes).into_owned();

        tracing::debug!(
            %endpoint,
            status,
            elapsed_ms = elapsed as u64,
            size = bytes.len(),
            "response received"
        );

        ApiResponse::from_parts(status, body, elapsed)
            .map_err(|source| ClientError::Decode { url, status, source })
    }
}
