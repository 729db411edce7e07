//! HTTP(S) and `file://` source implementation.
//!
//! This module shows how to implement the [`JsonSource`] trait for a
//! concrete transport.  `http` and `https` URLs go through a shared
//! [`reqwest::Client`]; `file` URLs are read from disk, which makes local
//! previews of a static site work without a web server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::debug;
use url::Url;

use super::JsonSource;
use crate::error::LoadError;

/// Client knobs taken from the `[http]` table of the site config.
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// Whole-request timeout.  `None` waits forever, like a browser fetch.
    pub timeout: Option<Duration>,
    /// Overrides the default `folio/<version>` user agent.
    pub user_agent: Option<String>,
}

/// A web data source.
pub struct WebSource {
    client: reqwest::Client,
    label: String,
}

impl WebSource {
    /// Build a source with its own HTTP client.
    pub fn new(label: impl Into<String>, options: &HttpOptions) -> Result<Self, LoadError> {
        let user_agent = options
            .user_agent
            .clone()
            .unwrap_or_else(|| concat!("folio/", env!("CARGO_PKG_VERSION")).to_string());

        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            label: label.into(),
        })
    }

    async fn fetch_http(&self, url: &Url) -> Result<String, LoadError> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        Ok(response.text().await?)
    }

    async fn fetch_file(&self, url: &Url) -> Result<String, LoadError> {
        let path = url
            .to_file_path()
            .map_err(|()| LoadError::UnsupportedScheme(url.scheme().to_string()))?;
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

#[async_trait]
impl JsonSource for WebSource {
    fn name(&self) -> &str {
        &self.label
    }

    async fn fetch(&self, url: &Url) -> Result<String, LoadError> {
        debug!(source = %self.label, %url, "fetching");
        match url.scheme() {
            "http" | "https" => self.fetch_http(url).await,
            "file" => self.fetch_file(url).await,
            other => Err(LoadError::UnsupportedScheme(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
