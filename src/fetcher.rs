//! Page fetching from the upstream vacancy API
//!
//! [`PageSource`] is the seam between the aggregator and the network. The
//! production implementation, [`HttpPageSource`], issues one GET per offset
//! window and validates the response envelope; tests substitute in-memory
//! sources to drive the aggregator without a network.

use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use crate::types::{Envelope, FilterKeys, Page};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};

/// Number of body characters logged per response
const PREVIEW_CHARS: usize = 100;

/// A source of vacancy pages addressed by offset
///
/// Implementations must not share mutable state between calls: the aggregator
/// invokes `fetch_page` concurrently for every offset of a plan.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the window starting at `offset` for the given filters
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] when the request cannot be completed
    /// - [`Error::Decode`] when the body is not a valid envelope
    /// - [`Error::UpstreamRejected`] when the envelope carries the error flag
    async fn fetch_page(&self, offset: usize, filter: &FilterKeys) -> Result<Page>;
}

/// [`PageSource`] backed by the upstream HTTP JSON API
#[derive(Clone, Debug)]
pub struct HttpPageSource {
    client: reqwest::Client,
    base_url: String,
    education_param: String,
    category_param: String,
}

impl HttpPageSource {
    /// Build a source with its own HTTP client
    ///
    /// The client carries the per-request timeout and the browser-like headers
    /// the upstream expects.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if a header value is invalid or the client
    /// cannot be created
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(default_headers(config)?)
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {}", e),
                key: None,
            })?;

        Ok(Self::with_client(client, config))
    }

    /// Build a source around an existing client
    pub fn with_client(client: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            education_param: config.education_param.clone(),
            category_param: config.category_param.clone(),
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, offset: usize, filter: &FilterKeys) -> Result<Page> {
        let offset_str = offset.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                (self.education_param.as_str(), filter.education_code.as_str()),
                (self.category_param.as_str(), filter.category_code.as_str()),
                ("offset", offset_str.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(
            offset,
            status = status.as_u16(),
            preview = %body.chars().take(PREVIEW_CHARS).collect::<String>(),
            "Upstream response"
        );

        let page = decode_page(offset, body)?;

        // A well-formed envelope on a failing status without the error flag
        if !status.is_success() {
            return Err(Error::UpstreamRejected {
                message: format!("HTTP {}", status),
            });
        }

        Ok(page)
    }
}

/// Decode one upstream response body into a [`Page`]
///
/// The raw body is moved into [`Error::Decode`] when parsing fails so callers
/// can log what the upstream actually sent.
pub fn decode_page(offset: usize, body: String) -> Result<Page> {
    let envelope: Envelope = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            return Err(Error::Decode {
                message: e.to_string(),
                body,
            });
        }
    };

    if envelope.error {
        return Err(Error::UpstreamRejected {
            message: envelope.message,
        });
    }

    // Without a payload there is no total to plan against
    let Some(data) = envelope.data else {
        return Err(Error::Decode {
            message: "response envelope has no data".to_string(),
            body,
        });
    };

    Ok(Page {
        offset,
        records: data.data,
        total: data.meta.total,
    })
}

fn default_headers(config: &UpstreamConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9,id-ID;q=0.8,id;q=0.7"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::ORIGIN, header_value("origin", &config.origin)?);
    headers.insert(header::REFERER, header_value("referer", &config.referer)?);
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-site"));
    Ok(headers)
}

fn header_value(key: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::Config {
        message: format!("invalid {} header value '{}': {}", key, value, e),
        key: Some(key.to_string()),
    })
}
