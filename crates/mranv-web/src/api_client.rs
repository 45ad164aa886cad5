//! HTTP clients for the collaborators the dashboard calls on user action

use async_trait::async_trait;
use mranv_core::config::GiphyConfig;
use mranv_core::{Error, Result, Showcase, ShowcaseSource, TimestampResponse, TimestampSource};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const TIMESTAMP_RESOURCE: &str = "timestamp";
const GIF_RESOURCE: &str = "random GIF";

fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {e}")))
}

/// Client for the plugin's own timestamp endpoint
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the server at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// URL of the timestamp endpoint
    pub fn example_url(&self) -> String {
        format!("{}{}", self.base_url, mranv_api::routes::EXAMPLE_PATH)
    }
}

#[async_trait]
impl TimestampSource for ApiClient {
    #[instrument(skip(self))]
    async fn fetch_timestamp(&self) -> Result<TimestampResponse> {
        let response = self
            .client
            .get(self.example_url())
            .send()
            .await
            .map_err(|e| Error::fetch(TIMESTAMP_RESOURCE, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::fetch(
                TIMESTAMP_RESOURCE,
                format!("API returned error: {}", response.status()),
            ));
        }

        let body: TimestampResponse = response
            .json()
            .await
            .map_err(|e| Error::invalid_response(TIMESTAMP_RESOURCE, e.to_string()))?;
        debug!(time = %body.time, "Fetched timestamp");
        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct GiphyResponse {
    data: GiphyGif,
}

#[derive(Debug, Deserialize)]
struct GiphyGif {
    id: String,
    embed_url: String,
}

/// Client for the random GIF provider
#[derive(Debug, Clone)]
pub struct GiphyClient {
    client: Client,
    config: GiphyConfig,
}

impl GiphyClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: GiphyConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout())?,
            config,
        })
    }

    fn random_url(&self) -> String {
        format!("{}/v1/gifs/random", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ShowcaseSource for GiphyClient {
    #[instrument(skip(self), fields(tag = %self.config.tag))]
    async fn fetch_showcase(&self) -> Result<Showcase> {
        let response = self
            .client
            .get(self.random_url())
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("tag", self.config.tag.as_str()),
                ("rating", self.config.rating.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::fetch(GIF_RESOURCE, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::fetch(
                GIF_RESOURCE,
                format!("provider returned error: {}", response.status()),
            ));
        }

        let body: GiphyResponse = response
            .json()
            .await
            .map_err(|e| Error::invalid_response(GIF_RESOURCE, e.to_string()))?;

        debug!(id = %body.data.id, "Fetched random GIF");
        Ok(Showcase {
            id: body.data.id,
            embed_url: body.data.embed_url,
        })
    }
}
