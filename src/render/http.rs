use std::time::Duration;

use crate::{
    config::ServiceConfig,
    error::{Result, SignError},
    models::billboard::{GenerationReply, GenerationRequest},
    render::traits::RenderService,
};
use async_trait::async_trait;
use reqwest::Client;

/// Rendering service reached over HTTP. The reply body is parsed no matter
/// the status code; the service reports rejections in the body, not the
/// status line.
pub struct HttpRenderService {
    client: Client,
    base_url: String,
}

impl HttpRenderService {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .ok_or_else(|| SignError::ConfigError("Service base URL is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SignError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Artifact locations may be service-relative paths; resolve them
    /// against the base URL.
    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }
}

#[async_trait]
impl RenderService for HttpRenderService {
    async fn render(&self, request: &GenerationRequest) -> Result<GenerationReply> {
        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| SignError::RequestError(format!("Generation request failed: {}", e)))?;

        let body = response
            .text()
            .await
            .map_err(|e| SignError::ResponseError(format!("Failed to read reply body: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| SignError::ResponseError(format!("Unparsable reply body: {}", e)))
    }

    async fn fetch_artifact(&self, url: &str) -> Result<Vec<u8>> {
        let location = self.resolve(url);
        log::debug!("Fetching artifact from {}", location);

        let response = self
            .client
            .get(&location)
            .send()
            .await
            .map_err(|e| SignError::RequestError(format!("Artifact fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SignError::ResponseError(format!(
                "Artifact fetch returned status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SignError::ResponseError(format!("Failed to read artifact: {}", e)))?;

        Ok(bytes.to_vec())
    }
}
