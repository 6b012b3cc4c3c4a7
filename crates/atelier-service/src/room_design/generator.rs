//! Image generation behind a trait, with an OpenAI-compatible adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use atelier_core::config::AiConfig;
use atelier_core::error::AppError;

/// Prompt plus rendering options for one image.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
}

/// Produces an image URL for a prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image and return its URL.
    ///
    /// Fails with `ServiceUnavailable` when not configured and
    /// `ExternalService` when the upstream call fails.
    async fn generate(&self, request: &ImageRequest) -> Result<String, AppError>;
}

#[derive(Serialize)]
struct GenerationBody<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    quality: &'a str,
}

#[derive(Deserialize)]
struct GenerationResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Deserialize)]
struct GeneratedImage {
    url: Option<String>,
}

/// Calls `POST {base_url}/images/generations`.
pub struct OpenAiImageGenerator {
    client: Client,
    config: AiConfig,
}

impl OpenAiImageGenerator {
    /// Build a client with the configured request timeout.
    pub fn new(config: AiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::configuration(format!("Failed to build image generation client: {e}"))
            })?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/images/generations", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    async fn generate(&self, request: &ImageRequest) -> Result<String, AppError> {
        if !self.config.is_configured() {
            return Err(AppError::service_unavailable(
                "Image generation is not configured",
            ));
        }

        debug!(model = %self.config.model, size = %self.config.size, "Requesting image");
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&GenerationBody {
                model: &self.config.model,
                prompt: &request.prompt,
                n: 1,
                size: &self.config.size,
                quality: &self.config.quality,
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Image generation request failed");
                AppError::external_service("Image generation request failed")
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Image generation rejected");
            return Err(AppError::external_service(format!(
                "Image generation failed with status {status}"
            )));
        }

        let parsed: GenerationResponse = response.json().await.map_err(|e| {
            AppError::external_service(format!("Invalid image generation response: {e}"))
        })?;

        parsed
            .data
            .into_iter()
            .find_map(|image| image.url)
            .ok_or_else(|| AppError::external_service("Image generation returned no image"))
    }
}

#[cfg(test)]
mod tests {
    use atelier_core::ErrorKind;

    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_unavailable() {
        let generator = OpenAiImageGenerator::new(AiConfig::default()).unwrap();
        let err = generator
            .generate(&ImageRequest {
                prompt: "a room".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_endpoint_trims_slash() {
        let generator = OpenAiImageGenerator::new(AiConfig {
            base_url: "http://localhost:9999/v1/".to_string(),
            ..AiConfig::default()
        })
        .unwrap();
        assert_eq!(generator.endpoint(), "http://localhost:9999/v1/images/generations");
    }

    #[test]
    fn test_body_omits_empty_quality() {
        let body = serde_json::to_value(GenerationBody {
            model: "dall-e-3",
            prompt: "p",
            n: 1,
            size: "1024x1024",
            quality: "",
        })
        .unwrap();
        assert!(body.get("quality").is_none());
        assert_eq!(body["n"], 1);
    }
}
