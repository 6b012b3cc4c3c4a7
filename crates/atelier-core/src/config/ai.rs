//! Image generation configuration for the room designer.

use serde::{Deserialize, Serialize};

/// OpenAI-compatible image generation endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key. Empty disables room design generation.
    #[serde(default)]
    pub api_key: String,
    /// API base URL, without the `/images/generations` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Image model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Requested image size.
    #[serde(default = "default_size")]
    pub size: String,
    /// Requested quality. Empty omits the field.
    #[serde(default = "default_quality")]
    pub quality: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            size: default_size(),
            quality: default_quality(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl AiConfig {
    /// Whether an API key has been configured.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "dall-e-3".to_string()
}

fn default_size() -> String {
    "1024x1024".to_string()
}

fn default_quality() -> String {
    "hd".to_string()
}

fn default_timeout() -> u64 {
    60
}
