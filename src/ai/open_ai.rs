use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::ai::TextCompletion;
use crate::config::AiConfig;
use crate::error::CompletionError;

/// Chat-completions backend. The base URL is configurable so a proxy, a
/// compatible local server or a test mock can stand in for the real API.
pub struct OpenAiCompletion {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiCompletion {
    pub fn from_config(config: &AiConfig) -> Result<Self, CompletionError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                CompletionError::NotConfigured(
                    "no API key in config or OPENAI_API_KEY environment".to_string(),
                )
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        // Bounded like the page fetch: a hung endpoint fails the escalation
        // instead of stalling the batch
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(OpenAiCompletion {
            client,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(AiConfig::default().timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        OpenAiCompletion {
            client,
            api_key,
            base_url,
            model,
            temperature: 0.2,
            max_tokens: 2000,
        }
    }
}

impl TextCompletion for OpenAiCompletion {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": system_prompt},
                    {"role": "user", "content": prompt}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()?
            .error_for_status()?;

        let body: Value = response.json()?;
        debug!("completion response: {body:?}");

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                CompletionError::BadResponse("no content in completion response".to_string())
            })
    }
}
