//! Ollama `/api/generate` client.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{LlmError, ModelClient, PromptTemplate, PromptVars};
use crate::domain::ModelConfig;

/// Blocking, non-streaming client for a local Ollama server.
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(config: &ModelConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/generate", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions { temperature: self.temperature },
        };

        let response = self.client.post(&self.endpoint).json(&request).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api { status: status.as_u16(), body });
        }

        let body: GenerateResponse =
            response.json().map_err(|e| LlmError::Parse(e.to_string()))?;
        Ok(body.response)
    }
}

impl ModelClient for OllamaClient {
    fn generate(&self, template: PromptTemplate, vars: &PromptVars) -> Result<String, LlmError> {
        let prompt = template.render(vars)?;
        tracing::debug!(template = %template, model = %self.model, "Sending prompt ({} chars)", prompt.len());
        self.complete(&prompt)
    }
}
