//! Ollama API client implementation for chat functionality.
//!
//! This module provides integration with Ollama's local LLM server through
//! its chat API. The client is bound to one [`GenerationConfig`] at
//! construction and performs no local validation of its parameters; the
//! server rejects out of range values at call time.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse},
    config::GenerationConfig,
    error::BotlyError,
};
use async_trait::async_trait;

/// Client for interacting with Ollama's API.
///
/// The underlying connection is opened lazily on first use. No retries and
/// no local timeout: a failed call aborts that turn's response.
pub struct Ollama {
    config: GenerationConfig,
    client: Client,
}

/// Request payload for Ollama's chat API endpoint.
#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaChatMessage<'a>>,
    stream: bool,
    keep_alive: String,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    top_k: u32,
    top_p: f32,
    temperature: f32,
    num_predict: u32,
}

/// Individual message in an Ollama chat conversation.
#[derive(Serialize)]
struct OllamaChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from Ollama's API endpoints.
#[derive(Deserialize, Debug)]
struct OllamaResponse {
    content: Option<String>,
    response: Option<String>,
    message: Option<OllamaChatResponseMessage>,
}

/// Message content within an Ollama chat API response.
#[derive(Deserialize, Debug)]
struct OllamaChatResponseMessage {
    content: String,
}

impl std::fmt::Display for OllamaResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text().unwrap_or_default())
    }
}

impl ChatResponse for OllamaResponse {
    fn text(&self) -> Option<String> {
        self.content
            .as_ref()
            .or(self.response.as_ref())
            .or(self.message.as_ref().map(|m| &m.content))
            .map(|s| s.to_string())
    }
}

impl Ollama {
    /// Creates a new Ollama client bound to the given configuration.
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            client: Client::builder()
                .build()
                .expect("Failed to build reqwest Client"),
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Builds the request payload for a chat call.
    ///
    /// Pure function of the bound configuration plus the messages: every
    /// sampling parameter travels unchanged into the `options` bundle, with
    /// no clamping.
    fn request_body<'a>(&'a self, messages: &'a [ChatMessage]) -> OllamaChatRequest<'a> {
        OllamaChatRequest {
            model: &self.config.model,
            messages: messages
                .iter()
                .map(|msg| OllamaChatMessage {
                    role: msg.role.as_str(),
                    content: &msg.content,
                })
                .collect(),
            stream: false,
            keep_alive: format!("{}s", self.config.keep_alive_seconds),
            options: OllamaOptions {
                top_k: self.config.top_k,
                top_p: self.config.top_p,
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        }
    }
}

#[async_trait]
impl ChatProvider for Ollama {
    /// Sends a chat request to Ollama's API.
    ///
    /// # Arguments
    ///
    /// * `messages` - Slice of chat messages representing the rendered prompt
    ///
    /// # Returns
    ///
    /// The model's response object or an error
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, BotlyError> {
        if self.config.base_url.is_empty() {
            return Err(BotlyError::InvalidRequest("Missing base_url".to_string()));
        }

        let req_body = self.request_body(messages);

        if self.config.verbose {
            if let Ok(json) = serde_json::to_string(&req_body) {
                log::debug!("Ollama request payload: {}", json);
            }
        }

        let url = format!("{}/api/chat", self.config.base_url);

        let resp = self.client.post(&url).json(&req_body).send().await?;

        log::debug!("Ollama HTTP status: {}", resp.status());

        let resp = resp.error_for_status()?;
        let json_resp: OllamaResponse = resp.json().await?;
        Ok(Box::new(json_resp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body_json(config: GenerationConfig, messages: &[ChatMessage]) -> serde_json::Value {
        let client = Ollama::new(config);
        serde_json::to_value(client.request_body(messages)).unwrap()
    }

    #[test]
    fn request_carries_config_unchanged() {
        let config = GenerationConfig::default();
        let body = body_json(config, &[ChatMessage::user("Hello")]);

        assert_eq!(body["model"], "qwen2.5:1.5b");
        assert_eq!(body["stream"], json!(false));
        assert_eq!(body["keep_alive"], "300s");
        assert_eq!(body["options"]["top_k"], 40);
        assert_eq!(body["options"]["temperature"], json!(0.8f32));
        assert_eq!(body["options"]["num_predict"], 256);
        assert_eq!(
            body["messages"],
            json!([{"role": "user", "content": "Hello"}])
        );
    }

    #[test]
    fn top_p_passes_through_without_clamping() {
        for top_p in [0.0f32, 0.37, 0.9, 1.0] {
            let config = GenerationConfig {
                top_p,
                ..GenerationConfig::default()
            };
            let body = body_json(config, &[ChatMessage::user("x")]);
            assert_eq!(body["options"]["top_p"], json!(top_p));
        }
    }

    #[test]
    fn roles_map_to_wire_names() {
        let body = body_json(
            GenerationConfig::default(),
            &[
                ChatMessage::system("be brief"),
                ChatMessage::user("hi"),
                ChatMessage::assistant("hello"),
            ],
        );
        let roles: Vec<&str> = body["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, ["system", "user", "assistant"]);
    }

    #[test]
    fn response_text_prefers_message_content() {
        let resp: OllamaResponse =
            serde_json::from_value(json!({"message": {"role": "assistant", "content": "Bonjour!"}}))
                .unwrap();
        assert_eq!(resp.text(), Some("Bonjour!".to_string()));

        let resp: OllamaResponse = serde_json::from_value(json!({"response": "plain"})).unwrap();
        assert_eq!(resp.text(), Some("plain".to_string()));

        let resp: OllamaResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(resp.text(), None);
    }
}
