//! Generation parameters for the model client.
//!
//! Everything the bot sends alongside a prompt lives here: one immutable
//! record built at startup and passed by value into the client. There are no
//! setters after construction and no validation is performed locally; out of
//! range values are surfaced by the Ollama server at call time.

use serde::{Deserialize, Serialize};

/// Parameters controlling a model invocation.
///
/// `Default` carries the deployment literals the bot ships with. The struct
/// is cheap to clone and never mutated once the pipeline is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Model identifier, e.g. "qwen2.5:1.5b"
    pub model: String,
    /// Base URL of the Ollama server
    pub base_url: String,
    /// Top-k sampling parameter
    pub top_k: u32,
    /// Top-p (nucleus) sampling parameter, in [0, 1]. Passed through
    /// unchanged; the server owns range enforcement.
    pub top_p: f32,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum number of tokens to generate (Ollama `num_predict`)
    pub max_tokens: u32,
    /// How long the server keeps the model loaded between calls, in seconds
    pub keep_alive_seconds: u64,
    /// Whether the server may reuse cached responses. Retained for the
    /// collaborator; has no effect inside this crate.
    pub cache: bool,
    /// Log serialized request payloads at debug level
    pub verbose: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "qwen2.5:1.5b".to_string(),
            base_url: "http://localhost:11434".to_string(),
            top_k: 40,
            top_p: 0.9,
            temperature: 0.8,
            max_tokens: 256,
            keep_alive_seconds: 300,
            cache: false,
            verbose: false,
        }
    }
}
