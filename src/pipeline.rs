//! Composition of template, model client, and text extraction into one
//! callable pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    chat::ChatProvider,
    error::BotlyError,
    prompt::{PromptTemplate, INPUT_MESSAGE},
};

/// A composed function from raw user input to generated response string.
///
/// Owns no mutable state: the client handle and template are fixed at
/// construction, so one pipeline may be invoked repeatedly and concurrently.
/// Any failure in rendering or invocation propagates unchanged; there is no
/// fallback response path.
pub struct Pipeline {
    client: Arc<dyn ChatProvider>,
    template: PromptTemplate,
}

impl Pipeline {
    /// Composes a client handle and a prompt template into a pipeline.
    pub fn new(client: Arc<dyn ChatProvider>, template: PromptTemplate) -> Self {
        Self { client, template }
    }

    /// Maps one user utterance to a generated string.
    ///
    /// Wraps `user_text` under the `input_message` key, renders the
    /// template, invokes the model client, and extracts the textual payload
    /// from its response. A response with no text is a provider error, not
    /// an empty reply.
    pub async fn respond(&self, user_text: &str) -> Result<String, BotlyError> {
        let vars = HashMap::from([(INPUT_MESSAGE.to_string(), user_text.to_string())]);
        let messages = self.template.render(&vars)?;
        let response = self.client.chat(&messages).await?;
        response
            .text()
            .ok_or_else(|| BotlyError::ProviderError("No answer returned by the model".to_string()))
    }
}
