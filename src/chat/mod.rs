use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BotlyError;

/// Role of a participant in a chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    /// Instruction turn that frames the assistant's behavior
    System,
    /// The user/human participant in the conversation
    User,
    /// The AI assistant participant in the conversation
    Assistant,
}

impl ChatRole {
    /// Wire name of the role, as the Ollama chat API expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of who sent this message
    pub role: ChatRole,
    /// The text content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Response object returned by a chat provider.
pub trait ChatResponse: fmt::Debug + fmt::Display {
    /// The textual payload of the response, if the provider produced one.
    fn text(&self) -> Option<String>;
}

/// Trait for clients that answer chat-style requests.
///
/// This is the seam between the pipeline and the model server: the real
/// Ollama client implements it over HTTP, and tests substitute deterministic
/// stubs. Implementations must be safe to share across concurrent callers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Sends a chat request to the provider with a sequence of messages.
    ///
    /// # Arguments
    ///
    /// * `messages` - The rendered prompt as a slice of chat messages
    ///
    /// # Returns
    ///
    /// The provider's response object or an error
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, BotlyError>;
}
