use serde::{Deserialize, Serialize};

/// Request payload for the chat message endpoint
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's new message
    pub message: String,
    /// Prior turns as kept by the widget. Accepted but not consulted when
    /// generating the answer.
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

/// One completed user/assistant exchange in the widget's history
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryTurn {
    /// What the user said
    pub user: String,
    /// What the assistant answered
    pub assistant: String,
}

/// Response payload from the chat message endpoint
#[derive(Debug, Serialize)]
pub struct ChatReply {
    /// The generated answer
    pub response: String,
}
