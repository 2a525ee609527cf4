use axum::{extract::State, http::StatusCode, response::Html, Json};

use super::types::{ChatReply, ChatRequest, HistoryTurn};
use super::ServerState;
use crate::{error::BotlyError, pipeline::Pipeline};

/// Serves the chat widget page.
pub(super) async fn chat_page() -> Html<&'static str> {
    Html(include_str!("chat.html"))
}

/// Handles chat message requests from the widget.
///
/// # Arguments
/// * `state` - Server state holding the pipeline
/// * `req` - Chat request containing the new message and widget history
///
/// # Returns
/// * `Ok(Json<ChatReply>)` - The generated answer
/// * `Err((StatusCode, String))` - The propagated pipeline error; no
///   substitute reply is produced
pub(super) async fn handle_chat(
    State(state): State<ServerState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, String)> {
    let response = respond_to_turn(&state.pipeline, &req.message, &req.history)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(ChatReply { response }))
}

/// The widget's response callback.
///
/// `history` is accepted but ignored: each turn is answered independently
/// and the assistant has no memory of prior turns beyond what the user
/// repeats. This limitation is inherited as-is; do not feed the history into
/// the pipeline.
pub async fn respond_to_turn(
    pipeline: &Pipeline,
    question: &str,
    _history: &[HistoryTurn],
) -> Result<String, BotlyError> {
    pipeline.respond(question).await
}
