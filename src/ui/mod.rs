//! Web chat widget for the bot.
//!
//! Serves a single-page chat interface and a JSON message endpoint, and
//! registers the pipeline as the widget's response callback. The server owns
//! the request loop; the pipeline stays stateless. Termination is by process
//! signal only.

mod handlers;
mod types;

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use tower_http::cors::CorsLayer;

use crate::pipeline::Pipeline;
use handlers::{chat_page, handle_chat};

pub use handlers::respond_to_turn;
pub use types::{ChatReply, ChatRequest, HistoryTurn};

/// Chat widget server wrapping one pipeline.
pub struct Server {
    pipeline: Arc<Pipeline>,
}

/// Internal server state shared between request handlers
#[derive(Clone)]
struct ServerState {
    pipeline: Arc<Pipeline>,
}

impl Server {
    /// Creates a new server instance answering with the given pipeline.
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Starts the server and listens for requests on the specified address.
    ///
    /// # Arguments
    /// * `addr` - Address to bind to (e.g. "127.0.0.1:7860")
    ///
    /// Blocks until the process is terminated.
    pub async fn run(self, addr: &str) -> Result<(), crate::error::BotlyError> {
        let app = Router::new()
            .route("/", get(chat_page))
            .route("/api/chat", post(handle_chat))
            .layer(CorsLayer::permissive())
            .with_state(ServerState {
                pipeline: self.pipeline,
            });

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| crate::error::BotlyError::InvalidRequest(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| crate::error::BotlyError::InvalidRequest(e.to_string()))?;

        Ok(())
    }
}
