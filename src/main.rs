use std::sync::Arc;

use log::info;

use botly::{
    backends::ollama::Ollama, ui::Server, BotlyError, GenerationConfig, Pipeline, PromptTemplate,
};

/// Address the chat widget is served on. All parameters are compile-time
/// literals; there are no CLI flags, environment variables, or config files.
const BIND_ADDR: &str = "127.0.0.1:7860";

#[tokio::main]
async fn main() -> Result<(), BotlyError> {
    botly::init_logging();

    info!("Botly V2 is initializing...");

    info!("Initializing Ollama...");
    let config = GenerationConfig::default();
    let client = Ollama::new(config);

    info!("Initializing prompt template...");
    let template = PromptTemplate::default();

    info!("Initializing pipeline...");
    let pipeline = Pipeline::new(Arc::new(client), template);

    info!("Initializing web UI...");
    let server = Server::new(pipeline);

    info!("Botly V2 is running on http://{BIND_ADDR}");
    server.run(BIND_ADDR).await?;

    info!("Botly V2 is stopping...");
    Ok(())
}
