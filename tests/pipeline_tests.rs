//! Pipeline and widget-callback behavior against a deterministic stub model
//! client. No network access is required by any test here.

use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use botly::chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole};
use botly::ui::{respond_to_turn, HistoryTurn};
use botly::{BotlyError, Pipeline, PromptTemplate};

#[derive(Debug)]
struct StubResponse(Option<String>);

impl fmt::Display for StubResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_deref().unwrap_or_default())
    }
}

impl ChatResponse for StubResponse {
    fn text(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Stub client that records every prompt it receives and answers the last
/// user turn with an exclamation mark appended.
#[derive(Default)]
struct EchoProvider {
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl EchoProvider {
    fn prompts(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for EchoProvider {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, BotlyError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(Box::new(StubResponse(Some(format!("{last_user}!")))))
    }
}

/// Stub client that fails every call.
struct FailingProvider;

#[async_trait]
impl ChatProvider for FailingProvider {
    async fn chat(&self, _messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, BotlyError> {
        Err(BotlyError::ProviderError("model unavailable".to_string()))
    }
}

/// Stub client that answers with a response carrying no text at all.
struct TextlessProvider;

#[async_trait]
impl ChatProvider for TextlessProvider {
    async fn chat(&self, _messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, BotlyError> {
        Ok(Box::new(StubResponse(None)))
    }
}

fn echo_pipeline() -> (Arc<EchoProvider>, Pipeline) {
    let provider = Arc::new(EchoProvider::default());
    let pipeline = Pipeline::new(provider.clone(), PromptTemplate::default());
    (provider, pipeline)
}

#[tokio::test]
async fn composing_twice_yields_identical_output() {
    let (_, first) = echo_pipeline();
    let (_, second) = echo_pipeline();

    let a = first.respond("What is Rust?").await.unwrap();
    let b = second.respond("What is Rust?").await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn bonjour_end_to_end() {
    let (provider, pipeline) = echo_pipeline();

    let answer = pipeline.respond("Bonjour").await.unwrap();
    assert_eq!(answer, "Bonjour!");

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert_eq!(prompt.len(), 2);
    assert_eq!(prompt[0].role, ChatRole::System);
    assert_eq!(
        prompt[0].content,
        "You are a helpful assistant. Always answer as short as possible."
    );
    assert_eq!(prompt[1].role, ChatRole::User);
    assert_eq!(prompt[1].content, "Bonjour");
}

#[tokio::test]
async fn history_does_not_change_the_prompt() {
    let (provider, pipeline) = echo_pipeline();

    let no_history: [HistoryTurn; 0] = [];
    respond_to_turn(&pipeline, "What about borrowing?", &no_history)
        .await
        .unwrap();

    let history = [HistoryTurn {
        user: "previous q".to_string(),
        assistant: "previous a".to_string(),
    }];
    respond_to_turn(&pipeline, "What about borrowing?", &history)
        .await
        .unwrap();

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0], prompts[1]);
}

#[tokio::test]
async fn provider_errors_propagate_unchanged() {
    let pipeline = Pipeline::new(Arc::new(FailingProvider), PromptTemplate::default());

    let err = pipeline.respond("Hello").await.unwrap_err();
    match err {
        BotlyError::ProviderError(msg) => assert_eq!(msg, "model unavailable"),
        other => panic!("expected ProviderError, got {other:?}"),
    }
}

#[tokio::test]
async fn textless_response_is_an_error_not_an_empty_reply() {
    let pipeline = Pipeline::new(Arc::new(TextlessProvider), PromptTemplate::default());

    let err = pipeline.respond("Hello").await.unwrap_err();
    assert!(matches!(err, BotlyError::ProviderError(_)));
}

#[tokio::test]
async fn widget_callback_returns_the_answer_verbatim() {
    let (_, pipeline) = echo_pipeline();

    let answer = respond_to_turn(&pipeline, "Namaste", &[]).await.unwrap();
    assert_eq!(answer, "Namaste!");
}
