//! Prompt template construction and rendering.
//!
//! A template is an ordered list of `(role, content)` turns whose contents
//! may carry `{{name}}` placeholders resolved per invocation. The default
//! template is the bot's fixed pair: a system instruction plus a user turn
//! holding the `{{input_message}}` placeholder.

use std::collections::HashMap;

use crate::{
    chat::{ChatMessage, ChatRole},
    error::BotlyError,
};

/// Name of the placeholder the pipeline fills with the user's utterance.
pub const INPUT_MESSAGE: &str = "input_message";

/// Fixed system instruction framing the assistant's behavior.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant. Always answer as short as possible.";

/// An ordered sequence of role/content turns with per-invocation
/// placeholders. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    turns: Vec<(ChatRole, String)>,
}

impl Default for PromptTemplate {
    /// The bot's two-turn template: system instruction, then the user
    /// placeholder.
    fn default() -> Self {
        Self::from_turns(vec![
            (ChatRole::System, SYSTEM_INSTRUCTION.to_string()),
            (ChatRole::User, format!("{{{{{INPUT_MESSAGE}}}}}")),
        ])
    }
}

impl PromptTemplate {
    /// Creates a template from explicit turns.
    pub fn from_turns(turns: Vec<(ChatRole, String)>) -> Self {
        Self { turns }
    }

    /// The template's turns, in order.
    pub fn turns(&self) -> &[(ChatRole, String)] {
        &self.turns
    }

    /// Renders the template against the given variables.
    ///
    /// Every `{{name}}` placeholder is replaced with its value from `vars`;
    /// a placeholder with no matching key is a
    /// [`BotlyError::TemplateError`]. Values are inserted verbatim and never
    /// re-scanned, so braces in user input survive untouched.
    pub fn render(&self, vars: &HashMap<String, String>) -> Result<Vec<ChatMessage>, BotlyError> {
        self.turns
            .iter()
            .map(|(role, template)| {
                Ok(ChatMessage {
                    role: *role,
                    content: fill(template, vars)?,
                })
            })
            .collect()
    }
}

/// Substitutes every `{{name}}` placeholder in one turn.
fn fill(template: &str, vars: &HashMap<String, String>) -> Result<String, BotlyError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            // unmatched opening braces are literal text
            break;
        };
        let name = &after[..end];
        let value = vars.get(name).ok_or_else(|| {
            BotlyError::TemplateError(format!("missing value for placeholder: {}", name))
        })?;
        out.push_str(&rest[..start]);
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}
