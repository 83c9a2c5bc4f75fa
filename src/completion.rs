use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::data_models::SearchResponse;
use crate::error::{RagError, Result};
use crate::prompt::{SYSTEM_INSTRUCTION, build_prompt};
use crate::transport::{HttpTransport, decode};

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const TEMPERATURE: f32 = 0.3;
pub const MAX_TOKENS: u32 = 1000;

/// Chat-completion client for the generation step of the custom pipeline.
///
/// Sends `POST {base_url}/chat/completions` with a fixed system message and the
/// assembled prompt. Sampling is pinned: temperature 0.3, at most 1000 output tokens.
pub struct CompletionClient {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    url_chat: String,
}

impl CompletionClient {
    pub fn new(transport: Arc<dyn HttpTransport>, api_key: String, base_url: &str) -> Self {
        Self {
            transport,
            api_key,
            url_chat: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        }
    }

    /// Builds the prompt from `response` and returns the generated message text.
    /// A response with no message content yields an empty string.
    pub async fn complete(
        &self,
        query: &str,
        response: &SearchResponse,
        model: &str,
    ) -> Result<String> {
        let prompt = build_prompt(query, response);
        let request = ChatCompletionRequest::new(model, &prompt);
        let body = serde_json::to_value(&request).map_err(|e| {
            RagError::InvalidInput(format!("cannot encode completion request: {e}"))
        })?;

        tracing::debug!(%model, prompt_len = prompt.len(), "requesting completion");

        let started = Instant::now();
        let value = self
            .transport
            .post_json(&self.url_chat, &self.api_key, &body)
            .await?;
        let out: ChatCompletionResponse = decode(&self.url_chat, value)?;

        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.and_then(|m| m.content))
            .unwrap_or_default();

        tracing::info!(
            %model,
            output_len = content.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "chat completion completed"
        );

        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatMessageOut>,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    #[serde(default)]
    content: Option<String>,
}
