//! Chat-completion client backing the strategy assistant

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::READY_SENTINEL;

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("LLM API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("LLM returned no choices")]
    EmptyReply,
}

/// One-shot completion: a fixed system prompt plus the user's message
#[async_trait]
pub trait ChatAssistant: Send + Sync {
    async fn complete(&self, system_prompt: &str, message: &str)
    -> Result<String, AssistantError>;
}

/// True when the assistant signalled that it can draft a script
pub fn detect_ready(reply: &str) -> bool {
    reply.contains(READY_SENTINEL)
}

#[derive(Clone)]
pub struct ChatClient {
    api_key: String,
    base_url: String,
    model: String,
    http: Client,
}

impl ChatClient {
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ChatAssistant for ChatClient {
    async fn complete(
        &self,
        system_prompt: &str,
        message: &str,
    ) -> Result<String, AssistantError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = CompletionRequest {
            model: &self.model,
            messages: [
                RequestMessage {
                    role: "system",
                    content: system_prompt,
                },
                RequestMessage {
                    role: "user",
                    content: message,
                },
            ],
        };

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(AssistantError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = resp.json().await?;
        completion.into_reply()
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [RequestMessage<'a>; 2],
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

impl CompletionResponse {
    fn into_reply(self) -> Result<String, AssistantError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or(AssistantError::EmptyReply)
    }
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
