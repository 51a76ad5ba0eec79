//! Resume generation through an OpenAI-compatible chat completions API.
//!
//! The API key is held only inside [`LlmClient`] and sent as a bearer token;
//! it never reaches a log line or an error message.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use resumekit_shared::{OpenAiSection, ResumeKitError, Result};

use crate::profile::UserProfile;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const SYSTEM_PROMPT: &str = "You are a resume writer. Create a concise, professional resume in Markdown. \
Use clear section headers. Summarize impact with strong verbs and measurable outcomes when available. \
Include contact info at top. Keep it to 1 page if possible.";

const USER_PREAMBLE: &str = "Please generate a resume that accurately reflects the following structured \
information and the additional free-form text. Output must be valid Markdown.";

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Profile fields plus the raw text, as embedded in the user message.
#[derive(Serialize)]
struct StructuredInput<'a> {
    #[serde(flatten)]
    profile: &'a UserProfile,
    user_raw_text: &'a str,
}

/// Build the system and user messages for one generation request.
pub fn build_messages(profile: &UserProfile, raw_text: &str) -> Result<Vec<ChatMessage>> {
    let structured = serde_json::to_string_pretty(&StructuredInput {
        profile,
        user_raw_text: raw_text,
    })
    .map_err(|e| ResumeKitError::Llm(format!("failed to encode profile: {e}")))?;

    Ok(vec![
        ChatMessage {
            role: "system",
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: "user",
            content: format!("{USER_PREAMBLE}\n\nStructured JSON:\n{structured}"),
        },
    ])
}

/// Client for the chat completions endpoint.
pub struct LlmClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f64,
    api_key: String,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl LlmClient {
    pub fn new(settings: &OpenAiSection, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ResumeKitError::Llm(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/chat/completions",
                settings.base_url.trim_end_matches('/')
            ),
            model: settings.model.clone(),
            temperature: settings.temperature,
            api_key,
        })
    }

    /// Override the configured model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for a Markdown resume built from `profile` and `raw_text`.
    #[instrument(skip_all, fields(model = %self.model))]
    pub async fn generate_resume(&self, profile: &UserProfile, raw_text: &str) -> Result<String> {
        let messages = build_messages(profile, raw_text)?;
        let body = ChatRequest {
            model: &self.model,
            messages: &messages,
            temperature: self.temperature,
        };

        debug!(raw_len = raw_text.len(), "sending chat completion request");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ResumeKitError::Llm(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(ResumeKitError::Llm(format!(
                "API returned HTTP {}: {message}",
                status.as_u16()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ResumeKitError::Llm(format!("invalid response body: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ResumeKitError::Llm("model returned empty content".into()))?;

        info!(len = content.len(), "resume generated");
        Ok(content)
    }
}
