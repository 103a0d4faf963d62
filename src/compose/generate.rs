//! AI-drafted invitations via the Anthropic Messages API.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation (blocking reqwest)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_VIBE: &str = "fun and casual";

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("AI drafting is not configured (set ANTHROPIC_API_KEY)")]
    NotConfigured,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API returned no text")]
    EmptyReply,
}

/// What the drafter needs to know about one invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRequest {
    pub event: String,
    pub first_name: String,
    pub vibe: String,
}

impl DraftRequest {
    pub fn new(event: &str, first_name: &str, vibe: Option<&str>) -> Self {
        let vibe = vibe
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_VIBE);
        Self {
            event: event.trim().to_string(),
            first_name: first_name.trim().to_string(),
            vibe: vibe.to_string(),
        }
    }
}

/// Produces one text message per request.
pub trait MessageGenerator {
    fn generate(&self, request: &DraftRequest) -> Result<String, GenerateError>;
}

/// Prompt sent to the model for one recipient.
pub fn build_prompt(request: &DraftRequest) -> String {
    format!(
        r#"You are a hype-master party invitation writer. Your job is to craft SHORT, punchy text messages that make people EXCITED to come to an event.

RULES:
- Keep it under 160 characters (it's a text message!)
- Use the person's first name naturally
- Match the vibe requested but always bring energy
- No hashtags, no emojis overload (1-2 max if any)
- Sound like a real friend texting, not a robot
- Make them feel like they'd be missing out if they don't come
- Don't include any greeting like "Hey" at the start - jump right in

EVENT: {}
RECIPIENT'S FIRST NAME: {}
VIBE: {}

Write ONE text message. Just the message, nothing else."#,
        request.event, request.first_name, request.vibe
    )
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

impl ApiResponse {
    fn first_text(&self) -> Option<String> {
        self.content
            .iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text.as_deref())
            .map(str::trim)
            .find(|text| !text.is_empty())
            .map(str::to_string)
    }
}

/// Blocking client for the Messages API.
pub struct AnthropicClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    endpoint: String,
}

impl AnthropicClient {
    pub fn new(api_key: &str, model: &str, max_tokens: u32) -> Result<Self, GenerateError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(GenerateError::NotConfigured);
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens,
            endpoint: MESSAGES_URL.to_string(),
        })
    }

    /// Build from settings, or `None` when no key is configured.
    pub fn from_settings(settings: &crate::config::Settings) -> Result<Option<Self>, GenerateError> {
        match settings.api_key.as_deref() {
            Some(key) => Self::new(key, &settings.model, settings.max_tokens).map(Some),
            None => Ok(None),
        }
    }
}

impl MessageGenerator for AnthropicClient {
    fn generate(&self, request: &DraftRequest) -> Result<String, GenerateError> {
        let body = ApiRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![ApiMessage {
                role: "user",
                content: build_prompt(request),
            }],
        };

        tracing::debug!(model = %self.model, recipient = %request.first_name, "requesting draft");
        let resp = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "draft request rejected");
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let parsed: ApiResponse = resp.json()?;
        parsed.first_text().ok_or(GenerateError::EmptyReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_vibe() {
        let req = DraftRequest::new(" Rooftop BBQ ", "Ada", Some("  "));
        assert_eq!(req.event, "Rooftop BBQ");
        assert_eq!(req.vibe, DEFAULT_VIBE);
    }

    #[test]
    fn test_prompt_mentions_inputs() {
        let prompt = build_prompt(&DraftRequest::new("Rooftop BBQ Saturday", "Ada", Some("chill")));
        assert!(prompt.contains("EVENT: Rooftop BBQ Saturday"));
        assert!(prompt.contains("RECIPIENT'S FIRST NAME: Ada"));
        assert!(prompt.contains("VIBE: chill"));
        assert!(prompt.contains("under 160 characters"));
        assert!(prompt.ends_with("Just the message, nothing else."));
    }

    #[test]
    fn test_request_body_shape() {
        let body = ApiRequest {
            model: "m",
            max_tokens: 150,
            messages: vec![ApiMessage {
                role: "user",
                content: "hi".to_string(),
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["max_tokens"], 150);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_first_text_block() {
        let resp: ApiResponse = serde_json::from_str(
            r#"{"content": [{"type": "thinking", "thinking": "..."}, {"type": "text", "text": "  Ada, rooftop BBQ Saturday!  "}]}"#,
        )
        .unwrap();
        assert_eq!(resp.first_text().as_deref(), Some("Ada, rooftop BBQ Saturday!"));
    }

    #[test]
    fn test_empty_reply() {
        let resp: ApiResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(resp.first_text().is_none());
    }

    #[test]
    fn test_client_requires_key() {
        assert!(matches!(
            AnthropicClient::new("  ", "m", 150),
            Err(GenerateError::NotConfigured)
        ));
    }
}
