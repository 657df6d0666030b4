use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
	pub role: String,
	pub content: String,
}
impl ChatMessage {
	pub fn system(content: impl Into<String>) -> Self {
		Self { role: "system".to_string(), content: content.into() }
	}

	pub fn user(content: impl Into<String>) -> Self {
		Self { role: "user".to_string(), content: content.into() }
	}

	pub fn assistant(content: impl Into<String>) -> Self {
		Self { role: "assistant".to_string(), content: content.into() }
	}
}

/// Sends one OpenAI-compatible chat completion request and returns the reply text.
///
/// A single attempt is made. The configured timeout bounds the whole exchange.
pub async fn complete(
	cfg: &success_config::LlmProviderConfig,
	messages: &[ChatMessage],
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base.trim_end_matches('/'), cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": messages,
	});

	tracing::debug!(
		provider = %cfg.provider_id,
		model = %cfg.model,
		messages = messages.len(),
		"Sending chat completion."
	);

	let res = client
		.post(&url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_chat_response(&json)
}

fn parse_chat_response(json: &Value) -> Result<String> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Chat response is missing choices[0].message.content.".to_string(),
		})?;

	Ok(content.trim().to_string())
}
