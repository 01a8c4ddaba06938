//! AI proxy client.
//!
//! One request: `POST {base}/api/ai/ask` with `{"prompt": ...}`. The parsed
//! body comes back as-is; there is no retry, timeout, or schema check.
//! Transport and decode failures are returned to the caller.

use serde::Serialize;
use serde_json::Value;

const ASK_PATH: &str = "/api/ai/ask";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request to the proxy failed.
    #[error("AI request failed: {0}")]
    Request(String),

    /// The proxy body was not JSON.
    #[error("AI response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// TRAIT
// =============================================================================

/// Provider-neutral seam for the AI page. Enables mocking in route tests.
#[async_trait::async_trait]
pub trait AiAsk: Send + Sync {
    /// Submit `prompt` and return the proxy's JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`AiError`] if the request fails or the body is not JSON.
    async fn ask(&self, prompt: &str) -> Result<Value, AiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Serialize)]
struct AskRequest<'a> {
    prompt: &'a str,
}

pub struct AiClient {
    http: reqwest::Client,
    base_url: String,
}

impl AiClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: &str) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{ASK_PATH}", self.base_url)
    }
}

#[async_trait::async_trait]
impl AiAsk for AiClient {
    async fn ask(&self, prompt: &str) -> Result<Value, AiError> {
        let response = self
            .http
            .post(self.endpoint())
            .json(&AskRequest { prompt })
            .send()
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;

        let text = response
            .text()
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| AiError::Parse(e.to_string()))
    }
}

/// Text to show for a proxy body: a truthy `response` field (strings as-is,
/// other values as JSON), else the whole body as compact JSON.
#[must_use]
pub fn response_text(body: &Value) -> String {
    match body.get("response") {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        Some(value) if is_truthy(value) => value.to_string(),
        _ => body.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
