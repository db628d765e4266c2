//! Domain advisory via an OpenAI-compatible chat-completions API
//!
//! The backend sits behind [`AdvisoryBackend`] so it can be swapped for
//! [`FakeAdvisoryBackend`] in tests. Failures never abort a run: they are
//! turned into text and shown in place of the analysis.

use crate::config::AdvisoryConfig;
use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

pub const SYSTEM_PROMPT: &str =
    "You are an assistant that provides in-depth domain name analysis and recommendations.";

/// Returned without any backend call when there is nothing to analyze
pub const NO_DOMAINS_MESSAGE: &str = "No domains provided for analysis.";

/// Advisory backend errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum AdvisoryError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    #[error("Authentication failed (HTTP {0}){}", detail(.1))]
    Authentication(u16, Option<String>),

    #[error("Quota or rate limit exceeded (HTTP 429){}", detail(.0))]
    Quota(Option<String>),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Service returned empty response")]
    EmptyResponse,
}

/// `": message"` when the service explained itself, nothing otherwise
fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

/// Text-generation capability: one system + user prompt in, free text out
pub trait AdvisoryBackend {
    fn submit(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AdvisoryError>;
}

/// Build the fixed analysis prompt around the newline-joined domain list
pub fn build_prompt(domains: &[String]) -> String {
    format!(
        "Analyze the following domain names based on their potential value and provide a specific recommendation for each. \
         Consider factors like brandability, relevance to industries or trends, commercial potential, and any risks. \
         Format the response as a numbered list with a brief explanation for each domain.\n\n\
         Domains:\n{}\n\n\
         Provide concise recommendations for each domain:",
        domains.join("\n")
    )
}

/// Ask the backend for an analysis of `domains`.
///
/// Always returns displayable text: the analysis, the fixed empty-list
/// message, or a description of what went wrong.
pub fn analyze_domains(backend: &dyn AdvisoryBackend, domains: &[String]) -> String {
    if domains.is_empty() {
        return NO_DOMAINS_MESSAGE.to_string();
    }

    let prompt = build_prompt(domains);
    match backend.submit(SYSTEM_PROMPT, &prompt) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("Advisory request failed: {}", e);
            format!("Advisory service error: {}", e)
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

/// Real backend talking to `{endpoint}/v1/chat/completions`
pub struct OpenAiAdvisoryClient {
    config: AdvisoryConfig,
    client: reqwest::blocking::Client,
}

impl OpenAiAdvisoryClient {
    pub fn new(config: AdvisoryConfig) -> Result<Self, AdvisoryError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdvisoryError::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

impl AdvisoryBackend for OpenAiAdvisoryClient {
    fn submit(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AdvisoryError> {
        // Key is looked up per call; a missing key only matters once advice is requested
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| AdvisoryError::MissingApiKey(self.config.api_key_env.clone()))?;

        let request_body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let url = self.completions_url();
        debug!("POST {} (model {})", url, self.config.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    AdvisoryError::Timeout(self.config.timeout_secs)
                } else {
                    AdvisoryError::HttpError(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        let response_json: serde_json::Value = response
            .json()
            .map_err(|e| AdvisoryError::InvalidJson(format!("Failed to parse response: {}", e)))?;

        extract_content(&response_json)
    }
}

/// Map a non-success status and its body to the matching error
fn status_error(status: u16, body: &str) -> AdvisoryError {
    let message = service_message(body);
    match status {
        401 | 403 => AdvisoryError::Authentication(status, message),
        429 => AdvisoryError::Quota(message),
        other => AdvisoryError::HttpError(format!(
            "HTTP {} from chat completions API{}",
            other,
            detail(&message)
        )),
    }
}

/// `error.message` from an OpenAI-style error body
fn service_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = json.get("error")?.get("message")?.as_str()?.trim();
    (!message.is_empty()).then(|| message.to_string())
}

/// Pull `choices[0].message.content` out of a chat-completions response
fn extract_content(response_json: &serde_json::Value) -> Result<String, AdvisoryError> {
    let text = response_json
        .get("choices")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("message"))
        .and_then(|v| v.get("content"))
        .and_then(|v| v.as_str())
        .ok_or(AdvisoryError::EmptyResponse)?;

    let text = text.trim();
    if text.is_empty() {
        return Err(AdvisoryError::EmptyResponse);
    }
    Ok(text.to_string())
}

/// Backend that could not be initialised; every call reports why
pub struct UnavailableBackend(pub AdvisoryError);

impl AdvisoryBackend for UnavailableBackend {
    fn submit(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String, AdvisoryError> {
        Err(self.0.clone())
    }
}

/// Fake backend for testing
pub struct FakeAdvisoryBackend {
    responses: Mutex<Vec<Result<String, AdvisoryError>>>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl FakeAdvisoryBackend {
    /// Create a fake backend with pre-defined responses
    pub fn new(responses: Vec<Result<String, AdvisoryError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the given text
    pub fn always(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    /// Always fail with the given error
    pub fn always_error(error: AdvisoryError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// Last `(system, user)` prompt pair submitted
    pub fn last_prompt(&self) -> Option<(String, String)> {
        self.prompts.lock().ok().and_then(|p| p.last().cloned())
    }
}

impl AdvisoryBackend for FakeAdvisoryBackend {
    fn submit(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AdvisoryError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push((system_prompt.to_string(), user_prompt.to_string()));
        }

        let mut responses = self
            .responses
            .lock()
            .map_err(|_| AdvisoryError::EmptyResponse)?;

        match responses.len() {
            0 => Err(AdvisoryError::EmptyResponse),
            // Keep returning the last response
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}
