use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::error::CompletionError;
use super::message::Message;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Body of one chat completion call: the model, the full history and the
/// sampling temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

/// Something that can answer a [`CompletionRequest`].
///
/// The returned future is `'static` so it can run on its own task while the
/// terminal stays responsive.
pub trait CompletionBackend: Send + Sync {
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> BoxFuture<'static, Result<String, CompletionError>>;
}

/// Connection settings for [`OpenRouterClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Full URL of the chat completions endpoint.
    pub endpoint: String,
    /// Bearer token. `None` or blank fails every call with `AuthMissing`.
    pub api_key: Option<String>,
    /// Sent as `X-Title`.
    pub title: String,
    /// Sent as `HTTP-Referer`.
    pub referer: String,
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn new(api_key: Option<String>, title: String, referer: String) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
            title,
            referer,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Non-streaming client for OpenRouter's OpenAI-compatible endpoint.
pub struct OpenRouterClient {
    client: Client,
    settings: Arc<ClientSettings>,
}

impl OpenRouterClient {
    pub fn new(settings: ClientSettings) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            settings: Arc::new(settings),
        })
    }
}

impl CompletionBackend for OpenRouterClient {
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> BoxFuture<'static, Result<String, CompletionError>> {
        let client = self.client.clone();
        let settings = Arc::clone(&self.settings);
        async move { send(&client, &settings, &request).await }.boxed()
    }
}

async fn send(
    client: &Client,
    settings: &ClientSettings,
    request: &CompletionRequest,
) -> Result<String, CompletionError> {
    let api_key = settings.api_key().ok_or(CompletionError::AuthMissing)?;

    tracing::debug!(
        endpoint = %settings.endpoint,
        model = %request.model,
        messages = request.messages.len(),
        "sending completion request"
    );

    let response = client
        .post(&settings.endpoint)
        .bearer_auth(api_key)
        .header("HTTP-Referer", &settings.referer)
        .header("X-Title", &settings.title)
        .json(request)
        .send()
        .await
        .map_err(|e| classify(&e, settings.timeout))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| classify(&e, settings.timeout))?;

    tracing::debug!(status = status.as_u16(), bytes = body.len(), "completion response");

    if !status.is_success() {
        return Err(CompletionError::Http {
            status: status.as_u16(),
            body,
        });
    }

    extract_reply(&body)
}

fn classify(error: &reqwest::Error, timeout: Duration) -> CompletionError {
    if error.is_timeout() {
        CompletionError::Timeout(timeout)
    } else {
        CompletionError::Transport(error.to_string())
    }
}

/// Pulls `choices[0].message.content` out of a success body.
fn extract_reply(body: &str) -> Result<String, CompletionError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::Malformed(format!("body is not valid JSON: {e}")))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| {
            CompletionError::Malformed("missing choices[0].message.content".to_string())
        })
}
