//! Completion providers and the sequential fallback chain.

pub mod chain;
pub mod error;
pub mod openrouter;

use {async_trait::async_trait, serde_json::json};

use banter_sessions::{ChatMessage, Role};

pub use {
    chain::FallbackChain,
    error::{Error, Result},
    openrouter::OpenRouterProvider,
};

/// Shared HTTP client for completion providers.
///
/// Providers reuse this client to share connection pools, DNS cache, and
/// TLS sessions.
pub fn shared_http_client() -> &'static reqwest::Client {
    static CLIENT: std::sync::LazyLock<reqwest::Client> =
        std::sync::LazyLock::new(reqwest::Client::new);
    &CLIENT
}

/// Sampling parameters sent with every request a provider makes.
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_tokens: 150,
            top_p: 0.95,
        }
    }
}

/// One completion request: ordered system instructions (persona first,
/// then the contextual instruction) followed by the bounded history.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub system: Vec<String>,
    pub history: &'a [ChatMessage],
}

impl CompletionRequest<'_> {
    /// Wire-shape messages: system instructions then history turns.
    #[must_use]
    pub fn wire_messages(&self) -> Vec<serde_json::Value> {
        let mut messages: Vec<serde_json::Value> = self
            .system
            .iter()
            .map(|content| json!({"role": "system", "content": content}))
            .collect();
        messages.extend(self.history.iter().map(|turn| {
            let role = match turn.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            json!({"role": role, "content": turn.content})
        }));
        messages
    }
}

/// A completion backend. Identified by its model id; invocation parameters
/// are fixed at construction.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Stable identifier for logs and chain ordering (e.g. the model id).
    fn id(&self) -> &str;

    /// Produce a completion, or fail with a classified [`Error`].
    /// Success implies a non-empty trimmed completion string.
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String>;
}
