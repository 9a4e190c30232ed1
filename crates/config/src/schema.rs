use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BanterConfig {
    pub server: ServerConfig,
    pub telegram: TelegramConfig,
    pub providers: ProvidersConfig,
}

/// Health-check server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to. Defaults to "127.0.0.1".
    pub bind: String,
    /// Port to listen on. Defaults to 3000.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

/// Telegram bot configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token from @BotFather. Usually supplied as `${TELEGRAM_TOKEN}`.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,
}

impl TelegramConfig {
    /// Whether a token has been configured at all.
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.expose_secret().is_empty()
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
        }
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Completion provider configuration.
///
/// `models` is the fallback chain: tried strictly in listed order until one
/// produces a usable completion. The order encodes a curated quality/cost
/// preference, not load-balancing weights.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// API key for the OpenRouter-compatible endpoint.
    #[serde(serialize_with = "serialize_secret")]
    pub api_key: Secret<String>,
    /// Base URL of the chat-completions API.
    pub base_url: String,
    /// Ordered model list forming the fallback chain.
    pub models: Vec<String>,
    /// Sampling temperature sent with every request.
    pub temperature: f32,
    /// Completion token cap sent with every request.
    pub max_tokens: u32,
    /// Nucleus-sampling parameter sent with every request.
    pub top_p: f32,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Backoff in milliseconds after a non-rate-limit provider failure.
    pub backoff_ms: u64,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            api_key: Secret::new(String::new()),
            base_url: "https://openrouter.ai/api/v1".into(),
            models: default_models(),
            temperature: 1.0,
            max_tokens: 150,
            top_p: 0.95,
            request_timeout_secs: 10,
            backoff_ms: 1_000,
        }
    }
}

impl std::fmt::Debug for ProvidersConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvidersConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("models", &self.models)
            .finish_non_exhaustive()
    }
}

/// Default free-tier model chain, best first.
fn default_models() -> Vec<String> {
    [
        "kwaipilot/kat-coder-pro:free",
        "openrouter/polaris-alpha",
        "minimax/minimax-m2:free",
        "deepseek/deepseek-chat-v3.1:free",
        "qwen/qwen3-coder:free",
        "moonshotai/kimi-k2:free",
        "google/gemini-2.0-flash-exp:free",
        "meta-llama/llama-3.3-70b-instruct:free",
        "deepseek/deepseek-r1:free",
        "qwen/qwen-2.5-72b-instruct:free",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}
