//! Sequential provider fail-over.
//!
//! Providers are tried strictly in configured order. A rate-limited
//! provider is skipped immediately; any other failure takes a fixed
//! backoff first. The first usable completion short-circuits the rest.
//! The chain deliberately accepts worst-case latency (sum of per-provider
//! timeouts) to maximize the odds of a completion from zero-cost backends.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use tracing::{debug, info, warn};

use banter_config::ProvidersConfig;

use crate::{
    CompletionProvider, CompletionRequest, OpenRouterProvider, SamplingParams,
    error::{Error, Result},
};

/// Sentinel for "no success recorded yet".
const NO_SUCCESS: usize = usize::MAX;

/// Ordered fail-over chain over interchangeable completion providers.
pub struct FallbackChain {
    providers: Vec<Arc<dyn CompletionProvider>>,
    backoff: Duration,
    /// Index of the most recent provider that succeeded. Recorded for
    /// observability only — iteration always restarts at the front.
    last_success: AtomicUsize,
}

impl FallbackChain {
    pub fn new(providers: Vec<Arc<dyn CompletionProvider>>, backoff: Duration) -> Self {
        Self {
            providers,
            backoff,
            last_success: AtomicUsize::new(NO_SUCCESS),
        }
    }

    /// Build the chain from config: one OpenRouter provider per listed
    /// model, in list order.
    #[must_use]
    pub fn from_config(config: &ProvidersConfig) -> Self {
        let params = SamplingParams {
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            top_p: config.top_p,
        };
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let providers = config
            .models
            .iter()
            .map(|model| {
                Arc::new(OpenRouterProvider::new(
                    model.clone(),
                    config.base_url.clone(),
                    config.api_key.clone(),
                    params,
                    timeout,
                )) as Arc<dyn CompletionProvider>
            })
            .collect();
        Self::new(providers, Duration::from_millis(config.backoff_ms))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Index of the most recently successful provider, if any. Exposed for
    /// health reporting; never used to reorder the chain.
    #[must_use]
    pub fn last_successful(&self) -> Option<usize> {
        match self.last_success.load(Ordering::Relaxed) {
            NO_SUCCESS => None,
            index => Some(index),
        }
    }

    /// Try each provider in order until one yields a usable completion.
    ///
    /// Returns [`Error::Exhausted`] when every provider failed; the caller
    /// must treat that as total failure for this inbound event and not
    /// retry further.
    pub async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String> {
        let mut failures = Vec::new();

        for (index, provider) in self.providers.iter().enumerate() {
            debug!(
                provider = provider.id(),
                attempt = index + 1,
                total = self.providers.len(),
                "trying provider"
            );

            match provider.complete(request).await {
                Ok(text) => {
                    self.last_success.store(index, Ordering::Relaxed);
                    info!(provider = provider.id(), "completion succeeded");
                    return Ok(text);
                },
                Err(Error::RateLimited) => {
                    warn!(provider = provider.id(), "rate limited, trying next provider");
                    failures.push(format!("{}: rate limited", provider.id()));
                },
                Err(e) => {
                    warn!(
                        provider = provider.id(),
                        error = %e,
                        backoff_ms = self.backoff.as_millis() as u64,
                        "provider failed, backing off"
                    );
                    failures.push(format!("{}: {e}", provider.id()));
                    tokio::time::sleep(self.backoff).await;
                },
            }
        }

        Err(Error::Exhausted {
            summary: failures.join("; "),
        })
    }
}
