use std::time::Duration;

use {
    async_trait::async_trait,
    reqwest::StatusCode,
    secrecy::{ExposeSecret, Secret},
    serde_json::json,
    tracing::debug,
};

use crate::{
    CompletionProvider, CompletionRequest, SamplingParams,
    error::{Error, Result},
    shared_http_client,
};

/// One model behind an OpenRouter-compatible chat-completions endpoint.
///
/// Each configured model becomes its own provider instance so the fallback
/// chain can order them independently.
pub struct OpenRouterProvider {
    model: String,
    base_url: String,
    api_key: Secret<String>,
    params: SamplingParams,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    pub fn new(
        model: impl Into<String>,
        base_url: impl Into<String>,
        api_key: Secret<String>,
        params: SamplingParams,
        timeout: Duration,
    ) -> Self {
        Self {
            model: model.into(),
            base_url: base_url.into(),
            api_key,
            params,
            timeout,
            client: shared_http_client().clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    fn id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": request.wire_messages(),
            "temperature": self.params.temperature,
            "max_tokens": self.params.max_tokens,
            "top_p": self.params.top_p,
        });

        debug!(model = %self.model, turns = request.history.len(), "requesting completion");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }
        if !status.is_success() {
            return Err(Error::Unavailable(format!("http {status}")));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::Unavailable(format!("malformed payload: {e}")))?;

        let text = payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::Unavailable("empty completion".into()));
        }

        Ok(text.to_string())
    }
}

fn classify_transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::Unavailable(e.to_string())
    }
}
