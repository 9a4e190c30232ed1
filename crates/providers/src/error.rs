use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// HTTP 429 — advance to the next provider with no backoff.
    #[error("rate limited")]
    RateLimited,

    /// The request exceeded its deadline.
    #[error("request timed out")]
    Timeout,

    /// Any other failure: non-2xx status, transport error, malformed or
    /// empty payload. Takes the fixed backoff before the next provider.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Every provider in the chain failed. The caller surfaces an
    /// in-persona filler, never this message.
    #[error("all providers failed: {summary}")]
    Exhausted { summary: String },
}

pub type Result<T> = std::result::Result<T, Error>;
