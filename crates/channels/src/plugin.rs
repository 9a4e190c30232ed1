use {anyhow::Result, async_trait::async_trait};

use banter_common::ConversationId;

/// Send messages to a conversation through the platform.
///
/// Fire-and-forget from the core's perspective: callers log failures and
/// move on; nothing is retried and session state is never rolled back.
#[async_trait]
pub trait ChannelOutbound: Send + Sync {
    async fn send_text(&self, to: &ConversationId, text: &str) -> Result<()>;

    /// Show a "typing" indicator. No-op by default.
    async fn send_typing(&self, _to: &ConversationId) -> Result<()> {
        Ok(())
    }
}
