use std::{sync::Arc, time::Duration};

use tracing::warn;

use {
    banter_channels::ChannelOutbound,
    banter_common::ConversationId,
    banter_persona::{REACTIONS, split_for_pacing},
};

use crate::pacing::Pacing;

/// Replies longer than this may get a reaction sent ahead of them.
const REACTION_MIN_CHARS: usize = 30;

/// Pause between a reaction and the main reply.
const REACTION_PAUSE: Duration = Duration::from_millis(500);

/// Sequences outbound chunks with variable delays to mimic a human typing
/// and sending several short messages.
///
/// Send failures are logged and abandon the rest of the reply; partially
/// delivered chunks are acceptable and never replayed, and session state
/// written before delivery stays as-is.
pub struct DeliveryScheduler {
    pacing: Arc<dyn Pacing>,
}

impl DeliveryScheduler {
    pub fn new(pacing: Arc<dyn Pacing>) -> Self {
        Self { pacing }
    }

    /// Deliver the humanized reply: maybe a reaction first, then the
    /// pacing chunks in order.
    pub async fn deliver(&self, outbound: &dyn ChannelOutbound, to: &ConversationId, reply: &str) {
        if reply.chars().count() > REACTION_MIN_CHARS && self.pacing.send_reaction() {
            let reaction = self.pacing.pick(REACTIONS);
            if let Err(e) = outbound.send_text(to, reaction).await {
                warn!(conversation = %to, error = %e, "reaction send failed");
                return;
            }
            tokio::time::sleep(REACTION_PAUSE).await;
        }

        for (index, chunk) in split_for_pacing(reply).iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.pacing.inter_chunk_delay()).await;
            }
            if let Err(e) = outbound.send_text(to, chunk).await {
                warn!(conversation = %to, error = %e, "chunk send failed, dropping rest of reply");
                return;
            }
        }
    }
}
