use std::sync::Arc;

use tracing::{debug, info, warn};

use {
    banter_channels::ChannelOutbound,
    banter_common::{ConversationId, EventKind, InboundEvent, MediaKind},
    banter_persona::{
        FILLERS, PERSONA_PROMPT, casualize, classify_mood, context_prompt, extra_context,
        media_reply, update_interests,
    },
    banter_providers::{CompletionRequest, FallbackChain},
    banter_sessions::{ChatMessage, LONG_GAP, SessionStore},
};

use crate::{delivery::DeliveryScheduler, pacing::Pacing};

/// Main entry point: process one inbound event and deliver the reply.
///
/// Events for the same conversation are serialized by holding that
/// conversation's session lock across the whole sequence (state read →
/// provider call → state write → delivery); different conversations run
/// concurrently.
pub struct ReplyEngine {
    sessions: Arc<SessionStore>,
    chain: Arc<FallbackChain>,
    outbound: Arc<dyn ChannelOutbound>,
    pacing: Arc<dyn Pacing>,
    delivery: DeliveryScheduler,
}

impl ReplyEngine {
    pub fn new(
        sessions: Arc<SessionStore>,
        chain: Arc<FallbackChain>,
        outbound: Arc<dyn ChannelOutbound>,
        pacing: Arc<dyn Pacing>,
    ) -> Self {
        let delivery = DeliveryScheduler::new(Arc::clone(&pacing));
        Self {
            sessions,
            chain,
            outbound,
            pacing,
            delivery,
        }
    }

    pub async fn handle_event(&self, event: InboundEvent) {
        debug!(
            conversation = %event.conversation_id,
            queued_ms = event.arrived_at.elapsed().as_millis() as u64,
            "handling inbound event"
        );
        match event.kind {
            EventKind::Media(kind) => self.handle_media(&event.conversation_id, kind).await,
            EventKind::Text(ref text) => {
                self.handle_text(&event.conversation_id, &event.display_name, text)
                    .await;
            },
        }
    }

    /// Media-only messages get a canned reply and never touch the
    /// completion pipeline or session state.
    async fn handle_media(&self, conversation: &ConversationId, kind: MediaKind) {
        let canned = media_reply(kind);

        if canned.typing
            && let Err(e) = self.outbound.send_typing(conversation).await
        {
            warn!(conversation = %conversation, error = %e, "typing indicator failed");
        }
        tokio::time::sleep(canned.delay).await;

        let reply = self.pacing.pick(canned.replies);
        info!(conversation = %conversation, media = kind.as_str(), reply, "canned media reply");
        if let Err(e) = self.outbound.send_text(conversation, reply).await {
            warn!(conversation = %conversation, error = %e, "canned reply send failed");
        }
    }

    async fn handle_text(&self, conversation: &ConversationId, display_name: &str, text: &str) {
        let handle = self.sessions.get_or_create(conversation, display_name);
        let mut session = handle.lock().await;

        info!(conversation = %conversation, from = display_name, "incoming message: {text}");

        let long_gap = session.touch() > LONG_GAP;

        update_interests(text, &mut session.profile.interests);
        if let Some(mood) = classify_mood(text) {
            session.mood = Some(mood);
        }
        let extra = extra_context(long_gap, session.mood);

        session.append_turn(ChatMessage::user(text));

        if let Err(e) = self.outbound.send_typing(conversation).await {
            warn!(conversation = %conversation, error = %e, "typing indicator failed");
        }
        tokio::time::sleep(self.pacing.thinking_delay(text.chars().count())).await;

        let result = {
            let request = CompletionRequest {
                system: vec![
                    PERSONA_PROMPT.to_string(),
                    context_prompt(&session.profile.display_name, &extra, &session.profile.interests),
                ],
                history: session.history(),
            };
            self.chain.complete(&request).await
        };

        match result {
            Ok(raw) => {
                let reply = casualize(&raw);
                session.append_turn(ChatMessage::assistant(reply.clone()));
                info!(conversation = %conversation, "replying: {reply}");
                self.delivery
                    .deliver(self.outbound.as_ref(), conversation, &reply)
                    .await;
            },
            Err(e) => {
                // Total failure for this event: one in-persona filler, no
                // retry, nothing technical leaks to the conversation.
                warn!(conversation = %conversation, error = %e, "no completion, sending filler");
                let filler = self.pacing.pick(FILLERS);
                if let Err(send_err) = self.outbound.send_text(conversation, filler).await {
                    warn!(conversation = %conversation, error = %send_err, "filler send failed");
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Mutex, atomic::{AtomicUsize, Ordering}},
        time::Duration,
    };

    use {
        anyhow::Result,
        async_trait::async_trait,
        banter_providers::{CompletionProvider, Error},
    };

    use super::*;

    #[derive(Default)]
    struct RecordingOutbound {
        sent: Mutex<Vec<String>>,
        typing: AtomicUsize,
    }

    impl RecordingOutbound {
        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChannelOutbound for RecordingOutbound {
        async fn send_text(&self, _to: &ConversationId, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }

        async fn send_typing(&self, _to: &ConversationId) -> Result<()> {
            self.typing.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct PinnedPacing;

    impl Pacing for PinnedPacing {
        fn thinking_delay(&self, _inbound_chars: usize) -> Duration {
            Duration::ZERO
        }

        fn inter_chunk_delay(&self) -> Duration {
            Duration::ZERO
        }

        fn send_reaction(&self) -> bool {
            false
        }

        fn pick<'a>(&self, options: &'a [&'a str]) -> &'a str {
            options[0]
        }
    }

    struct CannedProvider {
        reply: &'static str,
    }

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        fn id(&self) -> &str {
            "canned"
        }

        async fn complete(&self, _request: &CompletionRequest<'_>) -> banter_providers::Result<String> {
            Ok(self.reply.to_string())
        }
    }

    struct DeadProvider;

    #[async_trait]
    impl CompletionProvider for DeadProvider {
        fn id(&self) -> &str {
            "dead"
        }

        async fn complete(&self, _request: &CompletionRequest<'_>) -> banter_providers::Result<String> {
            Err(Error::Unavailable("http 503".into()))
        }
    }

    fn engine_with(
        provider: Arc<dyn CompletionProvider>,
    ) -> (ReplyEngine, Arc<SessionStore>, Arc<RecordingOutbound>) {
        let sessions = Arc::new(SessionStore::new());
        let outbound = Arc::new(RecordingOutbound::default());
        let chain = Arc::new(FallbackChain::new(vec![provider], Duration::ZERO));
        let engine = ReplyEngine::new(
            Arc::clone(&sessions),
            chain,
            outbound.clone() as Arc<dyn ChannelOutbound>,
            Arc::new(PinnedPacing),
        );
        (engine, sessions, outbound)
    }

    #[tokio::test]
    async fn text_event_produces_casualized_reply_and_history() {
        let (engine, sessions, outbound) = engine_with(Arc::new(CannedProvider {
            reply: "However, I am going to think about it.",
        }));

        engine
            .handle_event(InboundEvent::text("chat-1", "Sam", "what do you think"))
            .await;

        assert_eq!(outbound.sent(), vec!["but like I am gonna think about it."]);
        assert_eq!(outbound.typing.load(Ordering::SeqCst), 1);

        let handle = sessions.get_or_create(&ConversationId::new("chat-1"), "Sam");
        let session = handle.lock().await;
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].content, "what do you think");
        assert_eq!(session.history()[1].content, "but like I am gonna think about it.");
    }

    #[tokio::test]
    async fn exhausted_chain_sends_filler_not_error_text() {
        let (engine, sessions, outbound) = engine_with(Arc::new(DeadProvider));

        engine
            .handle_event(InboundEvent::text("chat-1", "Sam", "hello?"))
            .await;

        let sent = outbound.sent();
        assert_eq!(sent.len(), 1);
        assert!(FILLERS.contains(&sent[0].as_str()));

        // The attempted user turn stays in history; no assistant turn.
        let handle = sessions.get_or_create(&ConversationId::new("chat-1"), "Sam");
        assert_eq!(handle.lock().await.history().len(), 1);
    }

    #[tokio::test]
    async fn extractor_updates_profile_and_mood() {
        let (engine, sessions, _outbound) = engine_with(Arc::new(CannedProvider { reply: "nice" }));

        engine
            .handle_event(InboundEvent::text(
                "chat-1",
                "Sam",
                "lol I love coding and gaming",
            ))
            .await;

        let handle = sessions.get_or_create(&ConversationId::new("chat-1"), "Sam");
        let session = handle.lock().await;
        assert_eq!(session.profile.interests, vec!["coding", "gaming"]);
        assert_eq!(session.mood, Some(banter_persona::Mood::Happy));
    }

    #[tokio::test]
    async fn media_event_bypasses_sessions_and_pipeline() {
        let (engine, sessions, outbound) = engine_with(Arc::new(DeadProvider));

        engine
            .handle_event(InboundEvent::media("chat-1", "Sam", MediaKind::Sticker))
            .await;

        // Canned reply delivered even though every provider is dead.
        assert_eq!(outbound.sent(), vec!["😂"]);
        // Stickers skip the typing indicator and no session is created.
        assert_eq!(outbound.typing.load(Ordering::SeqCst), 0);
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn voice_event_shows_typing_first() {
        let (engine, _sessions, outbound) = engine_with(Arc::new(DeadProvider));

        engine
            .handle_event(InboundEvent::media("chat-1", "Sam", MediaKind::Voice))
            .await;

        assert_eq!(outbound.typing.load(Ordering::SeqCst), 1);
        assert_eq!(outbound.sent(), vec!["cant listen rn"]);
    }

    #[tokio::test]
    async fn long_reply_is_delivered_in_order() {
        let (engine, _sessions, outbound) = engine_with(Arc::new(CannedProvider {
            reply: "here is a sentence that fills some space nicely. here is a sentence that fills some space nicely. here is a sentence that fills some space nicely. here is a sentence that fills some space nicely. here is a sentence that fills some space nicely. here is a sentence that fills some space nicely. here is a sentence that fills some space nicely.",
        }));

        engine
            .handle_event(InboundEvent::text("chat-1", "Sam", "tell me everything"))
            .await;

        let sent = outbound.sent();
        assert!(sent.len() > 1);
        assert!(sent[0].starts_with("here is a sentence"));
        for chunk in &sent {
            assert!(chunk.chars().count() <= 250);
        }
    }

    #[tokio::test]
    async fn conversations_do_not_share_history() {
        let (engine, sessions, _outbound) = engine_with(Arc::new(CannedProvider { reply: "yo" }));

        engine
            .handle_event(InboundEvent::text("chat-a", "A", "first"))
            .await;
        engine
            .handle_event(InboundEvent::text("chat-b", "B", "second"))
            .await;

        let a = sessions.get_or_create(&ConversationId::new("chat-a"), "A");
        let b = sessions.get_or_create(&ConversationId::new("chat-b"), "B");
        assert_eq!(a.lock().await.history().len(), 2);
        assert_eq!(b.lock().await.history().len(), 2);
        assert_eq!(a.lock().await.history()[0].content, "first");
        assert_eq!(b.lock().await.history()[0].content, "second");
    }
}
