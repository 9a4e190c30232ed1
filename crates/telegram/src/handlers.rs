use std::{sync::Arc, time::Duration};

use {
    teloxide::types::{MediaKind as TgMediaKind, Message, MessageKind},
    tracing::{debug, warn},
};

use {
    banter_auto_reply::ReplyEngine,
    banter_channels::ChannelOutbound,
    banter_common::{ConversationId, InboundEvent, MediaKind},
    banter_persona::canned::{GREETING_FOLLOWUP, greeting},
    banter_sessions::SessionStore,
};

/// Pause between the two greeting messages sent on `/start`.
const GREETING_PAUSE: Duration = Duration::from_millis(800);

/// Classify one Telegram message and hand it to the reply engine.
///
/// Each message is processed in its own task so a slow conversation never
/// stalls the polling loop; the engine's per-conversation lock keeps
/// same-chat messages in arrival order.
pub async fn handle_message(
    msg: Message,
    engine: Arc<ReplyEngine>,
    sessions: Arc<SessionStore>,
    outbound: Arc<dyn ChannelOutbound>,
) {
    let conversation = ConversationId::new(msg.chat.id.0.to_string());
    let display_name = msg
        .from
        .as_ref()
        .map(|u| u.first_name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "friend".to_string());

    if let Some(text) = msg.text() {
        if let Some(command) = text.strip_prefix('/') {
            let command = command.to_string();
            tokio::spawn(async move {
                handle_command(&command, &conversation, &display_name, &sessions, &outbound).await;
            });
            return;
        }
        let event = InboundEvent::text(conversation, display_name, text);
        tokio::spawn(async move { engine.handle_event(event).await });
        return;
    }

    if let Some(kind) = media_kind_of(&msg) {
        let event = InboundEvent::media(conversation, display_name, kind);
        tokio::spawn(async move { engine.handle_event(event).await });
        return;
    }

    debug!(conversation = %conversation, "ignoring unsupported message kind");
}

/// Slash commands. Only `/start` does anything: reset the conversation and
/// greet; everything else is silently ignored.
async fn handle_command(
    command: &str,
    conversation: &ConversationId,
    display_name: &str,
    sessions: &Arc<SessionStore>,
    outbound: &Arc<dyn ChannelOutbound>,
) {
    if command != "start" && !command.starts_with("start ") {
        debug!(conversation = %conversation, command, "ignoring command");
        return;
    }

    sessions.reset(conversation, display_name);

    if let Err(e) = outbound.send_text(conversation, &greeting(display_name)).await {
        warn!(conversation = %conversation, error = %e, "greeting send failed");
        return;
    }
    tokio::time::sleep(GREETING_PAUSE).await;
    if let Err(e) = outbound.send_text(conversation, GREETING_FOLLOWUP).await {
        warn!(conversation = %conversation, error = %e, "greeting followup send failed");
    }
}

/// Map a Telegram message to one of the canned-reply media kinds.
fn media_kind_of(msg: &Message) -> Option<MediaKind> {
    let MessageKind::Common(common) = &msg.kind else {
        return None;
    };
    match &common.media_kind {
        TgMediaKind::Voice(_) | TgMediaKind::Audio(_) => Some(MediaKind::Voice),
        TgMediaKind::Sticker(_) => Some(MediaKind::Sticker),
        TgMediaKind::Photo(_) => Some(MediaKind::Photo),
        TgMediaKind::Video(_) | TgMediaKind::VideoNote(_) => Some(MediaKind::Video),
        _ => None,
    }
}
