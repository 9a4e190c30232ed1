use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Opaque identifier for one ongoing conversation, supplied by the
/// transport (one per distinct chat). Stable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ConversationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Kind of a media-only message. These bypass the completion pipeline and
/// get canned replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Voice,
    Sticker,
    Photo,
    Video,
}

impl MediaKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Voice => "voice",
            Self::Sticker => "sticker",
            Self::Photo => "photo",
            Self::Video => "video",
        }
    }
}

/// Payload of an inbound event: either text or a media-only message.
#[derive(Debug, Clone)]
pub enum EventKind {
    Text(String),
    Media(MediaKind),
}

/// An inbound message event handed to the reply engine by a transport.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub conversation_id: ConversationId,
    /// Sender's first name as reported by the platform.
    pub display_name: String,
    pub kind: EventKind,
    pub arrived_at: Instant,
}

impl InboundEvent {
    pub fn text(
        conversation_id: impl Into<ConversationId>,
        display_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            display_name: display_name.into(),
            kind: EventKind::Text(text.into()),
            arrived_at: Instant::now(),
        }
    }

    pub fn media(
        conversation_id: impl Into<ConversationId>,
        display_name: impl Into<String>,
        media: MediaKind,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            display_name: display_name.into(),
            kind: EventKind::Media(media),
            arrived_at: Instant::now(),
        }
    }
}
