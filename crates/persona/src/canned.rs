use std::time::Duration;

use banter_common::MediaKind;

/// Short reactions occasionally sent ahead of a longer reply.
pub const REACTIONS: &[&str] = &["lol", "haha", "damn", "yo", "😂", "bruh"];

/// In-persona filler apologies for when every provider has failed.
/// Never a technical error string.
pub const FILLERS: &[&str] = &["my bad i zoned out", "wait what", "huh?", "hold on", "sorry what"];

/// Greeting pair sent on `/start`.
pub const GREETING_FOLLOWUP: &str = "just chillin, hbu?";

#[must_use]
pub fn greeting(display_name: &str) -> String {
    format!("yo what's up {display_name}")
}

/// A canned response table entry for one media kind.
#[derive(Debug, Clone, Copy)]
pub struct CannedReply {
    pub replies: &'static [&'static str],
    /// Pause before sending.
    pub delay: Duration,
    /// Whether to show a typing indicator first.
    pub typing: bool,
}

/// Fixed canned-response table for media-only messages. These never reach
/// the completion pipeline.
#[must_use]
pub fn media_reply(kind: MediaKind) -> CannedReply {
    match kind {
        MediaKind::Voice => CannedReply {
            replies: &["cant listen rn", "voice notes rn? 😅", "yo just type it"],
            delay: Duration::from_millis(500),
            typing: true,
        },
        MediaKind::Sticker => CannedReply {
            replies: &["😂", "lmao", "💀", "haha", "fr"],
            delay: Duration::from_millis(300),
            typing: false,
        },
        MediaKind::Photo => CannedReply {
            replies: &["yoo nice", "thats sick", "damn", "fireee 🔥", "yo thats dope"],
            delay: Duration::from_millis(1_000),
            typing: true,
        },
        MediaKind::Video => CannedReply {
            replies: &["lmaooo", "bro 💀", "nah thats funny", "haha wtf"],
            delay: Duration::from_millis(2_000),
            typing: true,
        },
    }
}
