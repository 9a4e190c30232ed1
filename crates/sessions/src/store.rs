use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use {dashmap::DashMap, tokio::sync::Mutex, tracing::debug};

use {banter_common::ConversationId, banter_persona::Mood};

use crate::message::ChatMessage;

/// Maximum history entries kept per conversation.
pub const HISTORY_CAP: usize = 40;

/// Entries evicted together when the cap is exceeded. Two, so a
/// user/assistant pair leaves as a unit and pairing survives eviction.
const EVICT_PAIR: usize = 2;

/// Inbound silence longer than this counts as a long gap.
pub const LONG_GAP: Duration = Duration::from_secs(3_600);

/// What we know about the person on the other end. Mutated additively only.
#[derive(Debug, Clone)]
pub struct Profile {
    pub display_name: String,
    /// Accumulated interest tags, insertion-ordered, never removed.
    pub interests: Vec<String>,
    /// Reserved for recent-topic tracking; not populated yet.
    pub last_topics: Vec<String>,
}

impl Profile {
    fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            interests: Vec::new(),
            last_topics: Vec::new(),
        }
    }
}

/// All state owned by one conversation.
pub struct Session {
    history: Vec<ChatMessage>,
    pub profile: Profile,
    /// Most recently detected mood, latest-wins.
    pub mood: Option<Mood>,
    last_activity: Instant,
}

impl Session {
    fn new(display_name: &str) -> Self {
        Self {
            history: Vec::new(),
            profile: Profile::new(display_name),
            mood: None,
            last_activity: Instant::now(),
        }
    }

    /// Bounded conversation history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Append a turn, evicting the oldest user/assistant pair when the cap
    /// is exceeded. Relative order of the remainder is untouched.
    pub fn append_turn(&mut self, message: ChatMessage) {
        self.history.push(message);
        if self.history.len() > HISTORY_CAP {
            self.history.drain(..EVICT_PAIR);
        }
    }

    /// Elapsed time since the last inbound message; resets the clock to now.
    pub fn touch(&mut self) -> Duration {
        let gap = self.last_activity.elapsed();
        self.last_activity = Instant::now();
        gap
    }
}

/// Shared handle to one conversation's state. Hold the lock for the full
/// handle-one-message sequence to keep same-conversation events in arrival
/// order.
pub type SessionHandle = Arc<Mutex<Session>>;

/// In-memory session store, partitioned by conversation.
///
/// The map itself is sharded (dashmap), so cross-conversation access never
/// contends on a single lock. Sessions are created on first contact and
/// live until process exit; there is no TTL eviction.
#[derive(Default)]
pub struct SessionStore {
    inner: DashMap<ConversationId, SessionHandle>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the session for a conversation, creating it on first contact.
    /// Idempotent; the display name is only used for initialization.
    pub fn get_or_create(&self, id: &ConversationId, display_name: &str) -> SessionHandle {
        if let Some(existing) = self.inner.get(id) {
            return Arc::clone(&existing);
        }
        let created = self
            .inner
            .entry(id.clone())
            .or_insert_with(|| {
                debug!(conversation = %id, "creating session");
                Arc::new(Mutex::new(Session::new(display_name)))
            })
            .clone();
        created
    }

    /// Replace a conversation's state with a fresh session (`/start`).
    pub fn reset(&self, id: &ConversationId, display_name: &str) -> SessionHandle {
        let fresh: SessionHandle = Arc::new(Mutex::new(Session::new(display_name)));
        self.inner.insert(id.clone(), Arc::clone(&fresh));
        fresh
    }

    /// Number of conversations currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
