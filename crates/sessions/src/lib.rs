//! Volatile per-conversation state: bounded history, profile, mood, and
//! last-activity tracking.
//!
//! State lives for the process lifetime only — nothing is persisted. The
//! store is a sharded concurrent map of per-conversation async mutexes;
//! holding a conversation's lock across the whole handle-one-message
//! sequence serializes that conversation while others proceed in parallel.

pub mod message;
pub mod store;

pub use {
    message::{ChatMessage, Role},
    store::{HISTORY_CAP, LONG_GAP, Profile, Session, SessionHandle, SessionStore},
};
