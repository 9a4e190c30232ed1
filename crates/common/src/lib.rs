//! Shared types used across all banter crates.

pub mod types;

pub use types::{ConversationId, EventKind, InboundEvent, MediaKind};
