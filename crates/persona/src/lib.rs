//! The bot's voice: mood and interest extraction from inbound text, the
//! humanizer that turns provider output into casual chat messages, persona
//! prompts, and the canned reply tables.
//!
//! Everything here is a total function over arbitrary strings — no I/O, no
//! failures. Unrecognized input yields "no mood" / "no interests" / the
//! text unchanged rather than an error.

pub mod canned;
pub mod casual;
pub mod mood;
pub mod prompt;

pub use {
    canned::{CannedReply, FILLERS, REACTIONS, media_reply},
    casual::{casualize, split_for_pacing},
    mood::{Mood, classify_mood, update_interests},
    prompt::{PERSONA_PROMPT, context_prompt, extra_context},
};
