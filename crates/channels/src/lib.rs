//! Transport-facing traits. Each messaging platform implements these; the
//! reply engine only ever talks to the trait.

pub mod plugin;

pub use plugin::ChannelOutbound;
