//! Telegram transport: long-poll loop, inbound classification, and the
//! outbound adapter.

pub mod bot;
pub mod error;
pub mod handlers;
pub mod outbound;

pub use {
    bot::start_polling,
    error::{Error, Result},
    outbound::TelegramOutbound,
};
