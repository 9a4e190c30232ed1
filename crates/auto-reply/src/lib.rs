//! The reply engine: inbound event → session state → provider fallback →
//! humanizer → paced delivery.

pub mod delivery;
pub mod pacing;
pub mod reply;

pub use {
    delivery::DeliveryScheduler,
    pacing::{Pacing, RandomPacing},
    reply::ReplyEngine,
};
