use std::time::Duration;

use rand::Rng;

/// Inbound text shorter than this gets the snappier thinking delay.
const SHORT_INBOUND_CHARS: usize = 20;

/// Chance of sending a short reaction ahead of a longer reply.
const REACTION_PROBABILITY: f64 = 0.3;

/// Source of pacing randomness.
///
/// All delays are advisory, never correctness-affecting. The trait exists
/// so tests can pin every outcome deterministically.
pub trait Pacing: Send + Sync {
    /// Pause before starting to reply, scaled by inbound length.
    fn thinking_delay(&self, inbound_chars: usize) -> Duration;

    /// Pause before each pacing chunk after the first.
    fn inter_chunk_delay(&self) -> Duration;

    /// Whether to send a short reaction ahead of the main reply.
    fn send_reaction(&self) -> bool;

    /// Pick one entry from a non-empty option set.
    fn pick<'a>(&self, options: &'a [&'a str]) -> &'a str;
}

/// Production pacing: uniform draws from the fixed ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPacing;

impl Pacing for RandomPacing {
    fn thinking_delay(&self, inbound_chars: usize) -> Duration {
        let ms = if inbound_chars < SHORT_INBOUND_CHARS {
            rand::rng().random_range(500..=1_500)
        } else {
            rand::rng().random_range(1_000..=3_000)
        };
        Duration::from_millis(ms)
    }

    fn inter_chunk_delay(&self) -> Duration {
        Duration::from_millis(rand::rng().random_range(600..=1_400))
    }

    fn send_reaction(&self) -> bool {
        rand::rng().random_bool(REACTION_PROBABILITY)
    }

    fn pick<'a>(&self, options: &'a [&'a str]) -> &'a str {
        options[rand::rng().random_range(0..options.len())]
    }
}
