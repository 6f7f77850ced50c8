//! Event generator producing randomized ecommerce events.

use chrono::{DateTime, Local};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::event::{Event, EventType};
use crate::mix::EventMix;
use crate::products::PRODUCTS;

/// Lower bound of generated amounts.
pub const AMOUNT_MIN: f64 = 10.0;
/// Upper bound of generated amounts.
pub const AMOUNT_MAX: f64 = 100.0;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Unknown event type: {0} (expected view, add_to_cart or purchase)")]
    UnknownEventType(String),

    #[error("Invalid weight {weight} for event type {event_type}: weights must be finite and non-negative")]
    InvalidWeight { event_type: EventType, weight: f64 },

    #[error("Event mix must give at least one event type a positive weight")]
    EmptyMix,

    #[error("Event mix weights are too large: their sum is not finite")]
    WeightOverflow,

    #[error("Malformed event mix entry '{0}' (expected name=weight)")]
    MalformedMix(String),

    #[error("Failed to encode event: {0}")]
    Encoding(#[source] serde_json::Error),
}

/// Generator that produces synthetic ecommerce events.
///
/// A seeded generator produces the same sequence of user ids, event types,
/// products and amounts on every run. Timestamps always come from the local
/// wall clock.
pub struct EventGenerator {
    rng: StdRng,
    mix: EventMix,
    event_types: WeightedIndex<f64>,
    /// Last timestamp handed out, so a clock step backwards never reorders events
    last_timestamp: Option<DateTime<Local>>,
    generated: u64,
}

impl EventGenerator {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a generator with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mix = EventMix::default();
        Self {
            rng,
            mix,
            event_types: weighted_index(&mix).expect("default mix is uniform"),
            last_timestamp: None,
            generated: 0,
        }
    }

    /// Replace the event type weights.
    pub fn with_mix(mut self, mix: EventMix) -> Result<Self, GeneratorError> {
        self.event_types = weighted_index(&mix)?;
        self.mix = mix;
        Ok(self)
    }

    pub fn mix(&self) -> &EventMix {
        &self.mix
    }

    /// Number of events generated so far.
    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Generate the next event.
    pub fn next_event(&mut self) -> Event {
        let user_id = self.next_user_id();
        let event_type = EventType::ALL[self.event_types.sample(&mut self.rng)];
        let product = PRODUCTS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("item");
        let amount = round_cents(self.rng.gen_range(AMOUNT_MIN..=AMOUNT_MAX));
        let timestamp = self.next_timestamp();

        self.generated += 1;
        Event::new(user_id, event_type, product, timestamp, amount)
    }

    /// Lazily generate `count` events.
    pub fn events(&mut self, count: u64) -> EventIterator<'_> {
        EventIterator {
            generator: self,
            remaining: count,
        }
    }

    fn next_user_id(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill(&mut bytes);

        // Set version (4) and variant (RFC 4122) bits
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        Uuid::from_bytes(bytes)
    }

    fn next_timestamp(&mut self) -> DateTime<Local> {
        let now = Local::now();
        let timestamp = match self.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);
        timestamp
    }
}

impl Default for EventGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over generated events.
pub struct EventIterator<'a> {
    generator: &'a mut EventGenerator,
    remaining: u64,
}

impl Iterator for EventIterator<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.generator.next_event())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

fn weighted_index(mix: &EventMix) -> Result<WeightedIndex<f64>, GeneratorError> {
    WeightedIndex::new(mix.weights()).map_err(|_| GeneratorError::EmptyMix)
}

fn round_cents(value: f64) -> f64 {
    ((value * 100.0).round() / 100.0).clamp(AMOUNT_MIN, AMOUNT_MAX)
}
