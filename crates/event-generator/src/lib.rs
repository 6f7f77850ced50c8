//! Synthetic ecommerce event generator.
//!
//! This crate provides the `EventGenerator` which produces `Event` records for
//! the ecommerce-events producer. Each event describes one shopper action
//! (a product view, an add-to-cart or a purchase) with a fresh user id, a
//! product picked from a fixed vocabulary, the local wall-clock time and an
//! amount between 10 and 100.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ EventGenerator  │
//! │                 │
//! │  - rng (StdRng) │
//! │  - mix          │──── EventMix (event type weights)
//! │  - last ts      │
//! └────────┬────────┘
//!          │
//!          ▼
//!    Event { user_id, event_type, product, timestamp, amount }
//! ```
//!
//! # Example
//!
//! ```rust
//! use event_generator::{EventGenerator, EventMix};
//!
//! let mix: EventMix = "view=6,add_to_cart=3,purchase=1".parse().unwrap();
//! let mut generator = EventGenerator::seeded(42).with_mix(mix).unwrap();
//!
//! let event = generator.next_event();
//! println!("{}", serde_json::to_string(&event).unwrap());
//! ```

pub mod event;
pub mod generator;
pub mod mix;
pub mod products;

// Re-exports for convenience
pub use event::{Event, EventType};
pub use generator::{EventGenerator, EventIterator, GeneratorError, AMOUNT_MAX, AMOUNT_MIN};
pub use mix::EventMix;
pub use products::PRODUCTS;
