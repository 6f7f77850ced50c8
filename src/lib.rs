//! ecommerce-events library
//!
//! Publishes synthetic ecommerce events (product views, add-to-carts and
//! purchases) to a Kafka topic at randomized intervals, for exercising a
//! Kafka / Spark / PostgreSQL streaming stack.
//!
//! # Crates
//!
//! - `event_generator` - the `Event` model and the randomized `EventGenerator`
//! - `ecommerce_kafka_producer` - rdkafka producer with JSON encoding and acknowledged sends
//! - this crate - CLI configuration, the produce loop and shutdown handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Produce events with the default rate (1-5 seconds)
//! ecommerce-events
//!
//! # High load: 1000 events with 0.1-0.5 second intervals
//! ecommerce-events --rate-min 0.1 --rate-max 0.5 --max-events 1000
//!
//! # Mostly views, reproducible content, topic created up front
//! ecommerce-events --event-mix view=8,add_to_cart=3,purchase=1 --seed 42 --create-topic
//! ```

pub mod config;
pub mod metrics;
pub mod produce;
pub mod shutdown;
pub mod sink;
pub mod testing;

pub use config::{LoopConfig, ProducerArgs, ProducerConfig, RateRange};
pub use metrics::{ProduceMetrics, StopReason};
pub use produce::{produce_events, run};
pub use sink::EventSink;
