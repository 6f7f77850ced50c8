//! Kafka producer for synthetic ecommerce events
//!
//! This library wraps an rdkafka `FutureProducer` for publishing `Event`s
//! from the `event-generator` crate.
//!
//! ## Features
//!
//! - **Reachability check**: `connect` fails fast when no broker answers
//! - **JSON encoding**: one record per event, keyed by user id
//! - **Acknowledged sends**: `acks=all`, each publish waits for delivery
//! - **Topic management**: optional topic creation before producing
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ecommerce_kafka_producer::{KafkaEventProducer, ProducerSettings};
//! use event_generator::EventGenerator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let producer = KafkaEventProducer::connect(ProducerSettings::new("localhost:9092")).await?;
//!     producer.create_topic_if_not_exists("ecommerce-events", 3).await?;
//!
//!     let event = EventGenerator::new().next_event();
//!     let delivery = producer.publish("ecommerce-events", &event).await?;
//!     println!("partition {} offset {}", delivery.partition, delivery.offset);
//!
//!     producer.close().await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod producer;

pub use error::KafkaProducerError;
pub use producer::{
    Delivery, KafkaEventProducer, ProducerSettings, DEFAULT_CONNECT_TIMEOUT,
    DEFAULT_DELIVERY_TIMEOUT, FLUSH_TIMEOUT,
};
