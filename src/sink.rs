//! Destinations the produce loop publishes events to.

use anyhow::Context;
use async_trait::async_trait;
use ecommerce_kafka_producer::{Delivery, KafkaEventProducer};
use event_generator::Event;

/// Something events can be published to.
///
/// `publish` resolves once the event has been accepted; an error means the
/// event was not delivered.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, topic: &str, event: &Event) -> anyhow::Result<Delivery>;
}

#[async_trait]
impl EventSink for KafkaEventProducer {
    async fn publish(&self, topic: &str, event: &Event) -> anyhow::Result<Delivery> {
        KafkaEventProducer::publish(self, topic, event)
            .await
            .with_context(|| format!("Failed to publish event for user {}", event.user_id()))
    }
}
